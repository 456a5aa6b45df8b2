//! `mazegen`: generate, render and impose mazes from the command line.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use maze_core::{
    batch::{self, BatchPlan},
    booklet,
    config::{OrganicConfig, RenderConfig},
    contour::Contour,
    depth_first,
    document::MazeDocument,
    organic::OrganicGrowth,
    recursive_division, render, voronoi,
};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Parser)]
#[command(name = "mazegen", version, about = "Maze generators and SVG renderers")]
struct Cli {
    /// Seed for every random choice; omit for a fresh maze each run.
    #[arg(long, global = true, env = "MAZEGEN_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    DepthFirst,
    RecursiveDivision,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Style {
    Outline,
    Thick,
    Debug,
    Network,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shape {
    Torus,
    Rectangle,
}

#[derive(clap::Args)]
struct Canvas {
    #[arg(long, default_value_t = 500.0)]
    width: f64,
    #[arg(long, default_value_t = 500.0)]
    height: f64,
    #[arg(long, default_value_t = 50.0)]
    padding: f64,
    #[arg(long, default_value_t = 5.0)]
    wall_thickness: f64,
}

impl Canvas {
    fn config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            padding: self.padding,
            wall_thickness: self.wall_thickness,
            ..RenderConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a grid maze and save it as JSON.
    Generate {
        #[arg(long, value_enum, default_value_t = Algorithm::DepthFirst)]
        algorithm: Algorithm,
        #[arg(long, default_value_t = 10)]
        cols: usize,
        #[arg(long, default_value_t = 10)]
        rows: usize,
        #[arg(short, long, default_value = "output/maze.json")]
        output: PathBuf,
        /// Also write an outline with entrance and exit.
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Print the maze as text.
        #[arg(long)]
        print: bool,
    },
    /// Render a saved maze document to SVG.
    Render {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = Style::Outline)]
        style: Style,
        /// Leave gaps for entrance and exit (outline style).
        #[arg(long)]
        entrance_exit: bool,
        #[command(flatten)]
        canvas: Canvas,
    },
    /// Run the organic growth simulation.
    Organic {
        /// JSON file with simulation settings; missing keys use defaults.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 40)]
        points: usize,
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long, value_enum, default_value_t = Shape::Torus)]
        shape: Shape,
        #[arg(short, long, default_value = "output/organic.json")]
        output: PathBuf,
        /// Path drawing.
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Voronoi walls around the path.
        #[arg(long)]
        walls: Option<PathBuf>,
        #[command(flatten)]
        canvas: Canvas,
    },
    /// Generate square mazes of increasing size for print.
    Batch {
        #[arg(long, default_value_t = 5)]
        min: usize,
        #[arg(long, default_value_t = 20)]
        max: usize,
        #[arg(long, default_value_t = 2)]
        per_size: usize,
        #[arg(short, long, default_value = "output/grid")]
        output: PathBuf,
        #[command(flatten)]
        canvas: Canvas,
    },
    /// Reorder rendered pages into front and back booklet sheets.
    Booklet {
        #[arg(short, long, default_value = "output/grid")]
        input: PathBuf,
        #[arg(short, long, default_value = "output/booklet")]
        output: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<OrganicConfig> {
    let Some(path) = path else {
        return Ok(OrganicConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Contour and the x of the entrance and exit pins. Torus pins sit on the
/// outer ring.
fn contour(shape: Shape) -> (Contour, f32) {
    match shape {
        Shape::Torus => (Contour::torus(0.5, 1.5, 128), 1.5),
        Shape::Rectangle => (Contour::rectangle(Vec2::new(1.5, 1.0)), 1.35),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    match cli.command {
        Commands::Generate {
            algorithm,
            cols,
            rows,
            output,
            svg,
            print,
        } => {
            let maze = match algorithm {
                Algorithm::DepthFirst => depth_first::generate(cols, rows, &mut rng),
                Algorithm::RecursiveDivision => recursive_division::generate(cols, rows, &mut rng),
            }
            .context("generating maze")?;

            MazeDocument::from(&maze)
                .save(&output)
                .with_context(|| format!("saving {}", output.display()))?;
            if let Some(svg) = svg {
                let doc = render::outline(&maze.to_mesh(), &maze.graph, &RenderConfig::default(), true);
                render::save(&svg, &doc).with_context(|| format!("saving {}", svg.display()))?;
            }
            if print {
                println!("{maze}");
            }
        }

        Commands::Render {
            input,
            output,
            style,
            entrance_exit,
            canvas,
        } => {
            let doc = MazeDocument::load(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let cfg = canvas.config();

            let svg = match style {
                Style::Network => render::network(&doc.nodes(), &doc.connections(), &cfg),
                Style::Outline | Style::Thick | Style::Debug => {
                    let maze = doc
                        .to_rectangular()
                        .with_context(|| format!("{style:?} rendering needs a grid maze"))?;
                    let mesh = maze.to_mesh();
                    match style {
                        Style::Thick => render::thick_walls(&mesh, &maze.graph, &cfg),
                        Style::Debug => render::debug(&mesh, &maze.graph, &cfg),
                        _ => render::outline(&mesh, &maze.graph, &cfg, entrance_exit),
                    }
                }
            };
            render::save(&output, &svg).with_context(|| format!("saving {}", output.display()))?;
        }

        Commands::Organic {
            config,
            points,
            iterations,
            shape,
            output,
            svg,
            walls,
            canvas,
        } => {
            let mut cfg = load_config(config.as_ref())?;
            if let Some(iterations) = iterations {
                cfg.iterations = iterations;
            }
            let (contour, pin_x) = contour(shape);
            let pins = if points >= 2 {
                vec![(0, Vec2::new(-pin_x, 0.0)), (points - 1, Vec2::new(pin_x, 0.0))]
            } else {
                Vec::new()
            };

            let mut maze = OrganicGrowth::new(points, &pins, contour, cfg, &mut rng);
            maze.simulate(&mut rng);

            MazeDocument::from(&maze)
                .save(&output)
                .with_context(|| format!("saving {}", output.display()))?;

            let render_cfg = canvas.config();
            if let Some(svg) = svg {
                let doc = render::network(
                    &maze.network.positions(),
                    &maze.network.connections,
                    &render_cfg,
                );
                render::save(&svg, &doc).with_context(|| format!("saving {}", svg.display()))?;
            }
            if let Some(path) = walls {
                let doc = render::voronoi(&voronoi::walls_for(&maze), &maze.contour, &render_cfg);
                render::save(&path, &doc).with_context(|| format!("saving {}", path.display()))?;
            }
        }

        Commands::Batch {
            min,
            max,
            per_size,
            output,
            canvas,
        } => {
            let plan = BatchPlan {
                min_size: min,
                max_size: max,
                per_size,
            };
            let items = batch::run(plan, &canvas.config(), &output, &mut rng)
                .with_context(|| format!("writing batch to {}", output.display()))?;
            println!("{} mazes written to {}", items.len(), output.display());
        }

        Commands::Booklet { input, output } => {
            let pages = booklet::collect_pages(&input)
                .with_context(|| format!("listing {}", input.display()))?;
            booklet::make_booklet(&pages, &output).context("imposing booklet")?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_seed_after_subcommand() {
        let cli = Cli::try_parse_from(["mazegen", "generate", "--cols", "4", "--seed", "9"]).unwrap();
        assert_eq!(cli.seed, Some(9));
        assert!(matches!(cli.command, Commands::Generate { cols: 4, rows: 10, .. }));
    }

    #[test]
    fn torus_pins_sit_on_the_outer_ring() {
        let (torus, pin_x) = contour(Shape::Torus);
        assert_eq!(pin_x, 1.5);
        let offset = torus.correction(Vec2::new(pin_x, 0.0)).unwrap_or(Vec2::ZERO);
        assert!(offset.length() < 1e-5);
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), OrganicConfig::default());
        assert!(load_config(Some(&PathBuf::from("/nonexistent/cfg.json"))).is_err());
    }
}
