use std::fs;
use std::path::PathBuf;

use glam::Vec2;
use maze_core::{
    config::{OrganicConfig, RenderConfig},
    contour::Contour,
    depth_first,
    document::MazeDocument,
    grid::Topology,
    organic::OrganicGrowth,
    recursive_division, render, voronoi,
};
use rand::{SeedableRng, rngs::StdRng};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("maze-pipeline-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn generated_maze_survives_save_load_and_renders() {
    let dir = scratch("grid");
    let mut rng = StdRng::seed_from_u64(11);
    let maze = depth_first::generate(8, 6, &mut rng).unwrap();

    let path = dir.join("nested/maze.json");
    MazeDocument::from(&maze).save(&path).unwrap();
    let loaded = MazeDocument::load(&path).unwrap().to_rectangular().unwrap();
    assert_eq!(loaded, maze);

    let svg_path = dir.join("maze.svg");
    let doc = render::outline(&loaded.to_mesh(), &loaded.graph, &RenderConfig::default(), true);
    render::save(&svg_path, &doc).unwrap();

    let svg = fs::read_to_string(&svg_path).unwrap();
    // A spanning tree on n cells opens n - 1 interior walls; entrance and
    // exit open two border walls.
    let n = maze.node_count();
    let all_walls = 9 * 6 + 7 * 8;
    assert_eq!(svg.matches("<line ").count(), all_walls - (n - 1) - 2);

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn recursive_division_round_trips_through_json() {
    let mut rng = StdRng::seed_from_u64(5);
    let maze = recursive_division::generate(7, 4, &mut rng).unwrap();
    let json = MazeDocument::from(&maze).to_json().unwrap();
    let back = MazeDocument::from_json(&json).unwrap().to_rectangular().unwrap();
    assert_eq!(back.graph, maze.graph);
    assert_eq!(back.graph.reachable_from(0, back.node_count()), back.node_count());
}

#[test]
fn organic_maze_saves_and_renders_walls() {
    let dir = scratch("organic");
    let mut rng = StdRng::seed_from_u64(21);
    let cfg = OrganicConfig {
        iterations: 200,
        growth_start: 10,
        growth_end: 100,
        ..OrganicConfig::default()
    };
    let pins = [(0, Vec2::new(-1.0, 0.0)), (29, Vec2::new(1.0, 0.0))];
    let mut maze = OrganicGrowth::new(30, &pins, Contour::torus(0.5, 1.5, 64), cfg, &mut rng);
    maze.simulate(&mut rng);

    let path = dir.join("organic.json");
    MazeDocument::from(&maze).save(&path).unwrap();
    let doc = MazeDocument::load(&path).unwrap();
    assert_eq!(doc.class(), "OrganicGrowthMaze");
    assert_eq!(doc.node_count(), maze.network.nodes.len());
    assert_eq!(doc.connections(), maze.network.connections);

    let walls = voronoi::walls_for(&maze);
    assert!(!walls.is_empty());
    let svg = render::voronoi(&walls, &maze.contour, &RenderConfig::default());
    render::save(dir.join("walls.svg"), &svg).unwrap();
    assert!(dir.join("walls.svg").exists());

    fs::remove_dir_all(dir).unwrap();
}
