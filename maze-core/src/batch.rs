//! Batch generation of square depth-first mazes for print.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::{
    config::RenderConfig, depth_first, document::MazeDocument, error::Result, render,
};

/// Sizes and repetitions of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchPlan {
    pub min_size: usize,
    pub max_size: usize,
    pub per_size: usize,
}

/// Files written for one maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchItem {
    pub index: usize,
    pub size: usize,
    pub json: PathBuf,
    pub svg: PathBuf,
}

/// Generates `per_size` mazes for every size in `min_size..=max_size`.
///
/// Mazes are numbered from 1. Maze `i` is written to `grid_{i:02}.json` and
/// `{i:02}_simple.svg`, an outline with entrance and exit, under `output_dir`.
pub fn run(
    plan: BatchPlan,
    cfg: &RenderConfig,
    output_dir: impl AsRef<Path>,
    rng: &mut impl Rng,
) -> Result<Vec<BatchItem>> {
    let output_dir = output_dir.as_ref();
    let mut items = Vec::new();

    for size in plan.min_size..=plan.max_size {
        for _ in 0..plan.per_size {
            let index = items.len() + 1;
            let maze = depth_first::generate(size, size, rng)?;

            let json = output_dir.join(format!("grid_{index:02}.json"));
            MazeDocument::from(&maze).save(&json)?;

            let svg = output_dir.join(format!("{index:02}_simple.svg"));
            let doc = render::outline(&maze.to_mesh(), &maze.graph, cfg, true);
            render::save(&svg, &doc)?;

            items.push(BatchItem {
                index,
                size,
                json,
                svg,
            });
        }
    }

    log::info!("batch: {} mazes in {}", items.len(), output_dir.display());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::fs;

    #[test]
    fn writes_json_and_svg_per_maze() {
        let dir = std::env::temp_dir().join(format!("maze-batch-{}", std::process::id()));
        let mut rng = StdRng::seed_from_u64(3);
        let plan = BatchPlan {
            min_size: 3,
            max_size: 4,
            per_size: 2,
        };

        let items = run(plan, &RenderConfig::default(), &dir, &mut rng).unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[2].size, 4);
        assert_eq!(items[0].index, 1);
        assert!(dir.join("grid_04.json").exists());
        assert!(dir.join("04_simple.svg").exists());
        assert!(!dir.join("00_simple.svg").exists());

        let doc = MazeDocument::load(&items[0].json).unwrap();
        let maze = doc.to_rectangular().unwrap();
        assert_eq!((maze.cols(), maze.rows()), (3, 3));
        assert_eq!(maze.graph.len(), 8);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn empty_range_writes_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let plan = BatchPlan {
            min_size: 5,
            max_size: 4,
            per_size: 1,
        };
        let dir = std::env::temp_dir().join("maze-batch-empty");
        assert!(run(plan, &RenderConfig::default(), dir, &mut rng).unwrap().is_empty());
    }
}
