//! Recursive division generator: start fully open, then keep splitting
//! regions with walls that have a single gap.

use rand::Rng;

use crate::{error::Result, grid::RectangularMaze};

#[derive(Clone, Copy, Debug)]
struct Region {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
}

/// Replaces `maze.graph` with a recursive division maze.
///
/// A region is split along one of its `(w - 1) + (h - 1)` inner grid lines,
/// picked uniformly; the passages crossing that line are closed except for
/// one random gap. Regions one cell thin are corridors and stay as they are.
pub fn divide(maze: &mut RectangularMaze, rng: &mut impl Rng) {
    maze.fill_graph();

    let mut regions = vec![Region {
        x: 0,
        y: 0,
        w: maze.cols(),
        h: maze.rows(),
    }];

    while let Some(r) = regions.pop() {
        if r.w < 2 || r.h < 2 {
            continue;
        }

        let line = rng.random_range(0..(r.w - 1) + (r.h - 1));
        if line < r.h - 1 {
            // Horizontal wall above row `r.y + line`.
            let gap = rng.random_range(0..r.w);
            let y = r.y + line;
            for x in (r.x..r.x + r.w).filter(|&x| x != r.x + gap) {
                let (a, b) = (maze.index(x, y), maze.index(x, y + 1));
                maze.graph.remove(a, b);
            }
            regions.push(Region { h: line + 1, ..r });
            regions.push(Region {
                y: y + 1,
                h: r.h - line - 1,
                ..r
            });
        } else {
            // Vertical wall right of column `r.x + line`.
            let line = line - (r.h - 1);
            let gap = rng.random_range(0..r.h);
            let x = r.x + line;
            for y in (r.y..r.y + r.h).filter(|&y| y != r.y + gap) {
                let (a, b) = (maze.index(x, y), maze.index(x + 1, y));
                maze.graph.remove(a, b);
            }
            regions.push(Region { w: line + 1, ..r });
            regions.push(Region {
                x: x + 1,
                w: r.w - line - 1,
                ..r
            });
        }
    }
}

pub fn generate(cols: usize, rows: usize, rng: &mut impl Rng) -> Result<RectangularMaze> {
    let mut maze = RectangularMaze::new(cols, rows)?;
    divide(&mut maze, rng);
    log::debug!(
        "recursive division {cols}x{rows}: {} passages",
        maze.graph.len()
    );
    Ok(maze)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Topology;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn division_produces_a_spanning_tree() {
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate(14, 9, &mut rng).unwrap();
            let n = maze.node_count();
            assert_eq!(maze.graph.len(), n - 1, "seed {seed}");
            assert_eq!(maze.graph.reachable_from(n - 1, n), n, "seed {seed}");
        }
    }

    #[test]
    fn thin_grids_stay_corridors() {
        let mut rng = StdRng::seed_from_u64(5);
        let maze = generate(5, 1, &mut rng).unwrap();
        assert_eq!(maze.graph.len(), 4);
    }

    #[test]
    fn divide_overwrites_existing_passages() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut maze = RectangularMaze::new(4, 4).unwrap();
        maze.fill_graph();
        divide(&mut maze, &mut rng);
        assert_eq!(maze.graph.len(), 15);
    }
}
