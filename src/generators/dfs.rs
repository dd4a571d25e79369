use rand::Rng;

use crate::maze::{Coord, Maze, direction::shuffled_steps};

/// What a carving run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarveReport {
    /// Walls cleared, each shared wall counted once
    pub passages: usize,
    /// Largest number of coordinates held on the backtracking stack at once
    pub peak_stack_depth: usize,
}

/// Randomized depth-first carving with an explicit backtracking stack.
///
/// Each pop advances into at most one unvisited neighbor. A cell that still has work left
/// is pushed back underneath the neighbor, so it is revisited once that branch dead-ends.
pub fn carve_with<R: Rng + ?Sized>(maze: &mut Maze, rng: &mut R) -> CarveReport {
    let mut report = CarveReport::default();

    let start = maze.start();
    maze.mark_visited(start);

    // The stack only holds coordinates into the maze
    let mut stack: Vec<Coord> = Vec::with_capacity(maze.size() as usize * 2);
    stack.push(start);
    report.peak_stack_depth = 1;

    while let Some(cell) = stack.pop() {
        let next = shuffled_steps(rng).into_iter().find_map(|step| {
            maze.neighbor(cell, step.direction)
                .filter(|&n| !maze[n].is_visited())
                .map(|_| step.direction)
        });

        if let Some(direction) = next {
            let neighbor = maze.carve(cell, direction);
            maze.mark_visited(neighbor);
            report.passages += 1;
            // Put the cell back first so we can look at another neighbor of this cell later
            stack.push(cell);
            stack.push(neighbor);
            report.peak_stack_depth = report.peak_stack_depth.max(stack.len());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::VecDeque;

    fn carved(size: u16, seed: u64) -> (Maze, CarveReport) {
        let mut maze = Maze::new(size).unwrap();
        let report = carve_with(&mut maze, &mut StdRng::seed_from_u64(seed));
        (maze, report)
    }

    /// Breadth-first walk over open passages from the start cell.
    /// Returns the number of cells reached and whether any back-edge was seen.
    fn walk(maze: &Maze) -> (usize, bool) {
        let n = maze.size() as usize;
        let mut parent: Vec<Option<Coord>> = vec![None; n * n];
        let mut seen = vec![false; n * n];
        let idx = |c: Coord| c.0 as usize * n + c.1 as usize;

        let mut queue = VecDeque::from([maze.start()]);
        seen[idx(maze.start())] = true;
        let mut reached = 1;
        let mut back_edge = false;

        while let Some(cell) = queue.pop_front() {
            for next in maze.open_neighbors(cell) {
                if parent[idx(cell)] == Some(next) {
                    continue;
                }
                if seen[idx(next)] {
                    back_edge = true;
                    continue;
                }
                seen[idx(next)] = true;
                parent[idx(next)] = Some(cell);
                reached += 1;
                queue.push_back(next);
            }
        }
        (reached, back_edge)
    }

    #[test]
    fn test_spanning_tree_edge_count() {
        for (size, seed) in [(2, 0), (5, 1), (17, 2), (40, 3)] {
            let (maze, report) = carved(size, seed);
            let cells = size as usize * size as usize;
            assert_eq!(maze.open_passages(), cells - 1);
            assert_eq!(report.passages, cells - 1);
        }
    }

    #[test]
    fn test_every_cell_visited_and_reachable() {
        let (maze, _) = carved(25, 11);
        assert!(maze.cells().all(|c| c.is_visited()));
        let (reached, _) = walk(&maze);
        assert_eq!(reached, 25 * 25);
    }

    #[test]
    fn test_no_cycles() {
        for seed in 0..10 {
            let (maze, _) = carved(15, seed);
            let (_, back_edge) = walk(&maze);
            assert!(!back_edge, "cycle found with seed {}", seed);
        }
    }

    #[test]
    fn test_walls_are_symmetric() {
        let (maze, _) = carved(20, 5);
        for cell in maze.cells() {
            for direction in [Direction::Down, Direction::Right] {
                if let Some(n) = maze.neighbor(cell.coord(), direction) {
                    assert_eq!(
                        cell.has_wall(direction),
                        maze[n].has_wall(direction.opposite()),
                        "asymmetric wall between {:?} and {:?}",
                        cell.coord(),
                        n
                    );
                }
            }
        }
    }

    #[test]
    fn test_boundary_walls_preserved() {
        let (maze, _) = carved(20, 8);
        for cell in maze.cells() {
            for direction in Direction::ALL {
                if maze.neighbor(cell.coord(), direction).is_none() {
                    assert!(
                        cell.has_wall(direction),
                        "outer {} wall of {:?} was removed",
                        direction,
                        cell.coord()
                    );
                }
            }
        }
        assert!(maze[(0, 0)].top() && maze[(0, 0)].left());
        assert!(maze[(19, 19)].bottom() && maze[(19, 19)].right());
    }

    #[test]
    fn test_single_cell_maze() {
        let (maze, report) = carved(1, 0);
        assert_eq!(report.passages, 0);
        assert_eq!(report.peak_stack_depth, 1);
        assert_eq!(maze.open_passages(), 0);
        assert_eq!(maze[(0, 0)].wall_count(), 4);
        assert!(maze[(0, 0)].is_visited());
    }

    #[test]
    fn test_large_maze_uses_explicit_stack() {
        let (maze, report) = carved(200, 123);
        assert_eq!(maze.open_passages(), 200 * 200 - 1);
        assert!(report.peak_stack_depth <= 200 * 200);
        let (reached, back_edge) = walk(&maze);
        assert_eq!(reached, 200 * 200);
        assert!(!back_edge);
    }

    #[test]
    fn test_carving_twice_changes_nothing() {
        let (mut maze, _) = carved(6, 4);
        let before = maze.clone();
        let report = carve_with(&mut maze, &mut StdRng::seed_from_u64(9));
        assert_eq!(report.passages, 0);
        assert_eq!(maze, before);
    }
}
