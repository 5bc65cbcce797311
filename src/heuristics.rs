use crate::engine::{Configuration, State};

/// Counts the blocks whose support differs from their support in `goal`.
///
/// Clear flags are ignored. A block missing from `goal` counts as misplaced.
///
/// # Examples
/// ```
/// use blocks_world_solver::engine::Configuration;
/// use blocks_world_solver::heuristics::misplaced_blocks;
/// let flat = Configuration::all_on_table(["A", "B"]);
/// assert_eq!(misplaced_blocks(&flat, &flat), 0);
/// ```
pub fn misplaced_blocks(configuration: &Configuration, goal: &Configuration) -> usize {
    configuration
        .iter()
        .filter(|(block, placement)| goal.support_of(block.name()) != Some(&placement.support))
        .count()
}

/// `misplaced_blocks` plus the number of moves from the root to `state`.
///
/// The path length is the depth recorded when the state was built, which is
/// always the length of `state.trace_path()`.
pub fn misplaced_blocks_plus_depth(state: &State, goal: &Configuration) -> usize {
    misplaced_blocks(state.configuration(), goal) + state.depth()
}

/// The scoring rule used to order a heuristic frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Pure estimate to the goal (best-first).
    Misplaced,
    /// Estimate plus path cost so far (A*-style).
    MisplacedPlusDepth,
}

impl Heuristic {
    /// Scores `state` against `goal`; lower is closer.
    pub fn score(self, state: &State, goal: &Configuration) -> usize {
        match self {
            Heuristic::Misplaced => misplaced_blocks(state.configuration(), goal),
            Heuristic::MisplacedPlusDepth => misplaced_blocks_plus_depth(state, goal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Block, Move, Support};
    use crate::utils::configuration_from_pairs;
    use std::rc::Rc;

    fn goal_cba() -> Configuration {
        configuration_from_pairs(&["A", "B", "C"], &[("C", "B"), ("B", "A")]).unwrap()
    }

    #[test]
    fn test_misplaced_blocks_counts_supports_only() {
        let start = configuration_from_pairs(&["A", "B", "C"], &[("A", "B"), ("B", "C")]).unwrap();
        // A: B vs table, B: C vs A, C: table vs B.
        assert_eq!(misplaced_blocks(&start, &goal_cba()), 3);

        // Only C is out of place.
        let partial = configuration_from_pairs(&["A", "B", "C"], &[("B", "A")]).unwrap();
        assert_eq!(misplaced_blocks(&partial, &goal_cba()), 1);
        assert_eq!(misplaced_blocks(&goal_cba(), &goal_cba()), 0);
    }

    #[test]
    fn test_misplaced_blocks_unknown_goal_block() {
        let config = Configuration::all_on_table(["A", "Z"]);
        let goal = Configuration::all_on_table(["A"]);
        assert_eq!(misplaced_blocks(&config, &goal), 1);
    }

    #[test]
    fn test_plus_depth_matches_trace_length() {
        let root = Rc::new(State::root(Configuration::all_on_table(["A", "B", "C"])));
        let goal = goal_cba();
        assert_eq!(misplaced_blocks_plus_depth(&root, &goal), 2);

        let b_on_a = Move {
            object: Block::new("B"),
            from: Support::Table,
            to: Support::Block(Block::new("A")),
        };
        let child = Rc::new(State::child(&root, b_on_a).unwrap());
        let c_on_b = Move {
            object: Block::new("C"),
            from: Support::Table,
            to: Support::Block(Block::new("B")),
        };
        let grandchild = State::child(&child, c_on_b).unwrap();

        assert_eq!(misplaced_blocks(grandchild.configuration(), &goal), 0);
        assert_eq!(
            misplaced_blocks_plus_depth(&grandchild, &goal),
            grandchild.trace_path().len()
        );
        assert_eq!(Heuristic::MisplacedPlusDepth.score(&grandchild, &goal), 2);
        assert_eq!(Heuristic::Misplaced.score(&grandchild, &goal), 0);
        assert_eq!(Heuristic::Misplaced.score(&child, &goal), 1);
    }
}
