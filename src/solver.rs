//! State-space search over block configurations.
//!
//! One search loop serves every strategy. What differs between them is the
//! `Frontier` (which discovered state is expanded next) and the
//! `DedupTiming` (whether a state counts as visited when it is discovered or
//! only when it is expanded). Every run is bounded by a wall-clock timeout
//! that is checked once per iteration, before a state is selected.
use log::{debug, info, trace};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::engine::{Configuration, Move, State};
use crate::error::ParseStrategyError;
use crate::heuristics::Heuristic;

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const PROGRESS_INTERVAL: usize = 10_000;

/// The traversal strategies understood by the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// Breadth-first: FIFO frontier, shortest plans.
    Breadth,
    /// Depth-first: LIFO frontier.
    Depth,
    /// Best-first on the number of misplaced blocks.
    Best,
    /// Best-first on misplaced blocks plus moves made so far.
    Astar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Breadth,
        Strategy::Depth,
        Strategy::Best,
        Strategy::Astar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Breadth => "breadth",
            Strategy::Depth => "depth",
            Strategy::Best => "best",
            Strategy::Astar => "astar",
        }
    }

    /// Depth-first marks states visited only when it expands them; the
    /// other strategies mark them as soon as they are discovered.
    pub fn default_dedup(self) -> DedupTiming {
        match self {
            Strategy::Depth => DedupTiming::OnExpansion,
            Strategy::Breadth | Strategy::Best | Strategy::Astar => DedupTiming::OnDiscovery,
        }
    }

    pub fn heuristic(self) -> Option<Heuristic> {
        match self {
            Strategy::Best => Some(Heuristic::Misplaced),
            Strategy::Astar => Some(Heuristic::MisplacedPlusDepth),
            Strategy::Breadth | Strategy::Depth => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

/// When a state is entered into the visited set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DedupTiming {
    /// When it is generated and inserted into the frontier. A state enters
    /// the frontier at most once, except the root, which is only marked
    /// once it is generated again as a successor.
    OnDiscovery,
    /// When it is selected and expanded. The same state may sit in the
    /// frontier several times; later copies are skipped when selected.
    OnExpansion,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub strategy: Strategy,
    pub timeout: Duration,
    pub dedup: DedupTiming,
}

impl SearchConfig {
    /// The strategy with the default timeout and its default dedup timing.
    pub fn new(strategy: Strategy) -> Self {
        SearchConfigBuilder::new(strategy).build()
    }

    pub fn builder(strategy: Strategy) -> SearchConfigBuilder {
        SearchConfigBuilder::new(strategy)
    }
}

pub struct SearchConfigBuilder {
    strategy: Strategy,
    timeout: Option<Duration>,
    dedup: Option<DedupTiming>,
}

impl SearchConfigBuilder {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            timeout: None,
            dedup: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn dedup(mut self, dedup: DedupTiming) -> Self {
        self.dedup = Some(dedup);
        self
    }

    pub fn build(self) -> SearchConfig {
        SearchConfig {
            strategy: self.strategy,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            dedup: self.dedup.unwrap_or_else(|| self.strategy.default_dedup()),
        }
    }
}

/// The collection of discovered states awaiting expansion.
pub trait Frontier {
    fn insert(&mut self, state: Rc<State>);

    /// Removes and returns the next state to expand.
    fn select(&mut self) -> Option<Rc<State>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out.
#[derive(Default)]
pub struct FifoFrontier {
    queue: VecDeque<Rc<State>>,
}

impl Frontier for FifoFrontier {
    fn insert(&mut self, state: Rc<State>) {
        self.queue.push_back(state);
    }

    fn select(&mut self) -> Option<Rc<State>> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last in, first out.
#[derive(Default)]
pub struct LifoFrontier {
    stack: Vec<Rc<State>>,
}

impl Frontier for LifoFrontier {
    fn insert(&mut self, state: Rc<State>) {
        self.stack.push(state);
    }

    fn select(&mut self) -> Option<Rc<State>> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

struct ScoredEntry {
    score: usize,
    order: u64,
    state: Rc<State>,
}

impl PartialEq for ScoredEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredEntry {}

impl PartialOrd for ScoredEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.order.cmp(&other.order))
    }
}

/// Lowest score first; among equal scores, the earliest inserted state wins.
///
/// A state's score never changes after it is built (its depth is fixed at
/// construction), so scoring once on insertion selects exactly what a full
/// scan of the frontier would.
pub struct ScoredFrontier {
    heuristic: Heuristic,
    goal: Configuration,
    heap: BinaryHeap<Reverse<ScoredEntry>>,
    inserted: u64,
}

impl ScoredFrontier {
    pub fn new(heuristic: Heuristic, goal: Configuration) -> Self {
        ScoredFrontier {
            heuristic,
            goal,
            heap: BinaryHeap::new(),
            inserted: 0,
        }
    }
}

impl Frontier for ScoredFrontier {
    fn insert(&mut self, state: Rc<State>) {
        let score = self.heuristic.score(&state, &self.goal);
        self.heap.push(Reverse(ScoredEntry {
            score,
            order: self.inserted,
            state,
        }));
        self.inserted += 1;
    }

    fn select(&mut self) -> Option<Rc<State>> {
        self.heap.pop().map(|Reverse(entry)| entry.state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Loop iterations, i.e. states selected from the frontier.
    pub iterations: usize,
    /// States whose successors were generated.
    pub expanded: usize,
    /// Selected states skipped because they had already been expanded.
    pub stale: usize,
    /// Generated successors dropped because they were already discovered.
    pub discarded: usize,
    pub frontier_peak: usize,
    pub elapsed: Duration,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved { path: Vec<Move>, stats: SearchStats },
    TimedOut { stats: SearchStats },
    Exhausted { stats: SearchStats },
}

impl SearchOutcome {
    /// The plan, or `None` when the search timed out or ran out of states.
    pub fn path(&self) -> Option<&[Move]> {
        match self {
            SearchOutcome::Solved { path, .. } => Some(path),
            SearchOutcome::TimedOut { .. } | SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<Move>> {
        match self {
            SearchOutcome::Solved { path, .. } => Some(path),
            SearchOutcome::TimedOut { .. } | SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved { stats, .. }
            | SearchOutcome::TimedOut { stats }
            | SearchOutcome::Exhausted { stats } => stats,
        }
    }

    pub fn iterations(&self) -> usize {
        self.stats().iterations
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Solved { .. } => "solved",
            SearchOutcome::TimedOut { .. } => "timed out",
            SearchOutcome::Exhausted { .. } => "exhausted",
        }
    }
}

/// Searches for a move sequence turning `initial` into `goal`.
///
/// # Examples
/// ```
/// use blocks_world_solver::engine::Configuration;
/// use blocks_world_solver::solver::{solve, SearchConfig, Strategy};
/// use blocks_world_solver::utils::configuration_from_pairs;
///
/// let initial = Configuration::all_on_table(["A", "B"]);
/// let goal = configuration_from_pairs(&["A", "B"], &[("A", "B")]).unwrap();
/// let outcome = solve(&initial, &goal, &SearchConfig::new(Strategy::Breadth));
/// assert_eq!(outcome.path().map(|p| p.len()), Some(1));
/// ```
pub fn solve(initial: &Configuration, goal: &Configuration, config: &SearchConfig) -> SearchOutcome {
    info!(
        "{} search: {} blocks, timeout {:?}, dedup {:?}",
        config.strategy,
        initial.len(),
        config.timeout,
        config.dedup
    );

    let outcome = match config.strategy.heuristic() {
        Some(heuristic) => search(
            initial,
            goal,
            config.timeout,
            config.dedup,
            ScoredFrontier::new(heuristic, goal.clone()),
        ),
        None if config.strategy == Strategy::Depth => search(
            initial,
            goal,
            config.timeout,
            config.dedup,
            LifoFrontier::default(),
        ),
        None => search(
            initial,
            goal,
            config.timeout,
            config.dedup,
            FifoFrontier::default(),
        ),
    };

    let stats = outcome.stats();
    info!(
        "{} search {} after {} iterations ({} expanded, {:?})",
        config.strategy,
        outcome.label(),
        stats.iterations,
        stats.expanded,
        stats.elapsed
    );
    outcome
}

/// Runs the search loop with an explicit frontier.
pub fn search<F: Frontier>(
    initial: &Configuration,
    goal: &Configuration,
    timeout: Duration,
    dedup: DedupTiming,
    mut frontier: F,
) -> SearchOutcome {
    let start = Instant::now();
    let mut stats = SearchStats::default();
    let mut visited: HashSet<Rc<State>> = HashSet::new();

    frontier.insert(Rc::new(State::root(initial.clone())));
    stats.frontier_peak = frontier.len();

    while !frontier.is_empty() {
        if start.elapsed() > timeout {
            stats.elapsed = start.elapsed();
            return SearchOutcome::TimedOut { stats };
        }

        stats.iterations += 1;
        if stats.iterations % PROGRESS_INTERVAL == 0 {
            debug!(
                "iteration {}: frontier {}, visited {}, elapsed {:?}",
                stats.iterations,
                frontier.len(),
                visited.len(),
                start.elapsed()
            );
        }

        let Some(state) = frontier.select() else {
            break;
        };

        if state.configuration() == goal {
            stats.elapsed = start.elapsed();
            return SearchOutcome::Solved {
                path: state.trace_path(),
                stats,
            };
        }

        if dedup == DedupTiming::OnExpansion && !visited.insert(Rc::clone(&state)) {
            stats.stale += 1;
            continue;
        }

        stats.expanded += 1;
        trace!(
            "expanding state at depth {} via {:?}",
            state.depth(),
            state.forming_move()
        );

        for child in state.children() {
            let child = Rc::new(child);
            if dedup == DedupTiming::OnDiscovery && !visited.insert(Rc::clone(&child)) {
                stats.discarded += 1;
                continue;
            }
            frontier.insert(child);
        }
        stats.frontier_peak = stats.frontier_peak.max(frontier.len());
    }

    stats.elapsed = start.elapsed();
    SearchOutcome::Exhausted { stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{block_names, Block, Support};
    use crate::utils::configuration_from_pairs;
    use rstest::rstest;

    fn mv(object: &str, from: &str, to: &str) -> Move {
        Move {
            object: Block::new(object),
            from: Support::parse(from),
            to: Support::parse(to),
        }
    }

    // A on B on C, to C on B on A.
    fn scenario() -> (Configuration, Configuration) {
        let initial = configuration_from_pairs(&["A", "B", "C"], &[("A", "B"), ("B", "C")]).unwrap();
        let goal = configuration_from_pairs(&["A", "B", "C"], &[("C", "B"), ("B", "A")]).unwrap();
        (initial, goal)
    }

    fn random_instance(blocks: usize, seed: u64) -> (Configuration, Configuration) {
        let names = block_names(blocks);
        (
            Configuration::random_with_seed(&names, seed),
            Configuration::random_with_seed(&names, seed + 1000),
        )
    }

    // Applies each move with full legality checks and returns the final configuration.
    fn replay(initial: &Configuration, path: &[Move]) -> Configuration {
        path.iter().fold(initial.clone(), |config, m| {
            config
                .apply(m)
                .unwrap_or_else(|e| panic!("illegal move {}: {}\n{}", m, e, config))
        })
    }

    #[test]
    fn test_breadth_first_scenario() {
        let (initial, goal) = scenario();
        let outcome = solve(&initial, &goal, &SearchConfig::new(Strategy::Breadth));

        assert_eq!(
            outcome.path(),
            Some(&[mv("A", "B", "table"), mv("B", "C", "A"), mv("C", "table", "B")][..])
        );
        // Root, the single depth-1 state, the root again (rediscovered at
        // depth 2), the other depth-2 state, all on the table, then the goal.
        assert_eq!(outcome.iterations(), 6);
        assert_eq!(outcome.stats().expanded, 5);
    }

    #[rstest]
    #[case(Strategy::Breadth, 3, 6)]
    #[case(Strategy::Depth, 4, 17)]
    #[case(Strategy::Best, 3, 4)]
    #[case(Strategy::Astar, 3, 4)]
    fn test_scenario_iteration_counts(
        #[case] strategy: Strategy,
        #[case] moves: usize,
        #[case] iterations: usize,
    ) {
        let (initial, goal) = scenario();
        let outcome = solve(&initial, &goal, &SearchConfig::new(strategy));
        assert_eq!(outcome.path().map(<[Move]>::len), Some(moves));
        assert_eq!(outcome.iterations(), iterations);
    }

    #[test]
    fn test_depth_first_scenario_path() {
        let (initial, goal) = scenario();
        let outcome = solve(&initial, &goal, &SearchConfig::new(Strategy::Depth));

        assert_eq!(
            outcome.path(),
            Some(
                &[
                    mv("A", "B", "table"),
                    mv("B", "C", "table"),
                    mv("B", "table", "A"),
                    mv("C", "table", "B"),
                ][..]
            )
        );
        let stats = outcome.stats();
        assert!(stats.stale > 0, "{:?}", stats);
        assert_eq!(stats.discarded, 0);
        assert_eq!(stats.iterations, stats.expanded + stats.stale + 1);
    }

    #[rstest]
    #[case(Strategy::Breadth)]
    #[case(Strategy::Depth)]
    #[case(Strategy::Best)]
    #[case(Strategy::Astar)]
    fn test_scenario_replays_to_goal(#[case] strategy: Strategy) {
        let (initial, goal) = scenario();
        let outcome = solve(&initial, &goal, &SearchConfig::new(strategy));
        let path = outcome.path().expect("scenario should be solved");
        assert!(path.len() >= 3);
        assert_eq!(replay(&initial, path), goal);
    }

    #[rstest]
    fn test_random_instances_replay_to_goal(
        #[values(Strategy::Breadth, Strategy::Depth, Strategy::Best, Strategy::Astar)]
        strategy: Strategy,
        #[values(1, 2, 3, 4, 5)] seed: u64,
    ) {
        let (initial, goal) = random_instance(5, seed);
        let outcome = solve(&initial, &goal, &SearchConfig::new(strategy));
        assert!(outcome.is_solved(), "{} on seed {}: {:?}", strategy, seed, outcome);
        let path = outcome.path().unwrap();
        assert_eq!(replay(&initial, path), goal);
    }

    #[rstest]
    fn test_breadth_first_is_never_longer(#[values(7, 8, 9, 10, 11, 12)] seed: u64) {
        let (initial, goal) = random_instance(5, seed);
        let shortest = solve(&initial, &goal, &SearchConfig::new(Strategy::Breadth))
            .into_path()
            .unwrap();
        for strategy in [Strategy::Depth, Strategy::Best, Strategy::Astar] {
            let path = solve(&initial, &goal, &SearchConfig::new(strategy))
                .into_path()
                .unwrap();
            assert!(
                shortest.len() <= path.len(),
                "{} found {} moves, breadth found {}",
                strategy,
                path.len(),
                shortest.len()
            );
        }
    }

    #[rstest]
    #[case(Strategy::Breadth)]
    #[case(Strategy::Depth)]
    #[case(Strategy::Best)]
    #[case(Strategy::Astar)]
    fn test_initial_already_goal(#[case] strategy: Strategy) {
        let (initial, _) = scenario();
        let outcome = solve(&initial, &initial, &SearchConfig::new(strategy));
        assert_eq!(outcome.path().map(<[Move]>::is_empty), Some(true));
        assert_eq!(outcome.iterations(), 1);
        assert_eq!(outcome.stats().expanded, 0);
    }

    #[test]
    fn test_zero_timeout_times_out() {
        let (initial, goal) = random_instance(9, 3);
        let config = SearchConfig::builder(Strategy::Breadth)
            .timeout(Duration::ZERO)
            .build();
        let outcome = solve(&initial, &goal, &config);

        assert!(matches!(outcome, SearchOutcome::TimedOut { .. }), "{:?}", outcome);
        assert_eq!(outcome.path(), None);
        // Nine blocks have far more than 100 000 configurations.
        assert!(outcome.stats().expanded < 100_000);
    }

    #[test]
    fn test_unreachable_goal_is_exhausted() {
        // The goal mentions a block the start does not have.
        let initial = Configuration::all_on_table(["A", "B", "C"]);
        let goal = Configuration::all_on_table(["A", "B", "C", "D"]);

        let outcome = solve(&initial, &goal, &SearchConfig::new(Strategy::Breadth));
        assert!(matches!(outcome, SearchOutcome::Exhausted { .. }));
        assert_eq!(outcome.path(), None);
        // Three blocks have 13 configurations. Each is expanded once, and the
        // root a second time after it is rediscovered.
        let stats = outcome.stats();
        assert_eq!(stats.expanded, 14);
        assert_eq!(stats.iterations, 14);
        assert_eq!(stats.stale, 0);
    }

    #[test]
    fn test_depth_first_allows_duplicate_frontier_entries() {
        let initial = Configuration::all_on_table(["A", "B", "C"]);
        let goal = Configuration::all_on_table(["A", "B", "C", "D"]);

        let outcome = solve(&initial, &goal, &SearchConfig::new(Strategy::Depth));
        assert!(matches!(outcome, SearchOutcome::Exhausted { .. }));
        // Every successor is pushed; duplicates are skipped when popped.
        let stats = outcome.stats();
        assert_eq!(stats.expanded, 13);
        assert_eq!(stats.stale, 18);
        assert_eq!(stats.iterations, 31);
        assert_eq!(stats.discarded, 0);
    }

    #[test]
    fn test_depth_first_with_discovery_dedup() {
        let initial = Configuration::all_on_table(["A", "B", "C"]);
        let goal = Configuration::all_on_table(["A", "B", "C", "D"]);
        let config = SearchConfig::builder(Strategy::Depth)
            .dedup(DedupTiming::OnDiscovery)
            .build();

        let outcome = solve(&initial, &goal, &config);
        let stats = outcome.stats();
        assert_eq!(stats.expanded, 14);
        assert_eq!(stats.stale, 0);

        let (initial, goal) = scenario();
        let outcome = solve(&initial, &goal, &config);
        assert_eq!(replay(&initial, outcome.path().unwrap()), goal);
    }

    #[test]
    fn test_fifo_and_lifo_order() {
        let states: Vec<Rc<State>> = (1..=3)
            .map(|n| Rc::new(State::root(Configuration::all_on_table(block_names(n)))))
            .collect();

        let mut fifo = FifoFrontier::default();
        let mut lifo = LifoFrontier::default();
        for state in &states {
            fifo.insert(Rc::clone(state));
            lifo.insert(Rc::clone(state));
        }
        assert_eq!(fifo.len(), 3);
        assert_eq!(fifo.select().unwrap().configuration().len(), 1);
        assert_eq!(lifo.select().unwrap().configuration().len(), 3);
        assert!(!lifo.is_empty());
    }

    #[test]
    fn test_scored_frontier_prefers_low_score_then_insertion_order() {
        let flat = Configuration::all_on_table(["A", "B", "C"]);
        let a_on_b = configuration_from_pairs(&["A", "B", "C"], &[("A", "B")]).unwrap();
        let b_on_a = configuration_from_pairs(&["A", "B", "C"], &[("B", "A")]).unwrap();
        let c_on_a = configuration_from_pairs(&["A", "B", "C"], &[("C", "A")]).unwrap();

        let mut frontier = ScoredFrontier::new(Heuristic::Misplaced, flat.clone());
        for config in [&a_on_b, &b_on_a, &flat, &c_on_a] {
            frontier.insert(Rc::new(State::root(config.clone())));
        }

        let order: Vec<Configuration> = std::iter::from_fn(|| frontier.select())
            .map(|state| state.configuration().clone())
            .collect();
        assert_eq!(order, vec![flat, a_on_b, b_on_a, c_on_a]);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("breadth".parse::<Strategy>(), Ok(Strategy::Breadth));
        assert_eq!("DEPTH".parse::<Strategy>(), Ok(Strategy::Depth));
        assert_eq!(" best ".parse::<Strategy>(), Ok(Strategy::Best));
        assert_eq!("astar".parse::<Strategy>(), Ok(Strategy::Astar));
        assert_eq!(
            "bfs".parse::<Strategy>(),
            Err(ParseStrategyError("bfs".to_string()))
        );
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[test]
    fn test_search_config_defaults_and_overrides() {
        let breadth = SearchConfig::new(Strategy::Breadth);
        assert_eq!(breadth.timeout, DEFAULT_TIMEOUT);
        assert_eq!(breadth.dedup, DedupTiming::OnDiscovery);
        assert_eq!(SearchConfig::new(Strategy::Depth).dedup, DedupTiming::OnExpansion);
        assert_eq!(SearchConfig::new(Strategy::Astar).dedup, DedupTiming::OnDiscovery);

        let custom = SearchConfig::builder(Strategy::Depth)
            .timeout(Duration::from_secs(5))
            .dedup(DedupTiming::OnDiscovery)
            .build();
        assert_eq!(custom.timeout, Duration::from_secs(5));
        assert_eq!(custom.dedup, DedupTiming::OnDiscovery);
    }

    #[test]
    fn test_outcome_accessors() {
        let stats = SearchStats {
            iterations: 7,
            ..SearchStats::default()
        };
        let timed_out = SearchOutcome::TimedOut { stats };
        assert_eq!(timed_out.iterations(), 7);
        assert!(!timed_out.is_solved());
        assert_eq!(timed_out.label(), "timed out");
        assert_eq!(timed_out.into_path(), None);

        let solved = SearchOutcome::Solved {
            path: vec![mv("A", "table", "B")],
            stats,
        };
        assert!(solved.is_solved());
        assert_eq!(solved.path().map(<[Move]>::len), Some(1));
    }
}
