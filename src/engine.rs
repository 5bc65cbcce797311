//! Core model for the blocks world.
//!
//! This module defines the pieces every search works with:
//! - `Block` and `Support`: what a block is, and what it can rest on.
//! - `Configuration`: where every block currently is, together with the
//!   rules for which single-block moves are legal and what they produce.
//! - `State`: a configuration plus the lineage (parent and forming move)
//!   needed to reconstruct the plan that reached it.
//! - `Puzzle`: an interactive session with undo history, used by the
//!   `human_player` binary.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::{ConfigurationError, MoveError};

/// Name of the table in problem files, move listings and user input.
pub const TABLE: &str = "table";

/// An opaque block label.
///
/// Labels are reference counted so that the many configurations created
/// during a search share one allocation per block.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block(Rc<str>);

impl Block {
    pub fn new(name: &str) -> Self {
        Block(Rc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Block {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Block {
    fn from(name: &str) -> Self {
        Block::new(name)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a block rests on: the table, or exactly one other block.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Support {
    Table,
    Block(Block),
}

impl Support {
    /// Interprets a user supplied name, treating `table` (any case) as the table.
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case(TABLE) {
            Support::Table
        } else {
            Support::Block(Block::new(name))
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Support::Table)
    }

    pub fn block(&self) -> Option<&Block> {
        match self {
            Support::Table => None,
            Support::Block(block) => Some(block),
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Support::Table => write!(f, "{}", TABLE),
            Support::Block(block) => write!(f, "{}", block),
        }
    }
}

/// The position of one block: its support and whether anything rests on it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub support: Support,
    pub clear: bool,
}

impl Placement {
    pub fn on_table() -> Self {
        Placement {
            support: Support::Table,
            clear: true,
        }
    }
}

/// A single move: `object` is lifted from `from` and put down on `to`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub object: Block,
    pub from: Support,
    pub to: Support,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {}, {})", self.object, self.from, self.to)
    }
}

/// A complete assignment of support and clear-status to every block.
///
/// Placements are kept in a `BTreeMap`, so iteration, equality and hashing
/// all follow the sorted block order and never depend on insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Configuration {
    placements: BTreeMap<Block, Placement>,
}

impl Configuration {
    /// Creates a configuration with every block alone on the table.
    ///
    /// # Examples
    /// ```
    /// use blocks_world_solver::engine::{Configuration, Support};
    /// let config = Configuration::all_on_table(["A", "B"]);
    /// assert_eq!(config.len(), 2);
    /// assert_eq!(config.support_of("A"), Some(&Support::Table));
    /// assert_eq!(config.is_clear("B"), Some(true));
    /// ```
    pub fn all_on_table<I, B>(blocks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Block>,
    {
        Configuration {
            placements: blocks
                .into_iter()
                .map(|block| (block.into(), Placement::on_table()))
                .collect(),
        }
    }

    /// Builds a configuration from externally supplied placements.
    ///
    /// The placements are checked against the stacking rules: every support
    /// must be a known block other than the block itself, at most one block
    /// may rest on any block, supports may not form a cycle, and each clear
    /// flag must agree with whether some block rests on it.
    pub fn from_placements(
        placements: BTreeMap<Block, Placement>,
    ) -> Result<Self, ConfigurationError> {
        let config = Configuration { placements };
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from "`upper` is on `lower`" relations.
    ///
    /// Blocks not mentioned as `upper` rest on the table; clear flags are
    /// derived from the relations.
    pub fn from_on_relations(
        blocks: &[Block],
        on: &[(Block, Block)],
    ) -> Result<Self, ConfigurationError> {
        let mut placements: BTreeMap<Block, Placement> = blocks
            .iter()
            .map(|block| (block.clone(), Placement::on_table()))
            .collect();

        for (upper, lower) in on {
            if !placements.contains_key(lower) {
                return Err(ConfigurationError::UnknownSupport {
                    block: upper.clone(),
                    support: lower.to_string(),
                });
            }
            match placements.get_mut(upper) {
                Some(placement) => placement.support = Support::Block(lower.clone()),
                None => return Err(ConfigurationError::UnknownBlock(upper.to_string())),
            }
            if let Some(placement) = placements.get_mut(lower) {
                placement.clear = false;
            }
        }

        Self::from_placements(placements)
    }

    /// Creates a reproducible random configuration over `blocks`.
    ///
    /// Each block, in a seeded shuffled order, either starts a new tower or
    /// is put on top of an existing one. The same blocks and seed always
    /// produce the same configuration. Duplicate labels are ignored.
    pub fn random_with_seed(blocks: &[Block], seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut order: Vec<Block> = blocks
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        order.shuffle(&mut rng);

        let mut towers: Vec<Vec<Block>> = Vec::new();
        for block in order {
            let slot = rng.gen_range(0..=towers.len());
            if slot == towers.len() {
                towers.push(vec![block]);
            } else {
                towers[slot].push(block);
            }
        }

        let mut placements = BTreeMap::new();
        for tower in &towers {
            for (level, block) in tower.iter().enumerate() {
                let support = match level {
                    0 => Support::Table,
                    _ => Support::Block(tower[level - 1].clone()),
                };
                let clear = level + 1 == tower.len();
                placements.insert(block.clone(), Placement { support, clear });
            }
        }
        Configuration { placements }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        let mut resting_on: BTreeMap<&Block, &Block> = BTreeMap::new();

        for (block, placement) in &self.placements {
            if let Support::Block(support) = &placement.support {
                if support == block {
                    return Err(ConfigurationError::SelfSupport(block.clone()));
                }
                if !self.placements.contains_key(support) {
                    return Err(ConfigurationError::UnknownSupport {
                        block: block.clone(),
                        support: support.to_string(),
                    });
                }
                if let Some(first) = resting_on.insert(support, block) {
                    return Err(ConfigurationError::DoubleStack {
                        support: support.clone(),
                        first: first.clone(),
                        second: block.clone(),
                    });
                }
            }
        }

        for (block, placement) in &self.placements {
            if placement.clear == resting_on.contains_key(block) {
                return Err(ConfigurationError::ClearMismatch {
                    block: block.clone(),
                    marked: placement.clear,
                });
            }
        }

        // A support chain longer than the number of blocks must revisit a block.
        for block in self.placements.keys() {
            let mut current = block;
            let mut steps = 0;
            while let Support::Block(next) = &self.placements[current].support {
                steps += 1;
                if steps > self.placements.len() {
                    return Err(ConfigurationError::Cycle(block.clone()));
                }
                current = next;
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Iterates over all blocks and their placements in block order.
    pub fn iter(&self) -> impl Iterator<Item = (&Block, &Placement)> {
        self.placements.iter()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.placements.keys()
    }

    /// Returns the stored label for `name`, if the block exists.
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.placements.get_key_value(name).map(|(block, _)| block)
    }

    pub fn placement(&self, name: &str) -> Option<&Placement> {
        self.placements.get(name)
    }

    pub fn support_of(&self, name: &str) -> Option<&Support> {
        self.placements.get(name).map(|placement| &placement.support)
    }

    pub fn is_clear(&self, name: &str) -> Option<bool> {
        self.placements.get(name).map(|placement| placement.clear)
    }

    /// Returns the blocks with nothing on top of them, in block order.
    pub fn clear_blocks(&self) -> Vec<&Block> {
        self.placements
            .iter()
            .filter(|(_, placement)| placement.clear)
            .map(|(block, _)| block)
            .collect()
    }

    /// Enumerates every legal single move from this configuration.
    ///
    /// With `C` the clear blocks, this is every ordered pair of distinct
    /// blocks in `C` (stack the first onto the second), followed by every
    /// block in `C` not already on the table (put it on the table). No move
    /// leaves the configuration unchanged.
    pub fn legal_moves(&self) -> Vec<Move> {
        let clear = self.clear_blocks();
        let mut moves = Vec::with_capacity(clear.len() * clear.len());

        for &object in &clear {
            for &destination in &clear {
                if object != destination {
                    moves.push(Move {
                        object: object.clone(),
                        from: self.placements[object].support.clone(),
                        to: Support::Block(destination.clone()),
                    });
                }
            }
        }

        for &object in &clear {
            let support = &self.placements[object].support;
            if !support.is_table() {
                moves.push(Move {
                    object: object.clone(),
                    from: support.clone(),
                    to: Support::Table,
                });
            }
        }

        moves
    }

    /// Checks whether `mv` may be applied to this configuration.
    pub fn check_move(&self, mv: &Move) -> Result<(), MoveError> {
        let placement = self
            .placements
            .get(&mv.object)
            .ok_or_else(|| MoveError::UnknownBlock(mv.object.to_string()))?;

        if placement.support != mv.from {
            return Err(MoveError::SourceMismatch {
                object: mv.object.clone(),
                claimed: mv.from.to_string(),
                actual: placement.support.to_string(),
            });
        }
        if !placement.clear {
            return Err(MoveError::NotClear(mv.object.clone()));
        }
        if let Support::Block(destination) = &mv.to {
            if destination == &mv.object {
                return Err(MoveError::OntoItself(mv.object.clone()));
            }
            let target = self
                .placements
                .get(destination)
                .ok_or_else(|| MoveError::UnknownBlock(destination.to_string()))?;
            if mv.to == placement.support {
                return Err(MoveError::AlreadyThere {
                    object: mv.object.clone(),
                    support: mv.to.to_string(),
                });
            }
            if !target.clear {
                return Err(MoveError::DestinationNotClear(destination.clone()));
            }
        } else if placement.support.is_table() {
            return Err(MoveError::AlreadyThere {
                object: mv.object.clone(),
                support: TABLE.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the configuration produced by `mv`, leaving `self` untouched.
    ///
    /// # Errors
    /// Returns a `MoveError` if the move is not legal here.
    pub fn apply(&self, mv: &Move) -> Result<Configuration, MoveError> {
        self.check_move(mv)?;
        Ok(self.apply_unchecked(mv))
    }

    // Callers guarantee legality; the result is always a fresh copy.
    fn apply_unchecked(&self, mv: &Move) -> Configuration {
        let mut placements = self.placements.clone();

        if let Support::Block(old) = &mv.from {
            if let Some(placement) = placements.get_mut(old) {
                placement.clear = true;
            }
        }
        if let Some(placement) = placements.get_mut(&mv.object) {
            placement.support = mv.to.clone();
        }
        if let Support::Block(new) = &mv.to {
            if let Some(placement) = placements.get_mut(new) {
                placement.clear = false;
            }
        }

        Configuration { placements }
    }

    /// Returns each tower bottom-up, ordered by its bottom block.
    pub fn towers(&self) -> Vec<Vec<Block>> {
        let mut resting_on: BTreeMap<&Block, &Block> = BTreeMap::new();
        for (block, placement) in &self.placements {
            if let Support::Block(support) = &placement.support {
                resting_on.insert(support, block);
            }
        }

        self.placements
            .iter()
            .filter(|(_, placement)| placement.support.is_table())
            .map(|(bottom, _)| {
                let mut tower = vec![bottom.clone()];
                let mut current = bottom;
                while let Some(&next) = resting_on.get(current) {
                    tower.push(next.clone());
                    current = next;
                }
                tower
            })
            .collect()
    }
}

impl fmt::Display for Configuration {
    /// Draws the towers side by side, standing on a line of `=` for the table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.placements.is_empty() {
            return writeln!(f, "(no blocks)");
        }

        let towers = self.towers();
        let width = self
            .placements
            .keys()
            .map(|block| block.name().chars().count())
            .max()
            .unwrap_or(1);
        let height = towers.iter().map(Vec::len).max().unwrap_or(0);

        for level in (0..height).rev() {
            let mut line = String::new();
            for tower in &towers {
                match tower.get(level) {
                    Some(block) => line.push_str(&format!("[{:^width$}] ", block.name())),
                    None => line.push_str(&" ".repeat(width + 3)),
                }
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        writeln!(f, "{}", "=".repeat(towers.len() * (width + 3)))
    }
}

/// Generates `count` distinct block labels: `A`..`Z`, then `A1`..`Z1`, and so on.
pub fn block_names(count: usize) -> Vec<Block> {
    (0..count)
        .map(|i| {
            let letter = (b'A' + (i % 26) as u8) as char;
            match i / 26 {
                0 => Block::new(&letter.to_string()),
                round => Block::new(&format!("{}{}", letter, round)),
            }
        })
        .collect()
}

/// A configuration together with the lineage that produced it.
///
/// Every state owns its configuration outright; children copy the parent's
/// configuration before applying their move. Lineage is a tree of shared
/// parent links and is never consulted by equality or hashing: two states
/// with the same placements are the same state however they were reached.
#[derive(Debug)]
pub struct State {
    configuration: Configuration,
    parent: Option<Rc<State>>,
    forming_move: Option<Move>,
    depth: usize,
}

impl State {
    /// Creates a root state with no parent and no forming move.
    pub fn root(configuration: Configuration) -> Self {
        State {
            configuration,
            parent: None,
            forming_move: None,
            depth: 0,
        }
    }

    /// Creates the state reached from `parent` by `mv`.
    ///
    /// # Errors
    /// Returns a `MoveError` if `mv` is illegal in `parent`'s configuration.
    pub fn child(parent: &Rc<State>, mv: Move) -> Result<State, MoveError> {
        let configuration = parent.configuration.apply(&mv)?;
        Ok(State::with_lineage(parent, mv, configuration))
    }

    fn with_lineage(parent: &Rc<State>, mv: Move, configuration: Configuration) -> State {
        State {
            configuration,
            parent: Some(Rc::clone(parent)),
            forming_move: Some(mv),
            depth: parent.depth + 1,
        }
    }

    /// Generates every child state, one per legal move, in `legal_moves` order.
    pub fn children(self: &Rc<Self>) -> Vec<State> {
        self.configuration
            .legal_moves()
            .into_iter()
            .map(|mv| {
                let configuration = self.configuration.apply_unchecked(&mv);
                State::with_lineage(self, mv, configuration)
            })
            .collect()
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn parent(&self) -> Option<&Rc<State>> {
        self.parent.as_ref()
    }

    pub fn forming_move(&self) -> Option<&Move> {
        self.forming_move.as_ref()
    }

    /// Number of moves between the root and this state.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the moves leading from the root to this state, in order.
    pub fn trace_path(&self) -> Vec<Move> {
        let mut path = Vec::with_capacity(self.depth);
        let mut current = self;
        while let (Some(parent), Some(mv)) = (current.parent.as_deref(), current.forming_move.as_ref()) {
            path.push(mv.clone());
            current = parent;
        }
        path.reverse();
        path
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.configuration == other.configuration
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.configuration.hash(state);
    }
}

impl Drop for State {
    // Unlink ancestors one at a time so that dropping a very deep lineage
    // does not recurse once per generation.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            match Rc::try_unwrap(parent) {
                Ok(mut ancestor) => next = ancestor.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// An interactive solving session with undo support.
///
/// # Examples
/// ```
/// use blocks_world_solver::engine::{Configuration, Puzzle};
/// let start = Configuration::all_on_table(["A", "B"]);
/// let mut puzzle = Puzzle::new(start.clone(), start);
/// assert!(puzzle.is_solved());
/// assert!(puzzle.process_move("A", "B").is_ok());
/// assert!(!puzzle.is_solved());
/// assert!(puzzle.undo_last_move());
/// assert!(puzzle.is_solved());
/// ```
#[derive(Clone, Debug)]
pub struct Puzzle {
    current: Configuration,
    goal: Configuration,
    history: Vec<(Configuration, Move)>,
}

impl Puzzle {
    pub fn new(initial: Configuration, goal: Configuration) -> Self {
        Puzzle {
            current: initial,
            goal,
            history: Vec::new(),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.current
    }

    pub fn goal(&self) -> &Configuration {
        &self.goal
    }

    /// Number of moves currently applied (undone moves are not counted).
    pub fn steps(&self) -> usize {
        self.history.len()
    }

    pub fn moves_made(&self) -> impl Iterator<Item = &Move> {
        self.history.iter().map(|(_, mv)| mv)
    }

    /// Moves `object` onto `destination` (a block name, or `table`).
    ///
    /// # Returns
    /// * `Ok(Move)` with the move that was applied.
    /// * `Err(MoveError)` if either name is unknown or the move is illegal;
    ///   the puzzle is left unchanged.
    pub fn process_move(&mut self, object: &str, destination: &str) -> Result<Move, MoveError> {
        let object = self
            .current
            .block(object)
            .cloned()
            .ok_or_else(|| MoveError::UnknownBlock(object.to_string()))?;
        let to = match Support::parse(destination) {
            Support::Table => Support::Table,
            Support::Block(name) => Support::Block(
                self.current
                    .block(name.name())
                    .cloned()
                    .ok_or_else(|| MoveError::UnknownBlock(name.to_string()))?,
            ),
        };
        let from = self.current.placements[&object].support.clone();

        let mv = Move { object, from, to };
        let next = self.current.apply(&mv)?;
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push((previous, mv.clone()));
        Ok(mv)
    }

    /// Reverts the last applied move. Returns `false` if there is nothing to undo.
    pub fn undo_last_move(&mut self) -> bool {
        match self.history.pop() {
            Some((previous, _)) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.current == self.goal
    }
}
