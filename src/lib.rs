//! # Blocks World Solver Library
//!
//! This library provides the model of the classic blocks world (labelled
//! blocks stacked on each other or on a table) and a state-space search that
//! finds a sequence of single-block moves turning a start arrangement into
//! a goal arrangement.
//!
//! It is used by three binaries:
//! - `ai_solver`: Reads a BLOCKS problem file, runs the chosen strategy under
//!   a timeout, and writes the plan as a numbered move list.
//! - `human_player`: Lets you solve a problem interactively, with undo and hints.
//! - `strategy_evaluator`: Compares all strategies on seeded random instances.
//!
//! ## Modules
//! - `engine`: Blocks, configurations, legal move generation, search states
//!   with their lineage, and the interactive `Puzzle` session.
//! - `heuristics`: Distance-to-goal estimates used by best-first and A* search.
//! - `solver`: The search loop, its frontiers (FIFO, LIFO, scored), timeout
//!   handling, and the tagged `SearchOutcome`.
//! - `utils`: Problem-file parsing and solution writing.
//! - `error`: Error types.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;
