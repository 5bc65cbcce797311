//! Error types shared by the engine, the solver, and the problem reader.

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::Block;
use crate::utils::Rule;

/// A move that cannot be applied to a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("unknown block '{0}'")]
    UnknownBlock(String),
    #[error("block {0} is not clear")]
    NotClear(Block),
    #[error("destination {0} is not clear")]
    DestinationNotClear(Block),
    #[error("block {0} cannot be placed onto itself")]
    OntoItself(Block),
    #[error("block {object} already rests on {support}")]
    AlreadyThere { object: Block, support: String },
    #[error("block {object} rests on {actual}, not on {claimed}")]
    SourceMismatch {
        object: Block,
        claimed: String,
        actual: String,
    },
}

/// A configuration that breaks the stacking invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("block '{0}' is not part of the configuration")]
    UnknownBlock(String),
    #[error("block {block} rests on unknown block '{support}'")]
    UnknownSupport { block: Block, support: String },
    #[error("block {0} rests on itself")]
    SelfSupport(Block),
    #[error("blocks form a cycle through {0}")]
    Cycle(Block),
    #[error("blocks {first} and {second} both rest on {support}")]
    DoubleStack {
        support: Block,
        first: Block,
        second: Block,
    },
    #[error("block {block} has clear flag {marked}, inconsistent with the blocks above it")]
    ClearMismatch { block: Block, marked: bool },
}

/// Failure to read a problem description.
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("syntax error: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
    #[error("missing section '{0}'")]
    MissingSection(&'static str),
    #[error("predicate refers to undeclared object '{0}'")]
    UnknownObject(String),
    #[error("malformed predicate {0}")]
    MalformedPredicate(String),
    #[error("invalid {section} configuration: {source}")]
    InvalidConfiguration {
        section: &'static str,
        #[source]
        source: ConfigurationError,
    },
}

/// An unrecognised strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm '{0}'. Available: breadth, depth, best, astar")]
pub struct ParseStrategyError(pub String);
