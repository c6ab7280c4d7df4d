//! Error types for the crate.

use thiserror::Error;

use crate::rules::MoveValidationResult;

/// Structural misuse of a [`GameTree`](crate::tree::GameTree).
///
/// These are caller errors; the tree is left untouched whenever one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node does not belong to this tree's arena")]
    ForeignNode,

    #[error("parent node is not a member of this tree")]
    ParentNotMember,

    #[error("child node already has an active parent")]
    ChildHasParent,

    #[error("child node is a root node")]
    ChildIsRoot,

    #[error("a node cannot be a parent of itself")]
    SelfParent,

    #[error("node is not a member of this tree")]
    NotMember,

    #[error("the root node cannot be removed from its own tree")]
    RootRemoval,
}

/// Main error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GoError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("cannot play move ({x}, {y}) at node position {depth}: {result}")]
    RulesViolation {
        x: usize,
        y: usize,
        depth: usize,
        result: MoveValidationResult,
    },

    #[error("too many collisions generating unique state hash ({retries} retries)")]
    HashGeneration { retries: u32 },

    #[error("invalid board size {width}x{height} (must be 1..={max})")]
    InvalidBoardSize {
        width: usize,
        height: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, GoError>;
