//! State updates: what changed at each tree transition, plus board markup.

use std::collections::HashSet;

use crate::stone::Stone;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateUpdateKind {
    Root,
    MovePlayed,
    Pass,
    Resign,
}

/// Board markup attached to a move.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Annotation {
    Triangle { x: usize, y: usize },
    Circle { x: usize, y: usize },
    Square { x: usize, y: usize },
    Cross { x: usize, y: usize },
    Label { x: usize, y: usize, text: String },
    Arrow { from: (usize, usize), to: (usize, usize) },
    Line { from: (usize, usize), to: (usize, usize) },
}

impl Annotation {
    /// Whether this markup touches the intersection `(x, y)`.
    pub fn occupies(&self, x: usize, y: usize) -> bool {
        match *self {
            Annotation::Triangle { x: ax, y: ay }
            | Annotation::Circle { x: ax, y: ay }
            | Annotation::Square { x: ax, y: ay }
            | Annotation::Cross { x: ax, y: ay }
            | Annotation::Label { x: ax, y: ay, .. } => (ax, ay) == (x, y),
            Annotation::Arrow { from, to } | Annotation::Line { from, to } => from == (x, y) || to == (x, y),
        }
    }
}

/// An immutable record of one tree transition.
///
/// Built once per node through the `for_*` constructors; there are no setters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStateUpdate {
    kind: StateUpdateKind,
    primary_move: Option<Stone>,
    captures: HashSet<Stone>,
    state_hash: u64,
    removed_annotations: HashSet<Annotation>,
}

impl GameStateUpdate {
    pub fn for_root(empty_position_hash: u64) -> Self {
        Self::new(StateUpdateKind::Root, None, HashSet::new(), empty_position_hash, HashSet::new())
    }

    pub fn for_move(primary_move: Stone, captures: HashSet<Stone>, state_hash: u64) -> Self {
        Self::new(StateUpdateKind::MovePlayed, Some(primary_move), captures, state_hash, HashSet::new())
    }

    /// A move that also invalidates markup carried over from the previous node.
    pub fn for_move_with_removed_annotations(
        primary_move: Stone,
        captures: HashSet<Stone>,
        state_hash: u64,
        removed_annotations: HashSet<Annotation>,
    ) -> Self {
        Self::new(StateUpdateKind::MovePlayed, Some(primary_move), captures, state_hash, removed_annotations)
    }

    pub fn for_pass(current_position_hash: u64) -> Self {
        Self::new(StateUpdateKind::Pass, None, HashSet::new(), current_position_hash, HashSet::new())
    }

    pub fn for_resign(current_position_hash: u64) -> Self {
        Self::new(StateUpdateKind::Resign, None, HashSet::new(), current_position_hash, HashSet::new())
    }

    fn new(
        kind: StateUpdateKind,
        primary_move: Option<Stone>,
        captures: HashSet<Stone>,
        state_hash: u64,
        removed_annotations: HashSet<Annotation>,
    ) -> Self {
        Self {
            kind,
            primary_move,
            captures,
            state_hash,
            removed_annotations,
        }
    }

    pub fn kind(&self) -> StateUpdateKind {
        self.kind
    }

    /// The stone placed by this transition. `None` for root, pass and resign.
    pub fn primary_move(&self) -> Option<Stone> {
        self.primary_move
    }

    /// Stones removed from the board, with the color they had.
    pub fn captures(&self) -> &HashSet<Stone> {
        &self.captures
    }

    /// Hash of the position after this transition.
    pub fn state_hash(&self) -> u64 {
        self.state_hash
    }

    pub fn removed_annotations(&self) -> &HashSet<Annotation> {
        &self.removed_annotations
    }
}

/// Node payload of a game tree: the state update and markup on that move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoMove {
    update: GameStateUpdate,
    annotations: Vec<Annotation>,
}

impl GoMove {
    pub fn new(update: GameStateUpdate) -> Self {
        Self {
            update,
            annotations: Vec::new(),
        }
    }

    pub fn update(&self) -> &GameStateUpdate {
        &self.update
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Add markup. An identical annotation already present is not duplicated.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
    }

    /// Returns `true` if the annotation was present.
    pub fn remove_annotation(&mut self, annotation: &Annotation) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a != annotation);
        self.annotations.len() != before
    }
}
