//! The game model: a move tree plus the position at the current node.
//!
//! All state changes go through [`GoGameModel::play_move`], [`play_pass`],
//! [`play_resign`] and the navigation methods, which keep the current
//! position and running hash in step with the current node.
//!
//! [`play_pass`]: GoGameModel::play_pass
//! [`play_resign`]: GoGameModel::play_resign

use std::collections::HashSet;

use tracing::debug;

use crate::board::GamePosition;
use crate::constants::MAX_BOARD_SIZE;
use crate::error::{GoError, Result, TreeError};
use crate::hasher::ZobristHasher;
use crate::rules::{GameRules, MoveValidationResult, evaluate_move};
use crate::stone::{Stone, StoneColor};
use crate::tree::{GameTree, NodeId};
use crate::update::{Annotation, GameStateUpdate, GoMove, StateUpdateKind};

pub struct GoGameModel {
    tree: GameTree<GoMove>,
    current: NodeId,
    position: GamePosition,
    hasher: ZobristHasher,
    rules: GameRules,
    komi: f32,
}

impl GoGameModel {
    /// Start a game on an empty board with a freshly seeded hasher.
    pub fn new(width: usize, height: usize, rules: GameRules) -> Result<Self> {
        check_board_size(width, height)?;
        let hasher = ZobristHasher::new(width, height)?;
        Ok(Self::with_hasher(width, height, rules, hasher))
    }

    /// Start a game with a reproducible hash table.
    pub fn with_seed(width: usize, height: usize, rules: GameRules, seed: u64) -> Result<Self> {
        check_board_size(width, height)?;
        let hasher = ZobristHasher::with_seed(width, height, seed)?;
        Ok(Self::with_hasher(width, height, rules, hasher))
    }

    fn with_hasher(width: usize, height: usize, rules: GameRules, hasher: ZobristHasher) -> Self {
        let root = GoMove::new(GameStateUpdate::for_root(hasher.hash_of_empty_board()));
        let tree = GameTree::new(root);
        Self {
            current: tree.root(),
            tree,
            position: GamePosition::new(width, height),
            hasher,
            rules,
            komi: rules.default_komi(),
        }
    }

    // =========================================================================
    // Move submission
    // =========================================================================

    /// Play a stone for the side to move at `(x, y)`.
    ///
    /// On success the new node becomes the current move and its id is
    /// returned. If the same stone was already played from this node, that
    /// existing child is reused. On any other verdict nothing changes.
    pub fn play_move(&mut self, x: usize, y: usize) -> std::result::Result<NodeId, MoveValidationResult> {
        if self.has_resigned() {
            return Err(MoveValidationResult::ErrorGameEnded);
        }
        let stone = Stone::new(x, y, self.next_turn_color());

        if let Some(existing) = self.find_continuation(stone) {
            self.apply_forward(existing);
            debug!(%stone, depth = self.distance_to_root(), "followed existing variation");
            return Ok(existing);
        }

        // Positions on this branch, current one included.
        let history: HashSet<u64> = self
            .tree
            .path_to_root(self.current)
            .filter_map(|id| self.tree.data(id))
            .map(|mv| mv.update().state_hash())
            .collect();
        let current_hash = self.current_hash();

        let effect = evaluate_move(
            &mut self.position,
            &self.hasher,
            self.rules,
            current_hash,
            stone,
            |hash| history.contains(&hash),
        )
        .inspect_err(|result| debug!(%stone, %result, "move rejected"))?;

        let removed: HashSet<Annotation> = self
            .annotations_on_this_move()
            .iter()
            .filter(|a| {
                a.occupies(stone.x, stone.y)
                    || effect.captures.iter().any(|c| a.occupies(c.x, c.y))
            })
            .cloned()
            .collect();
        let update =
            GameStateUpdate::for_move_with_removed_annotations(stone, effect.captures, effect.state_hash, removed);
        let node = self.append_update(update);
        debug!(
            %stone,
            captured = self.current_update().captures().len(),
            depth = self.distance_to_root(),
            "move played"
        );
        Ok(node)
    }

    /// Pass the turn. Always succeeds and leaves the board unchanged.
    pub fn play_pass(&mut self) -> NodeId {
        let node = self.append_update(GameStateUpdate::for_pass(self.current_hash()));
        debug!(depth = self.distance_to_root(), "pass");
        node
    }

    /// Resign. Always succeeds; further stones on this branch are rejected.
    pub fn play_resign(&mut self) -> NodeId {
        let node = self.append_update(GameStateUpdate::for_resign(self.current_hash()));
        debug!(depth = self.distance_to_root(), "resign");
        node
    }

    /// Attach markup to the current node. Game state is unaffected.
    pub fn add_annotation_on_this_move(&mut self, annotation: Annotation) {
        if let Some(mv) = self.tree.data_mut(self.current) {
            mv.add_annotation(annotation);
        }
    }

    pub fn remove_annotation_on_this_move(&mut self, annotation: &Annotation) -> bool {
        self.tree
            .data_mut(self.current)
            .is_some_and(|mv| mv.remove_annotation(annotation))
    }

    pub fn annotations_on_this_move(&self) -> &[Annotation] {
        self.current_data().annotations()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Step back to the parent node. Returns `false` at the root.
    pub fn to_previous_move(&mut self) -> bool {
        match self.tree.parent(self.current) {
            Some(parent) => {
                self.set_current_unchecked(parent);
                true
            }
            None => false,
        }
    }

    /// Step forward into the given variation of the current node (0 is the
    /// main line). Returns `false` if there is no such child.
    pub fn to_next_move(&mut self, variation: usize) -> bool {
        match self.tree.children(self.current).get(variation).copied() {
            Some(child) => {
                self.apply_forward(child);
                true
            }
            None => false,
        }
    }

    /// Jump to any node of this game's tree.
    pub fn set_current_move(&mut self, node: NodeId) -> Result<()> {
        if !self.tree.is_member(node) {
            return Err(TreeError::NotMember.into());
        }
        self.set_current_unchecked(node);
        Ok(())
    }

    /// Rebuild the position by replaying every update from the root.
    fn set_current_unchecked(&mut self, node: NodeId) {
        let mut position = GamePosition::new(self.position.width(), self.position.height());
        for id in self.tree.path_from_root(node) {
            if let Some(mv) = self.tree.data(id) {
                apply_update(&mut position, mv.update());
            }
        }
        self.position = position;
        self.current = node;
        debug_assert_eq!(self.hasher.full_hash(&self.position), self.current_hash());
    }

    /// Move to a direct child of the current node.
    fn apply_forward(&mut self, child: NodeId) {
        if let Some(mv) = self.tree.data(child) {
            apply_update(&mut self.position, mv.update());
        }
        self.current = child;
    }

    fn find_continuation(&self, stone: Stone) -> Option<NodeId> {
        self.tree
            .children(self.current)
            .iter()
            .copied()
            .find(|&id| self.tree.data(id).and_then(|mv| mv.update().primary_move()) == Some(stone))
    }

    /// Whether a resignation lies on the path from the root to the current node.
    fn has_resigned(&self) -> bool {
        self.tree
            .path_to_root(self.current)
            .filter_map(|id| self.tree.data(id))
            .any(|mv| mv.update().kind() == StateUpdateKind::Resign)
    }

    fn append_update(&mut self, update: GameStateUpdate) -> NodeId {
        let node = self.tree.create_node(GoMove::new(update));
        // The current node is always a member and the new node is fresh.
        self.tree
            .append(self.current, node)
            .unwrap_or_else(|e| unreachable!("appending a fresh node failed: {e}"));
        self.current = node;
        node
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn tree(&self) -> &GameTree<GoMove> {
        &self.tree
    }

    pub fn current_move(&self) -> NodeId {
        self.current
    }

    fn current_data(&self) -> &GoMove {
        // `current` is only ever set to member nodes of our own tree.
        self.tree
            .data(self.current)
            .unwrap_or_else(|| unreachable!("current node belongs to this tree"))
    }

    pub fn current_update(&self) -> &GameStateUpdate {
        self.current_data().update()
    }

    pub fn current_position(&self) -> &GamePosition {
        &self.position
    }

    pub fn current_hash(&self) -> u64 {
        self.current_update().state_hash()
    }

    pub fn distance_to_root(&self) -> usize {
        self.tree.depth(self.current).unwrap_or(0)
    }

    /// Black moves at even distances from the root, White at odd ones.
    pub fn next_turn_color(&self) -> StoneColor {
        if self.distance_to_root() % 2 == 0 {
            StoneColor::Black
        } else {
            StoneColor::White
        }
    }

    pub fn hasher(&self) -> &ZobristHasher {
        &self.hasher
    }

    pub fn rules(&self) -> GameRules {
        self.rules
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.komi = komi;
    }

    pub fn board_width(&self) -> usize {
        self.position.width()
    }

    pub fn board_height(&self) -> usize {
        self.position.height()
    }
}

fn check_board_size(width: usize, height: usize) -> Result<()> {
    let ok = |n: usize| (1..=MAX_BOARD_SIZE).contains(&n);
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(GoError::InvalidBoardSize {
            width,
            height,
            max: MAX_BOARD_SIZE,
        })
    }
}

fn apply_update(position: &mut GamePosition, update: &GameStateUpdate) {
    if let Some(stone) = update.primary_move() {
        position.set(stone.x, stone.y, stone.color);
    }
    for captured in update.captures() {
        position.set(captured.x, captured.y, StoneColor::Empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(rules: GameRules) -> GoGameModel {
        GoGameModel::with_seed(9, 9, rules, 3).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = model(GameRules::Chinese);
        assert_eq!(game.distance_to_root(), 0);
        assert_eq!(game.current_update().kind(), StateUpdateKind::Root);
        assert_eq!(game.current_hash(), game.hasher().hash_of_empty_board());
        assert_eq!(game.next_turn_color(), StoneColor::Black);
        assert_eq!(game.komi(), 7.5);
        assert!(game.current_position().is_empty_board());
    }

    #[test]
    fn test_invalid_board_size() {
        assert!(matches!(
            GoGameModel::new(0, 9, GameRules::Chinese),
            Err(GoError::InvalidBoardSize { .. })
        ));
        assert!(GoGameModel::new(26, 26, GameRules::Chinese).is_err());
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = model(GameRules::Chinese);
        game.play_move(0, 0).unwrap();
        assert_eq!(game.next_turn_color(), StoneColor::White);
        game.play_pass();
        assert_eq!(game.next_turn_color(), StoneColor::Black);
        assert_eq!(game.current_update().kind(), StateUpdateKind::Pass);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut game = model(GameRules::Chinese);
        let first = game.play_move(4, 4).unwrap();
        let position = game.current_position().clone();
        assert_eq!(game.play_move(4, 4), Err(MoveValidationResult::ErrorPositionOccupied));
        assert_eq!(game.play_move(12, 0), Err(MoveValidationResult::ErrorOutOfBounds));
        assert_eq!(game.current_move(), first);
        assert_eq!(game.current_position(), &position);
        assert!(game.tree().children(first).is_empty());
    }

    #[test]
    fn test_pass_keeps_hash() {
        let mut game = model(GameRules::Chinese);
        game.play_move(2, 2).unwrap();
        let hash = game.current_hash();
        game.play_pass();
        assert_eq!(game.current_hash(), hash);
    }

    #[test]
    fn test_no_moves_after_resign() {
        let mut game = model(GameRules::Chinese);
        game.play_move(2, 2).unwrap();
        game.play_resign();
        assert_eq!(game.play_move(3, 3), Err(MoveValidationResult::ErrorGameEnded));
        game.play_pass();
        assert_eq!(game.play_move(3, 3), Err(MoveValidationResult::ErrorGameEnded));

        // Branching off before the resignation is a live game again.
        game.to_previous_move();
        game.to_previous_move();
        assert!(game.play_move(3, 3).is_ok());
    }

    #[test]
    fn test_navigation_rebuilds_position() {
        let mut game = model(GameRules::Chinese);
        game.play_move(0, 1).unwrap();
        game.play_move(0, 0).unwrap();
        let capture = game.play_move(1, 0).unwrap();
        assert_eq!(game.current_position().get(0, 0), Some(StoneColor::Empty));

        assert!(game.to_previous_move());
        assert_eq!(game.current_position().get(0, 0), Some(StoneColor::White));
        assert_eq!(game.current_position().get(1, 0), Some(StoneColor::Empty));
        assert_eq!(game.current_hash(), game.hasher().full_hash(game.current_position()));

        assert!(game.to_next_move(0));
        assert_eq!(game.current_move(), capture);
        assert_eq!(game.current_position().get(0, 0), Some(StoneColor::Empty));
        assert_eq!(game.current_hash(), game.hasher().full_hash(game.current_position()));

        let root = game.tree().root();
        game.set_current_move(root).unwrap();
        assert!(game.current_position().is_empty_board());
        assert!(!game.to_previous_move());
        assert!(!game.to_next_move(5));
    }

    #[test]
    fn test_replaying_existing_move_reuses_node() {
        let mut game = model(GameRules::Chinese);
        let a = game.play_move(3, 3).unwrap();
        game.to_previous_move();
        let again = game.play_move(3, 3).unwrap();
        assert_eq!(a, again);
        assert_eq!(game.tree().children(game.tree().root()).len(), 1);

        game.to_previous_move();
        let other = game.play_move(5, 5).unwrap();
        assert_ne!(other, a);
        assert_eq!(game.tree().children(game.tree().root()), &[a, other]);
    }

    #[test]
    fn test_set_current_move_rejects_foreign_nodes() {
        let mut game = model(GameRules::Chinese);
        let other = model(GameRules::Chinese);
        assert!(game.set_current_move(other.tree().root()).is_err());
    }

    #[test]
    fn test_annotations() {
        let mut game = model(GameRules::Chinese);
        game.play_move(2, 2).unwrap();
        let tri = Annotation::Triangle { x: 2, y: 2 };
        let hash = game.current_hash();
        game.add_annotation_on_this_move(tri.clone());
        assert_eq!(game.annotations_on_this_move(), &[tri.clone()]);
        assert_eq!(game.current_hash(), hash);
        assert!(game.remove_annotation_on_this_move(&tri));
        assert!(game.annotations_on_this_move().is_empty());
    }

    #[test]
    fn test_move_records_invalidated_annotations() {
        let mut game = model(GameRules::Chinese);
        game.play_move(2, 2).unwrap();
        game.add_annotation_on_this_move(Annotation::Circle { x: 3, y: 3 });
        game.add_annotation_on_this_move(Annotation::Circle { x: 5, y: 5 });
        game.play_move(3, 3).unwrap();
        let removed = game.current_update().removed_annotations();
        assert_eq!(removed.len(), 1);
        assert!(removed.contains(&Annotation::Circle { x: 3, y: 3 }));
    }
}
