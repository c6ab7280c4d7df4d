//! Fail-fast chaining of moves on a [`GoGameModel`].
//!
//! ```
//! use goban_core::game::GoGameModel;
//! use goban_core::rules::GameRules;
//! use goban_core::sequence::GoMoveSequence;
//!
//! let mut game = GoGameModel::new(9, 9, GameRules::Japanese).unwrap();
//! GoMoveSequence::new(&mut game)
//!     .play_move(2, 2)?
//!     .play_move(6, 6)?
//!     .pass()
//!     .play_move(3, 3)?;
//! assert_eq!(game.distance_to_root(), 4);
//! # Ok::<(), goban_core::error::GoError>(())
//! ```

use crate::error::{GoError, Result};
use crate::game::GoGameModel;
use crate::update::Annotation;

/// Plays a sequence of moves, stopping at the first one that is not legal.
pub struct GoMoveSequence<'a> {
    game: &'a mut GoGameModel,
}

impl<'a> GoMoveSequence<'a> {
    pub fn new(game: &'a mut GoGameModel) -> Self {
        Self { game }
    }

    /// Like [`GoGameModel::play_move`], but any verdict other than OK becomes
    /// [`GoError::RulesViolation`], tagged with the depth of the node the move
    /// was attempted from.
    pub fn play_move(&mut self, x: usize, y: usize) -> Result<&mut Self> {
        match self.game.play_move(x, y) {
            Ok(_) => Ok(self),
            Err(result) => Err(GoError::RulesViolation {
                x,
                y,
                depth: self.game.distance_to_root(),
                result,
            }),
        }
    }

    pub fn annotate(&mut self, annotation: Annotation) -> &mut Self {
        self.game.add_annotation_on_this_move(annotation);
        self
    }

    pub fn pass(&mut self) -> &mut Self {
        self.game.play_pass();
        self
    }

    pub fn resign(&mut self) -> &mut Self {
        self.game.play_resign();
        self
    }

    pub fn game(&self) -> &GoGameModel {
        self.game
    }
}
