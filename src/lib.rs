//! Goban-Core: the rules and state-tracking core of a Go engine.
//!
//! This crate records game history in a branching move tree, validates and
//! applies moves (captures, suicide, positional superko) and fingerprints
//! positions with incremental Zobrist hashing.
//!
//! ## Modules
//!
//! - [`constants`] - Default board size and tuning constants
//! - [`stone`] - Stone colors and intersection tuples
//! - [`board`] - Flat board storage, flood fills, vertex notation
//! - [`hasher`] - Zobrist position hashing
//! - [`tree`] - Generic arena-backed game tree
//! - [`update`] - Immutable state updates and board annotations
//! - [`rules`] - Rulesets and the move evaluator
//! - [`game`] - The game model tying it all together
//! - [`sequence`] - Fail-fast move chaining
//!
//! ## Example
//!
//! ```
//! use goban_core::game::GoGameModel;
//! use goban_core::rules::GameRules;
//! use goban_core::stone::StoneColor;
//!
//! let mut game = GoGameModel::new(9, 9, GameRules::Chinese).unwrap();
//! game.play_move(2, 2).unwrap();
//! assert_eq!(game.current_position().get(2, 2), Some(StoneColor::Black));
//! assert_eq!(game.next_turn_color(), StoneColor::White);
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod hasher;
pub mod rules;
pub mod sequence;
pub mod stone;
pub mod tree;
pub mod update;
