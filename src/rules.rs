//! Rulesets and the move legality evaluator.
//!
//! A ruleset only chooses policy knobs (komi, suicide); the capture and
//! superko algorithm in [`evaluate_move`] is shared by all of them.
//!
//! Evaluation order matters: opponent groups left without liberties are
//! captured *before* the mover's own group is checked, so a stone that fills
//! its last liberty while capturing is legal rather than suicide.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::board::GamePosition;
use crate::hasher::ZobristHasher;
use crate::stone::{Stone, StoneColor};

/// The supported rulesets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameRules {
    #[default]
    Chinese,
    Japanese,
    NewZealand,
    TrompTaylor,
}

impl GameRules {
    pub const ALL: [GameRules; 4] = [
        GameRules::Chinese,
        GameRules::Japanese,
        GameRules::NewZealand,
        GameRules::TrompTaylor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GameRules::Chinese => "chinese",
            GameRules::Japanese => "japanese",
            GameRules::NewZealand => "new-zealand",
            GameRules::TrompTaylor => "tromp-taylor",
        }
    }

    /// Compensation points for White.
    pub fn default_komi(self) -> f32 {
        match self {
            GameRules::Chinese | GameRules::TrompTaylor => 7.5,
            GameRules::Japanese => 6.5,
            GameRules::NewZealand => 7.0,
        }
    }

    pub fn allows_suicide(self) -> bool {
        matches!(self, GameRules::NewZealand | GameRules::TrompTaylor)
    }
}

impl fmt::Display for GameRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameRules {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase().replace('_', "-");
        GameRules::ALL
            .into_iter()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = GameRules::ALL.iter().map(|r| r.name()).collect();
                format!("unknown rules '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// Verdict for a proposed move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveValidationResult {
    Ok,
    /// Coordinates are outside the board
    ErrorOutOfBounds,
    /// Point is not empty
    ErrorPositionOccupied,
    /// Move would be suicide (no liberties after capture resolution)
    ErrorSuicide,
    /// Move recreates a position already seen on this branch
    ErrorKoRecapture,
    /// A player has already resigned on this branch
    ErrorGameEnded,
}

impl fmt::Display for MoveValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveValidationResult::Ok => "ok",
            MoveValidationResult::ErrorOutOfBounds => "point is outside the board",
            MoveValidationResult::ErrorPositionOccupied => "point not empty",
            MoveValidationResult::ErrorSuicide => "suicide",
            MoveValidationResult::ErrorKoRecapture => "repeats an earlier position",
            MoveValidationResult::ErrorGameEnded => "game already ended",
        };
        f.write_str(text)
    }
}

/// What a legal move did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEffect {
    pub stone: Stone,
    /// Every stone removed, the mover's own included on self-capture.
    pub captures: HashSet<Stone>,
    pub state_hash: u64,
}

/// Validate a stone placement and, if legal, apply it to `position`.
///
/// `seen_before` answers whether a hash already occurred on the current
/// branch. On any rejection `position` is restored exactly as it was.
pub fn evaluate_move(
    position: &mut GamePosition,
    hasher: &ZobristHasher,
    rules: GameRules,
    current_hash: u64,
    stone: Stone,
    seen_before: impl Fn(u64) -> bool,
) -> Result<MoveEffect, MoveValidationResult> {
    let Stone { x, y, color } = stone;
    match position.get(x, y) {
        None => return Err(MoveValidationResult::ErrorOutOfBounds),
        Some(StoneColor::Empty) => {}
        Some(_) => return Err(MoveValidationResult::ErrorPositionOccupied),
    }
    debug_assert!(color.is_stone());

    position.set(x, y, color);

    let opponent = color.opponent();
    let mut captures: HashSet<Stone> = HashSet::new();
    let adjacent: Vec<(usize, usize)> = position.neighbors(x, y).collect();
    for (nx, ny) in adjacent {
        if position.get(nx, ny) == Some(opponent) && position.group_liberties(nx, ny) == 0 {
            for s in position.collect_group(nx, ny) {
                position.set(s.x, s.y, StoneColor::Empty);
                captures.insert(s);
            }
        }
    }

    if position.group_liberties(x, y) == 0 {
        if !rules.allows_suicide() {
            trace!(%stone, "rejecting suicide");
            rollback(position, stone, &captures);
            return Err(MoveValidationResult::ErrorSuicide);
        }
        for s in position.collect_group(x, y) {
            position.set(s.x, s.y, StoneColor::Empty);
            captures.insert(s);
        }
    }

    // The placed stone and its self-capture cancel out, as they should.
    let state_hash = hasher.incremental_hash(current_hash, std::iter::once(&stone).chain(captures.iter()));
    if seen_before(state_hash) {
        trace!(%stone, state_hash, "rejecting repeated position");
        rollback(position, stone, &captures);
        return Err(MoveValidationResult::ErrorKoRecapture);
    }

    trace!(%stone, captured = captures.len(), state_hash, "move accepted");
    Ok(MoveEffect {
        stone,
        captures,
        state_hash,
    })
}

/// Undo a tentative placement. On self-capture the placed stone is also in
/// `captures`, so it must be cleared after the captures are restored.
fn rollback(position: &mut GamePosition, placed: Stone, captures: &HashSet<Stone>) {
    for s in captures {
        position.set(s.x, s.y, s.color);
    }
    position.set(placed.x, placed.y, StoneColor::Empty);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(width: usize, black: &[(usize, usize)], white: &[(usize, usize)]) -> (GamePosition, ZobristHasher, u64) {
        let mut pos = GamePosition::new(width, width);
        for &(x, y) in black {
            pos.set(x, y, StoneColor::Black);
        }
        for &(x, y) in white {
            pos.set(x, y, StoneColor::White);
        }
        let hasher = ZobristHasher::with_seed(width, width, 1).unwrap();
        let hash = hasher.full_hash(&pos);
        (pos, hasher, hash)
    }

    fn never(_: u64) -> bool {
        false
    }

    #[test]
    fn test_rules_knobs() {
        assert!(!GameRules::Japanese.allows_suicide());
        assert!(!GameRules::Chinese.allows_suicide());
        assert!(GameRules::NewZealand.allows_suicide());
        assert!(GameRules::TrompTaylor.allows_suicide());
        assert_eq!(GameRules::Japanese.default_komi(), 6.5);
    }

    #[test]
    fn test_rules_from_str() {
        assert_eq!("Japanese".parse::<GameRules>(), Ok(GameRules::Japanese));
        assert_eq!("tromp_taylor".parse::<GameRules>(), Ok(GameRules::TrompTaylor));
        for r in GameRules::ALL {
            assert_eq!(r.name().parse::<GameRules>(), Ok(r));
        }
        assert!("ing".parse::<GameRules>().is_err());
    }

    #[test]
    fn test_out_of_bounds_and_occupied() {
        let (mut pos, h, hash) = setup(9, &[(4, 4)], &[]);
        let before = pos.clone();
        let r = evaluate_move(&mut pos, &h, GameRules::Japanese, hash, Stone::new(9, 0, StoneColor::White), never);
        assert_eq!(r, Err(MoveValidationResult::ErrorOutOfBounds));
        let r = evaluate_move(&mut pos, &h, GameRules::Japanese, hash, Stone::new(4, 4, StoneColor::White), never);
        assert_eq!(r, Err(MoveValidationResult::ErrorPositionOccupied));
        assert_eq!(pos, before);
    }

    #[test]
    fn test_simple_placement() {
        let (mut pos, h, hash) = setup(9, &[], &[]);
        let stone = Stone::new(2, 2, StoneColor::Black);
        let effect = evaluate_move(&mut pos, &h, GameRules::Japanese, hash, stone, never).unwrap();
        assert!(effect.captures.is_empty());
        assert_eq!(pos.get(2, 2), Some(StoneColor::Black));
        assert_eq!(effect.state_hash, h.full_hash(&pos));
    }

    #[test]
    fn test_capture_single_stone() {
        // White at (1,1) surrounded on three sides by Black.
        let (mut pos, h, hash) = setup(9, &[(0, 1), (1, 0), (2, 1)], &[(1, 1)]);
        let stone = Stone::new(1, 2, StoneColor::Black);
        let effect = evaluate_move(&mut pos, &h, GameRules::Japanese, hash, stone, never).unwrap();
        let expected: HashSet<Stone> = [Stone::new(1, 1, StoneColor::White)].into_iter().collect();
        assert_eq!(effect.captures, expected);
        assert_eq!(pos.get(1, 1), Some(StoneColor::Empty));
        assert_eq!(effect.state_hash, h.full_hash(&pos));
    }

    #[test]
    fn test_capture_two_groups_at_once() {
        // Two separate white stones share their last liberty at (2,0).
        //   B O . O B
        //   . B . B .
        let (mut pos, h, hash) = setup(5, &[(0, 0), (1, 1), (3, 1), (4, 0)], &[(1, 0), (3, 0)]);
        let stone = Stone::new(2, 0, StoneColor::Black);
        let effect = evaluate_move(&mut pos, &h, GameRules::Japanese, hash, stone, never).unwrap();
        assert_eq!(effect.captures.len(), 2);
        assert!(effect.captures.contains(&Stone::new(1, 0, StoneColor::White)));
        assert!(effect.captures.contains(&Stone::new(3, 0, StoneColor::White)));
        assert_eq!(effect.state_hash, h.full_hash(&pos));
    }

    #[test]
    fn test_capture_before_suicide_check() {
        // Black fills its own last liberty at (0,0) but captures White (1,0) first.
        //   . O B
        //   O B .
        //   B . .
        let (mut pos, h, hash) = setup(3, &[(2, 0), (1, 1), (0, 2)], &[(1, 0), (0, 1)]);
        let stone = Stone::new(0, 0, StoneColor::Black);
        let effect = evaluate_move(&mut pos, &h, GameRules::Japanese, hash, stone, never).unwrap();
        let expected: HashSet<Stone> =
            [Stone::new(1, 0, StoneColor::White), Stone::new(0, 1, StoneColor::White)].into_iter().collect();
        assert_eq!(effect.captures, expected);
        assert_eq!(pos.get(0, 0), Some(StoneColor::Black));
        assert_eq!(effect.state_hash, h.full_hash(&pos));
    }

    #[test]
    fn test_suicide_rejected_and_rolled_back() {
        let (mut pos, h, hash) = setup(9, &[(1, 0), (0, 1)], &[]);
        let before = pos.clone();
        let r = evaluate_move(&mut pos, &h, GameRules::Japanese, hash, Stone::new(0, 0, StoneColor::White), never);
        assert_eq!(r, Err(MoveValidationResult::ErrorSuicide));
        assert_eq!(pos, before);
    }

    #[test]
    fn test_suicide_allowed_self_captures() {
        // White group (0,0)-(1,0) with one liberty at (2,0); White fills it.
        let (mut pos, h, hash) = setup(9, &[(0, 1), (1, 1), (2, 1), (3, 0)], &[(0, 0), (1, 0)]);
        let stone = Stone::new(2, 0, StoneColor::White);
        let effect = evaluate_move(&mut pos, &h, GameRules::NewZealand, hash, stone, never).unwrap();
        assert_eq!(effect.captures.len(), 3);
        assert!(effect.captures.contains(&stone));
        for x in 0..3 {
            assert_eq!(pos.get(x, 0), Some(StoneColor::Empty));
        }
        assert_eq!(effect.state_hash, h.full_hash(&pos));
    }

    #[test]
    fn test_single_stone_suicide_repeats_position() {
        // With suicide allowed, a lone self-capture leaves the board unchanged.
        let (mut pos, h, hash) = setup(9, &[(1, 0), (0, 1)], &[]);
        let before = pos.clone();
        let r = evaluate_move(&mut pos, &h, GameRules::TrompTaylor, hash, Stone::new(0, 0, StoneColor::White), |seen| {
            seen == hash
        });
        assert_eq!(r, Err(MoveValidationResult::ErrorKoRecapture));
        assert_eq!(pos, before);
    }

    #[test]
    fn test_repetition_rolls_back_captures() {
        let (mut pos, h, hash) = setup(9, &[(0, 1), (1, 0), (2, 1)], &[(1, 1)]);
        let before = pos.clone();
        let r = evaluate_move(&mut pos, &h, GameRules::Japanese, hash, Stone::new(1, 2, StoneColor::Black), |_| true);
        assert_eq!(r, Err(MoveValidationResult::ErrorKoRecapture));
        assert_eq!(pos, before);
    }
}
