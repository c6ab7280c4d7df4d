//! Constants for board dimensions, hashing and rules defaults.
//!
//! # Board Size Configuration
//!
//! The default board size is controlled by Cargo features:
//! - `board9x9` (default): 9x9 board
//! - `board13x13`: 13x13 board
//! - `board19x19`: 19x19 board
//!
//! The game model accepts any size at runtime; the feature only decides
//! what [`DEFAULT_BOARD_SIZE`] is.
//!
//! ```sh
//! cargo build                                               # 9x9 (default)
//! cargo build --no-default-features --features board19x19   # 19x19
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard Go sizes are 9, 13, or 19.
#[cfg(feature = "board9x9")]
pub const DEFAULT_BOARD_SIZE: usize = 9;

#[cfg(feature = "board13x13")]
pub const DEFAULT_BOARD_SIZE: usize = 13;

#[cfg(feature = "board19x19")]
pub const DEFAULT_BOARD_SIZE: usize = 19;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(any(
    all(feature = "board9x9", feature = "board13x13"),
    all(feature = "board9x9", feature = "board19x19"),
    all(feature = "board13x13", feature = "board19x19"),
))]
compile_error!("Enable only one of 'board9x9', 'board13x13' or 'board19x19'");

#[cfg(not(any(feature = "board9x9", feature = "board13x13", feature = "board19x19")))]
compile_error!("Must enable exactly one board size feature: 'board9x9', 'board13x13' or 'board19x19'");

/// Largest accepted board dimension. Vertex letters (A-Z without I) run out past this.
pub const MAX_BOARD_SIZE: usize = 25;

// =============================================================================
// Hashing
// =============================================================================

/// How many times fingerprint generation may redraw a duplicate value before
/// giving up on the random source.
pub const HASH_COLLISION_RETRIES: u32 = 10;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Orthogonal neighbor offsets as (dx, dy).
/// Order: North, East, South, West
pub const DELTA: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
