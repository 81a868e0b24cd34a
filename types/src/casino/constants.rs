/// Fixed-point basis used by every multiplier and ratio (1.0x = 10_000).
///
/// Matches the settlement layer's whole-unit scaling constant.
pub const BPS_PER_WHOLE: u64 = 10_000;

/// Default tolerance used when comparing realized RTP to a target.
pub const DEFAULT_RTP_TOLERANCE: f64 = 0.01;

/// Upper bound on coins for binomial games (keeps `2^n` exact in `u128`).
pub const MAX_BINOMIAL_TRIALS: u8 = 64;

/// Upper bound on reveal grids (keeps falling factorials exact in `u128`).
pub const MAX_GRID_SIZE: u8 = 32;

/// Smallest resolution accepted for bucketed games.
pub const MIN_BUCKET_RESOLUTION: u32 = 100;

/// Largest resolution accepted for bucketed games.
pub const MAX_BUCKET_RESOLUTION: u32 = 1_000_000;

/// Longest bet array any outcome shape may declare.
pub const MAX_BET_ARRAY_LENGTH: usize = MAX_BUCKET_RESOLUTION as usize;

// Game profile defaults.
pub const DICE_OUTCOMES: u32 = 100;
pub const HILO_RANKS: u32 = 13;
pub const MAGIC8BALL_OUTCOMES: u32 = 2;
pub const FLIP_MAX_COINS: u8 = 10;
pub const MINES_GRID_SIZE: u8 = 25;
pub const KENO_MAX_SELECTION: u8 = 10;
pub const KENO_POOL_SIZE: u8 = 40;
pub const KENO_DRAW_COUNT: u8 = 10;
pub const LIMBO_RESOLUTION: u32 = 10_000;
pub const CRASH_RESOLUTION: u32 = 10_000;
pub const PLINKO_NORMAL_ROWS: u8 = 8;
pub const PLINKO_DEGEN_ROWS: u8 = 10;
pub const ROULETTE_POCKETS: u32 = 37;
