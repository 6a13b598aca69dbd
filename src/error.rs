//! Error types for loading profiles, progression records and shop actions.
//!
//! The simulation itself never fails; errors only arise at the configuration,
//! persistence and shop boundary, where text becomes typed data or a
//! purchase is refused.

/// Main error type for the crate's public loading APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Unknown shop item: {0}")]
    UnknownItem(String),

    #[error("Shop item is still locked: {0}")]
    ItemLocked(String),

    #[error("Shop item already owned: {0}")]
    AlreadyOwned(String),

    #[error("Shop item not owned: {0}")]
    NotOwned(String),

    #[error("Not enough coins: costs {price}, wallet holds {wallet}")]
    InsufficientCoins { price: u64, wallet: u64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
