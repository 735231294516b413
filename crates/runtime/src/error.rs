//! Error types surfaced by the runtime.

use battle_core::BattleError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("battle stopped by the host after turn {turn}")]
    Stopped { turn: u64 },
}
