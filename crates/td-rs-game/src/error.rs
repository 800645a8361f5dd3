//! Game-surface error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown creature kind: {0}")]
    UnknownCreature(String),

    #[error("unknown spawner: {0}")]
    UnknownSpawner(u64),
}
