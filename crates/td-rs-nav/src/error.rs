//! Navigation error types.

use thiserror::Error;

use crate::graph::TilePos;

#[derive(Debug, Error)]
pub enum NavError {
    /// Extracting from an empty frontier is a caller bug, never a soft failure.
    #[error("extract_min on an empty frontier")]
    EmptyFrontier,

    /// Expected and recoverable: the goal cannot be reached from the start.
    #[error("no path from {from:?} to {to:?}")]
    NoPath { from: TilePos, to: TilePos },
}
