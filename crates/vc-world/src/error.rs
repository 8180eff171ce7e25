//! World error type.

use thiserror::Error;

use vc_core::{AgentId, BlockPos};

/// Errors produced by direct `GridWorld` manipulation.
///
/// The coordination traits in [`crate::query`] never return these: they
/// report expected conditions as `bool`/`Option`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("agent {0} not found")]
    UnknownAgent(AgentId),

    #[error("point of interest at {pos} is already claimed by {holder}")]
    ClaimTaken { pos: BlockPos, holder: AgentId },

    #[error("no storage at {0}")]
    NoStorage(BlockPos),
}

pub type WorldResult<T> = Result<T, WorldError>;
