use thiserror::Error;

use vc_core::BlockPos;

/// Why a pairing entry point refused to pair.
///
/// Not an error in the propagating sense: a rejection drives the invalidate
/// path (units and listener torn down) and is returned for observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PairingRejection {
    #[error("agent is gone or dead")]
    AgentGone,

    #[error("job site {0} no longer holds this profession's job block")]
    WrongJobBlock(BlockPos),

    #[error("storage {0} is out of pairing range")]
    StorageOutOfRange(BlockPos),

    #[error("block at {0} is not a supported storage")]
    NotStorage(BlockPos),

    #[error("crafting surface {0} is out of pairing range")]
    CraftingOutOfRange(BlockPos),

    #[error("block at {0} is not a crafting surface")]
    NotCraftingSurface(BlockPos),
}
