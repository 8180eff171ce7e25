use thiserror::Error;

use vc_core::{CoreError, Profession};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("behavior for {behavior} registered under profession {profession}")]
    BehaviorMismatch {
        profession: Profession,
        behavior:   Profession,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
