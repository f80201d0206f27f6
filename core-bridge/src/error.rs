use thiserror::Error;

use crate::id::RequestId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request id {0} is already awaiting a reply")]
    DuplicateRequestId(RequestId),

    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("Bridge error: {0}")]
    Bridge(#[from] bridge_traits::BridgeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
