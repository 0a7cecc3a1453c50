//! Core bridge data types

mod error;
mod guid;
mod version;

pub use error::{hresult, BridgeError, Result};
pub use guid::Guid;
pub use version::RuntimeVersion;
