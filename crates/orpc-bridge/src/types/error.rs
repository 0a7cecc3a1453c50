//! Bridge error types

use thiserror::Error;

use super::{Guid, RuntimeVersion};

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Bridge-specific errors
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Identity lookup found no registered descriptor
    #[error("no such interface: {0}")]
    UnknownInterface(Guid),

    /// A call named a method slot outside the declared table
    #[error("ordinal {ordinal} out of range: method table has {slot_count} slots")]
    OrdinalOutOfRange { ordinal: u16, slot_count: u16 },

    /// Host runtime is below the tier a descriptor requires
    #[error("host runtime {host} below required {required}")]
    VersionMismatch {
        required: RuntimeVersion,
        host: RuntimeVersion,
    },

    /// Peer proposed a transfer syntax this stub does not speak
    #[error("transfer syntax not supported: {0}")]
    SyntaxNotSupported(String),

    /// Failure in the underlying call transport, propagated unchanged
    #[error("transport failure: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Not enough data to decode a frame
    #[error("buffer underflow: need {needed} bytes, have {have}")]
    BufferUnderflow { needed: usize, have: usize },

    /// Malformed call frame
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Target object was torn down by the last release
    #[error("object detached: target released")]
    ObjectDetached,

    /// Remote side answered with a failure status
    #[error("call failed with status 0x{0:08x}")]
    Fault(u32),
}

/// HRESULT-style status words carried in reply frames
pub mod hresult {
    /// Operation successful
    pub const S_OK: u32 = 0x0000_0000;
    /// Operation successful, returning false
    pub const S_FALSE: u32 = 0x0000_0001;
    /// Capability slot declared but not implemented
    pub const E_NOTIMPL: u32 = 0x8000_4001;
    /// No such interface supported
    pub const E_NOINTERFACE: u32 = 0x8000_4002;
    /// Unspecified error
    pub const E_FAIL: u32 = 0x8000_4005;
    /// Invalid argument
    pub const E_INVALIDARG: u32 = 0x8007_0057;
    /// Method ordinal out of range for the interface
    pub const RPC_S_PROCNUM_OUT_OF_RANGE: u32 = 0x8007_06D1;
    /// Stub's method table does not match the caller's
    pub const RPC_X_WRONG_STUB_VERSION: u32 = 0x8007_06F0;
    /// Target object no longer connected
    pub const CO_E_OBJNOTCONNECTED: u32 = 0x8004_01FD;
}
