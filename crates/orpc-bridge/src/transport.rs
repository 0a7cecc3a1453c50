//! The transport seam
//!
//! Connection establishment, framing, and authentication belong to the
//! transport below this crate. The bridge only needs a way to move one
//! request frame out and one reply frame back; transport failures are
//! propagated unchanged; retry policy lives with the transport or the
//! caller, never here.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::stub::StubDispatcher;
use crate::types::{BridgeError, Result};
use crate::wire::TransferSyntax;

/// One synchronous request/reply exchange
#[async_trait]
pub trait CallTransport: Send + Sync {
    /// Send an encoded request frame and await the reply frame
    async fn call(&self, request: Bytes) -> Result<Bytes>;
}

/// In-process transport pairing a proxy directly with a stub dispatcher
///
/// Stands in for a real remote transport when both ends live in one
/// process; also the unit through which round-trip delegation is tested.
pub struct LoopbackTransport {
    stub: Arc<StubDispatcher>,
}

impl std::fmt::Debug for LoopbackTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoopbackTransport").finish_non_exhaustive()
    }
}

impl LoopbackTransport {
    /// Bind to `stub`, negotiating the wire encoding
    ///
    /// Fails with [`BridgeError::SyntaxNotSupported`] when the proposed
    /// transfer syntax is not the one the stub speaks, the same agreement
    /// a real transport would reach at bind time.
    pub fn bind(stub: Arc<StubDispatcher>, proposed: TransferSyntax) -> Result<Arc<Self>> {
        if proposed != stub.transfer_syntax() {
            return Err(BridgeError::SyntaxNotSupported(proposed.to_string()));
        }
        Ok(Arc::new(Self { stub }))
    }
}

#[async_trait]
impl CallTransport for LoopbackTransport {
    async fn call(&self, request: Bytes) -> Result<Bytes> {
        self.stub.dispatch_frame(request).await
    }
}
