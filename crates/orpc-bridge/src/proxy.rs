//! Client-side interface proxy
//!
//! A proxy presents a local call surface for a remote object: it checks
//! the ordinal against the descriptor's method table, encodes a call
//! frame, pushes it through the transport, and decodes the reply. The
//! base-capability operations get typed wrappers; anything else goes
//! through [`InterfaceProxy::call`] with an opaque payload.

use std::sync::Arc;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::descriptor::ordinal;
use crate::registry::InterfaceRegistry;
use crate::transport::CallTransport;
use crate::types::{hresult, BridgeError, Guid, Result};
use crate::wire::{CallReply, CallRequest};

/// Local stand-in for a remote object's interface
pub struct InterfaceProxy {
    iid: Guid,
    slot_count: u16,
    transport: Arc<dyn CallTransport>,
}

impl std::fmt::Debug for InterfaceProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceProxy")
            .field("iid", &self.iid)
            .field("slot_count", &self.slot_count)
            .finish_non_exhaustive()
    }
}

impl InterfaceProxy {
    /// Bind a proxy for `iid` over `transport`
    ///
    /// Fails with [`BridgeError::UnknownInterface`] when the registry has
    /// no descriptor for `iid`; proxy and stub must be built from the
    /// same descriptor or their method tables cannot agree.
    pub fn new(
        registry: &InterfaceRegistry,
        iid: Guid,
        transport: Arc<dyn CallTransport>,
    ) -> Result<Self> {
        let table = registry.describe(&iid)?;
        Ok(Self {
            iid,
            slot_count: table.slot_count(),
            transport,
        })
    }

    /// Interface identity this proxy speaks for
    pub fn iid(&self) -> Guid {
        self.iid
    }

    /// Slot count of the shared method table
    pub fn slot_count(&self) -> u16 {
        self.slot_count
    }

    /// Invoke a method slot with an opaque payload
    ///
    /// The ordinal is validated before any frame is built: a slot outside
    /// `[0, slot_count)` is an out-of-bounds failure, not a silent no-op.
    /// Transport failures propagate unchanged.
    pub async fn call(&self, ord: u16, payload: Bytes) -> Result<CallReply> {
        if ord >= self.slot_count {
            return Err(BridgeError::OrdinalOutOfRange {
                ordinal: ord,
                slot_count: self.slot_count,
            });
        }

        let request = CallRequest::new(self.iid, ord, payload);
        let reply_frame = self.transport.call(request.encode(true)).await?;

        let mut buf = reply_frame;
        CallReply::decode(&mut buf, true)
    }

    /// Query whether the remote object supports `iid`
    ///
    /// `Ok(true)` when the far side confirms the identity, `Ok(false)` on
    /// a no-such-interface answer, `Err` on anything else.
    pub async fn query_interface(&self, iid: Guid) -> Result<bool> {
        let mut payload = BytesMut::with_capacity(Guid::SIZE);
        iid.encode(&mut payload, true);

        let reply = self.call(ordinal::QUERY_INTERFACE, payload.freeze()).await?;
        match reply.status {
            hresult::S_OK => Ok(true),
            hresult::E_NOINTERFACE => Ok(false),
            status => Err(BridgeError::Fault(status)),
        }
    }

    /// Add `count` remote references, returning the new count
    pub async fn add_ref(&self, count: u32) -> Result<u32> {
        self.ref_op(ordinal::ADD_REF, count).await
    }

    /// Release `count` remote references, returning the remaining count
    pub async fn release(&self, count: u32) -> Result<u32> {
        self.ref_op(ordinal::RELEASE, count).await
    }

    async fn ref_op(&self, ord: u16, count: u32) -> Result<u32> {
        let mut payload = BytesMut::with_capacity(4);
        payload.put_u32_le(count);

        let reply = self.call(ord, payload.freeze()).await?;
        if !reply.succeeded() {
            return Err(BridgeError::Fault(reply.status));
        }

        let mut buf = reply.payload;
        if buf.remaining() < 4 {
            return Err(BridgeError::BufferUnderflow {
                needed: 4,
                have: buf.remaining(),
            });
        }
        Ok(buf.get_u32_le())
    }
}
