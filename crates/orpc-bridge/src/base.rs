//! Generic base-capability handler
//!
//! Every interface inherits seven slots: query-interface, add-ref, and
//! release from the base-unknown capability, and four dispatch-capability
//! slots. Interfaces that declare no custom marshaling forward all of them
//! here instead of carrying their own handlers.

use std::sync::{Arc, RwLock};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::descriptor::ordinal;
use crate::refcount::RefCount;
use crate::registry::InterfaceRegistry;
use crate::stub::BridgedObject;
use crate::types::{hresult, BridgeError, Guid, Result};
use crate::wire::CallReply;

/// Shared machinery behind every delegating slot
pub struct BaseHandler {
    registry: Arc<InterfaceRegistry>,
    refs: RefCount,
    target: RwLock<Option<Arc<dyn BridgedObject>>>,
}

impl BaseHandler {
    /// Attach `target` with one initial exporter reference
    pub fn new(registry: Arc<InterfaceRegistry>, target: Arc<dyn BridgedObject>) -> Self {
        Self {
            registry,
            refs: RefCount::new(),
            target: RwLock::new(Some(target)),
        }
    }

    /// Remote reference count
    pub fn refs(&self) -> &RefCount {
        &self.refs
    }

    /// Whether the target is still attached
    pub fn is_connected(&self) -> bool {
        self.target.read().unwrap().is_some()
    }

    fn target(&self) -> Option<Arc<dyn BridgedObject>> {
        self.target.read().unwrap().clone()
    }

    /// Handle a base-unknown slot (ordinals 0-2)
    pub fn handle_unknown(&self, ord: u16, payload: Bytes) -> CallReply {
        match ord {
            ordinal::QUERY_INTERFACE => self.query_interface(payload),
            ordinal::ADD_REF => self.add_ref(payload),
            ordinal::RELEASE => self.release(payload),
            _ => CallReply::fault(hresult::E_FAIL),
        }
    }

    /// Handle a dispatch-capability slot (ordinals 3-6)
    ///
    /// The shipped interface declares these slots but leaves them unset:
    /// the call routes here successfully and reports not-implemented.
    pub fn handle_dispatch(&self, _ord: u16) -> CallReply {
        CallReply::fault(hresult::E_NOTIMPL)
    }

    /// Route a custom slot to the attached object
    pub async fn invoke_target(&self, iid: &Guid, ord: u16, payload: Bytes) -> Result<CallReply> {
        let target = self.target().ok_or(BridgeError::ObjectDetached)?;

        match target.invoke(iid, ord, payload).await {
            Ok(result) => Ok(CallReply::ok(result)),
            Err(BridgeError::Fault(status)) => Ok(CallReply::fault(status)),
            Err(other) => Err(other),
        }
    }

    fn query_interface(&self, mut payload: Bytes) -> CallReply {
        let Some(target) = self.target() else {
            return CallReply::fault(hresult::CO_E_OBJNOTCONNECTED);
        };

        let requested = match Guid::decode(&mut payload, true) {
            Ok(iid) => iid,
            Err(_) => return CallReply::fault(hresult::E_INVALIDARG),
        };

        let registered = self.registry.lookup(&requested).is_ok();
        let supported = target.supported_interfaces().contains(&requested);
        if !registered || !supported {
            return CallReply::fault(hresult::E_NOINTERFACE);
        }

        let mut buf = BytesMut::with_capacity(Guid::SIZE);
        requested.encode(&mut buf, true);
        CallReply::ok(buf.freeze())
    }

    fn add_ref(&self, payload: Bytes) -> CallReply {
        if !self.is_connected() {
            return CallReply::fault(hresult::CO_E_OBJNOTCONNECTED);
        }

        let count = ref_delta(payload);
        let new_count = self.refs.acquire(count);

        let mut buf = BytesMut::with_capacity(4);
        buf.put_u32_le(new_count);
        CallReply::ok(buf.freeze())
    }

    fn release(&self, payload: Bytes) -> CallReply {
        let count = ref_delta(payload);
        let (remaining, released) = self.refs.release(count);

        if released {
            // Last release detaches the target; teardown is this explicit
            // effect, not a destructor chain.
            let detached = self.target.write().unwrap().take();
            if detached.is_some() {
                debug!("last reference released, target detached");
            }
        }

        let mut buf = BytesMut::with_capacity(4);
        buf.put_u32_le(remaining);
        CallReply::ok(buf.freeze())
    }
}

/// Reference delta carried in an add-ref/release payload; empty means 1
fn ref_delta(mut payload: Bytes) -> u32 {
    if payload.remaining() >= 4 {
        payload.get_u32_le()
    } else {
        1
    }
}
