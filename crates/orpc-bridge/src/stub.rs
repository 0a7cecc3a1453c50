//! Server-side stub dispatcher
//!
//! The dispatcher receives call frames, validates the interface identity
//! and method ordinal, and routes each call by its slot tag: delegating
//! slots go to the generic base handler, custom slots to the real object.
//! The ordinal range check happens before any payload byte is examined;
//! an out-of-range ordinal is rejected, never dereferenced.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::base::BaseHandler;
use crate::descriptor::{BaseCapability, MethodSlot};
use crate::refcount::RefCount;
use crate::registry::InterfaceRegistry;
use crate::types::{hresult, BridgeError, Guid, Result};
use crate::wire::{CallReply, CallRequest, TransferSyntax};

/// Result of one dispatched call
pub type CallResult = Result<Bytes>;

/// Boxed future returned by object invocations
pub type CallFuture = Pin<Box<dyn Future<Output = CallResult> + Send>>;

/// A local object reachable through the bridge
pub trait BridgedObject: Send + Sync + 'static {
    /// Interface identities this object answers to
    fn supported_interfaces(&self) -> Vec<Guid>;

    /// Invoke an interface-specific method (slot 7 and above)
    fn invoke(&self, iid: &Guid, ordinal: u16, payload: Bytes) -> CallFuture;
}

/// Server-side dispatcher for one exported object
pub struct StubDispatcher {
    registry: Arc<InterfaceRegistry>,
    base: BaseHandler,
}

impl StubDispatcher {
    /// Export `target` behind the interfaces in `registry`
    pub fn new(registry: Arc<InterfaceRegistry>, target: Arc<dyn BridgedObject>) -> Arc<Self> {
        let base = BaseHandler::new(registry.clone(), target);
        Arc::new(Self { registry, base })
    }

    /// The registry this stub dispatches against
    pub fn registry(&self) -> &Arc<InterfaceRegistry> {
        &self.registry
    }

    /// Wire encoding this stub speaks
    pub fn transfer_syntax(&self) -> TransferSyntax {
        TransferSyntax::NDR
    }

    /// Remote reference count for the exported object
    pub fn refs(&self) -> &RefCount {
        self.base.refs()
    }

    /// Whether the target object is still attached
    pub fn is_connected(&self) -> bool {
        self.base.is_connected()
    }

    /// Dispatch one decoded request
    ///
    /// Typed protocol violations ([`BridgeError::UnknownInterface`],
    /// [`BridgeError::OrdinalOutOfRange`]) come back as errors; remote
    /// method outcomes come back as reply statuses.
    pub async fn dispatch(&self, request: CallRequest) -> Result<CallReply> {
        let index = self.registry.lookup(&request.iid)?;
        let descriptor = self
            .registry
            .descriptor(index)
            .ok_or(BridgeError::UnknownInterface(request.iid))?;

        // Bounds check precedes any payload deserialization.
        let slot = descriptor.table().slot(request.ordinal)?;

        debug!(
            interface = descriptor.name(),
            ordinal = request.ordinal,
            causality = %request.causality,
            "dispatching call"
        );

        match slot {
            MethodSlot::Delegate(BaseCapability::Unknown) => {
                Ok(self.base.handle_unknown(request.ordinal, request.payload))
            }
            MethodSlot::Delegate(BaseCapability::Dispatch) => {
                Ok(self.base.handle_dispatch(request.ordinal))
            }
            MethodSlot::Custom(spec) => {
                // The shape must exist before the call is routed; the
                // marshaling engine that interprets it is external.
                descriptor.format().shape(spec)?;
                self.base
                    .invoke_target(&request.iid, request.ordinal, request.payload)
                    .await
            }
        }
    }

    /// Dispatch one encoded frame, answering protocol violations as
    /// reply statuses so a malformed ordinal never kills the exporter
    pub async fn dispatch_frame(&self, frame: Bytes) -> Result<Bytes> {
        let mut buf = frame;
        let request = CallRequest::decode(&mut buf, true)?;

        let reply = match self.dispatch(request).await {
            Ok(reply) => reply,
            Err(BridgeError::UnknownInterface(iid)) => {
                warn!(%iid, "call for unregistered interface");
                CallReply::fault(hresult::E_NOINTERFACE)
            }
            Err(BridgeError::OrdinalOutOfRange { ordinal, slot_count }) => {
                warn!(ordinal, slot_count, "ordinal out of range");
                CallReply::fault(hresult::RPC_S_PROCNUM_OUT_OF_RANGE)
            }
            Err(BridgeError::ObjectDetached) => CallReply::fault(hresult::CO_E_OBJNOTCONNECTED),
            Err(other) => return Err(other),
        };

        Ok(reply.encode(true))
    }
}
