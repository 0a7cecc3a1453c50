//! Shared helpers for the integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use orpc_bridge::appsupport::APP_SUPPORT_IID;
use orpc_bridge::{
    BridgedObject, CallFuture, FormatTable, Guid, InterfaceDescriptor, InterfaceProxy,
    InterfaceRegistry, LoopbackTransport, MarshalSpec, MethodTable, RegistryBuilder,
    RuntimeVersion, StubDispatcher, TransferSyntax,
};

/// Test object that records every custom invocation it receives
pub struct TrackingObject {
    iids: Vec<Guid>,
    call_count: AtomicU64,
    invoked_ordinals: Mutex<Vec<u16>>,
}

impl TrackingObject {
    pub fn new(iids: Vec<Guid>) -> Self {
        Self {
            iids,
            call_count: AtomicU64::new(0),
            invoked_ordinals: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn invoked_ordinals(&self) -> Vec<u16> {
        self.invoked_ordinals.lock().clone()
    }
}

impl BridgedObject for TrackingObject {
    fn supported_interfaces(&self) -> Vec<Guid> {
        self.iids.clone()
    }

    fn invoke(&self, _iid: &Guid, ordinal: u16, payload: Bytes) -> CallFuture {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.invoked_ordinals.lock().push(ordinal);
        Box::pin(async move { Ok(payload) })
    }
}

/// Descriptor for the shipped app-support interface
pub fn app_support_descriptor() -> InterfaceDescriptor {
    orpc_bridge::appsupport::descriptor()
}

/// Descriptor for a synthetic interface with `custom` extra slots
pub fn synthetic_descriptor(iid: Guid, custom: u16) -> InterfaceDescriptor {
    let specs = (0..custom).map(|i| MarshalSpec::new(i * 2));
    let format: Vec<u8> = (0..custom * 2).map(|_| 0x11).collect();
    InterfaceDescriptor::new(
        "ISynthetic",
        iid,
        MethodTable::with_custom(specs),
        FormatTable::new(Bytes::from(format)),
        vec![],
        RuntimeVersion::NT_6_0,
    )
}

/// A fully wired proxy/stub pair over the loopback transport
pub struct BridgePair {
    pub registry: Arc<InterfaceRegistry>,
    pub target: Arc<TrackingObject>,
    pub stub: Arc<StubDispatcher>,
    pub proxy: Arc<InterfaceProxy>,
}

/// Build a pair for the app-support interface on an NT 6.0 host
pub fn app_support_pair() -> BridgePair {
    pair_for(app_support_descriptor(), APP_SUPPORT_IID)
}

/// Build a pair for an arbitrary descriptor
pub fn pair_for(descriptor: InterfaceDescriptor, iid: Guid) -> BridgePair {
    let registry = RegistryBuilder::new(RuntimeVersion::NT_6_0)
        .register(descriptor)
        .build()
        .expect("registry should build on a current host");

    let target = Arc::new(TrackingObject::new(vec![iid]));
    let stub = StubDispatcher::new(registry.clone(), target.clone());
    let transport =
        LoopbackTransport::bind(stub.clone(), TransferSyntax::NDR).expect("loopback bind");
    let proxy =
        Arc::new(InterfaceProxy::new(&registry, iid, transport).expect("proxy for registered iid"));

    BridgePair {
        registry,
        target,
        stub,
        proxy,
    }
}
