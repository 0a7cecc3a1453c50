//! Object-RPC interface proxy/stub bridge
//!
//! This crate implements the call-forwarding contract between a local proxy
//! and a remote stub for a GUID-identified interface: a caller in one
//! process invokes a method slot on a proxy, the call crosses a transport as
//! an encoded frame, and the stub on the far side routes it either to the
//! generic base-capability machinery or to the real object behind it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Bridge Layer (this crate)                 │
//! ├──────────────────────────────────────────────────────────────┤
//! │  InterfaceRegistry     │  InterfaceProxy   │  StubDispatcher │
//! │  - GUID -> descriptor  │  - slot bounds    │  - slot bounds  │
//! │  - version gate        │  - call frames    │  - Delegate /   │
//! │  - read-only tables    │  - status checks  │    Custom tag   │
//! ├──────────────────────────────────────────────────────────────┤
//! │  BaseHandler (query-interface / add-ref / release, dispatch  │
//! │  capability slots), RefCount (remote object lifetime)        │
//! ├──────────────────────────────────────────────────────────────┤
//! │            CallTransport (external; loopback provided)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! - **Descriptor**: immutable per-interface metadata (identity, method
//!   table shape, format table, base interfaces, minimum runtime version)
//! - **Ordinal**: index of a method slot; slots 0-2 are the base-unknown
//!   capability, 3-6 the dispatch capability, 7+ interface-specific
//! - **Delegation**: slots without a marshal spec forward to the generic
//!   base handler instead of carrying custom marshaling
//!
//! # Modules
//!
//! - [`types`]: identity, version, and error types
//! - [`descriptor`]: interface descriptors and method tables
//! - [`registry`]: GUID-keyed descriptor lookup, built once at startup
//! - [`wire`]: call request/reply frames and the transfer syntax tag
//! - [`proxy`]: client-side call surface
//! - [`stub`]: server-side dispatcher
//! - [`base`]: generic base-capability handler
//! - [`refcount`]: remote reference counting
//! - [`transport`]: the transport seam and the in-process loopback
//! - [`appsupport`]: the shipped speech-engine app-support interface

pub mod types;
pub mod descriptor;
pub mod registry;
pub mod wire;
pub mod refcount;
pub mod base;
pub mod stub;
pub mod proxy;
pub mod transport;
pub mod appsupport;

pub use types::{BridgeError, Result, Guid, RuntimeVersion};
pub use descriptor::{
    BaseCapability, FormatTable, InterfaceDescriptor, MarshalSpec, MethodSlot, MethodTable,
    BASE_SLOT_COUNT,
};
pub use registry::{InterfaceRegistry, RegistryBuilder};
pub use wire::{CallReply, CallRequest, TransferSyntax};
pub use proxy::InterfaceProxy;
pub use stub::{BridgedObject, CallFuture, CallResult, StubDispatcher};
pub use transport::{CallTransport, LoopbackTransport};

/// Minimum host runtime the shipped descriptors assume
pub const MIN_RUNTIME_VERSION: RuntimeVersion = RuntimeVersion::NT_6_0;
