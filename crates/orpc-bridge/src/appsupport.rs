//! The speech-engine app-support interface
//!
//! The one interface this bridge ships: `IDgnAppSupport`, the dispatch-
//! derived contract a speech-recognition engine exposes to client
//! applications across the process boundary. It adds no methods of its
//! own: all seven slots delegate to the base machinery, and its format
//! table is empty. The identity values are reproduced exactly for wire
//! compatibility with existing peers.

use std::sync::Arc;

use crate::descriptor::{FormatTable, InterfaceDescriptor, MethodTable};
use crate::registry::{InterfaceRegistry, RegistryBuilder};
use crate::types::{Guid, Result, RuntimeVersion};

/// Interface name as peers report it
pub const APP_SUPPORT_NAME: &str = "IDgnAppSupport";

/// IDgnAppSupport identity: cadd17a0-482a-484c-9451-7acba6f1272f
pub const APP_SUPPORT_IID: Guid = Guid::from_fields(
    0xcadd_17a0,
    0x482a,
    0x484c,
    [0x94, 0x51, 0x7a, 0xcb, 0xa6, 0xf1, 0x27, 0x2f],
);

/// Dispatch base identity: 00020400-0000-0000-c000-000000000046
pub const DISPATCH_IID: Guid = Guid::from_fields(
    0x0002_0400,
    0x0000,
    0x0000,
    [0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46],
);

/// Base-unknown identity: 00000000-0000-0000-c000-000000000046
pub const UNKNOWN_IID: Guid = Guid::from_fields(
    0x0000_0000,
    0x0000,
    0x0000,
    [0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46],
);

/// Interface version
pub const APP_SUPPORT_VERSION: (u16, u16) = (0, 0);

/// Descriptor for the app-support interface
///
/// Seven delegating slots, an empty format table, and the dispatch base
/// as the sole ancestor. Stubs assume the NT 6.0 runtime tier.
pub fn descriptor() -> InterfaceDescriptor {
    InterfaceDescriptor::new(
        APP_SUPPORT_NAME,
        APP_SUPPORT_IID,
        MethodTable::base(),
        FormatTable::empty(),
        vec![DISPATCH_IID],
        RuntimeVersion::NT_6_0,
    )
}

/// Build the one-entry registry for this interface, gated against `host`
pub fn registry(host: RuntimeVersion) -> Result<Arc<InterfaceRegistry>> {
    RegistryBuilder::new(host).register(descriptor()).build()
}
