//! Interface descriptors and method tables
//!
//! A descriptor is the static metadata for one interface: its identity, the
//! shape of its method table, the format table for any custom-marshaled
//! slots, its ancestor interfaces, and the minimum runtime tier its stubs
//! assume. Descriptors are built once and never mutated.

use bytes::Bytes;

use crate::types::{BridgeError, Guid, Result, RuntimeVersion};

/// Well-known method slot ordinals
///
/// Slots 0-2 are the base-unknown capability, slots 3-6 the dispatch
/// capability. Interface-specific methods start at slot 7.
pub mod ordinal {
    /// Query for another interface on the same object
    pub const QUERY_INTERFACE: u16 = 0;
    /// Add a remote reference
    pub const ADD_REF: u16 = 1;
    /// Release a remote reference
    pub const RELEASE: u16 = 2;
    /// Dispatch capability: type info count
    pub const GET_TYPE_INFO_COUNT: u16 = 3;
    /// Dispatch capability: type info
    pub const GET_TYPE_INFO: u16 = 4;
    /// Dispatch capability: name-to-id mapping
    pub const GET_IDS_OF_NAMES: u16 = 5;
    /// Dispatch capability: late-bound invoke
    pub const INVOKE: u16 = 6;
}

/// Number of inherited slots every dispatch-capable interface carries
/// (3 base-unknown + 4 dispatch)
pub const BASE_SLOT_COUNT: u16 = 7;

/// The generic capability a delegating slot forwards to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseCapability {
    /// Reference counting and identity negotiation (slots 0-2)
    Unknown,
    /// Late-bound automation support (slots 3-6)
    Dispatch,
}

/// Marshaling shape of one custom method slot
///
/// Points at the byte-encoded argument description inside the descriptor's
/// format table. The marshaling engine that interprets it is external; the
/// bridge only routes the call and hands the payload through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarshalSpec {
    /// Offset of this slot's description in the format table
    pub format_offset: u16,
}

impl MarshalSpec {
    /// Create a spec pointing at `format_offset`
    pub fn new(format_offset: u16) -> Self {
        Self { format_offset }
    }
}

/// One entry in a method table: either a custom-marshaled method or a
/// forward to generic base machinery
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodSlot {
    /// Forward to the generic handler for the named capability
    Delegate(BaseCapability),
    /// Interface-specific method marshaled per its spec
    Custom(MarshalSpec),
}

/// Ordered sequence of method slots
///
/// Proxy and stub must agree exactly on slot count and ordinals; a mismatch
/// between the two sides is a protocol-version fault.
#[derive(Clone, Debug)]
pub struct MethodTable {
    slots: Vec<MethodSlot>,
}

impl MethodTable {
    /// The 7-slot table of an interface that adds no methods of its own:
    /// every entry delegates to the base machinery
    pub fn base() -> Self {
        let mut slots = Vec::with_capacity(BASE_SLOT_COUNT as usize);
        slots.extend([MethodSlot::Delegate(BaseCapability::Unknown); 3]);
        slots.extend([MethodSlot::Delegate(BaseCapability::Dispatch); 4]);
        Self { slots }
    }

    /// Base table extended with custom slots at ordinals 7..7+n
    pub fn with_custom(specs: impl IntoIterator<Item = MarshalSpec>) -> Self {
        let mut table = Self::base();
        table
            .slots
            .extend(specs.into_iter().map(MethodSlot::Custom));
        table
    }

    /// Total number of slots
    pub fn slot_count(&self) -> u16 {
        self.slots.len() as u16
    }

    /// Look up the slot for `ordinal`, rejecting out-of-range values
    pub fn slot(&self, ordinal: u16) -> Result<MethodSlot> {
        self.slots
            .get(ordinal as usize)
            .copied()
            .ok_or(BridgeError::OrdinalOutOfRange {
                ordinal,
                slot_count: self.slot_count(),
            })
    }
}

/// Byte-encoded marshaling descriptions for an interface's custom slots
///
/// Zero length means no custom marshaling exists and every slot delegates.
/// Compiled once, read-only for the process lifetime.
#[derive(Clone, Debug, Default)]
pub struct FormatTable {
    bytes: Bytes,
}

impl FormatTable {
    /// The empty table of a purely delegating interface
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a compiled format string
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    /// Whether any custom marshaling shape is defined
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The description starting at `spec.format_offset`
    pub fn shape(&self, spec: MarshalSpec) -> Result<Bytes> {
        let offset = spec.format_offset as usize;
        if offset >= self.bytes.len() {
            return Err(BridgeError::InvalidFrame(format!(
                "format offset {} outside table of {} bytes",
                offset,
                self.bytes.len()
            )));
        }
        Ok(self.bytes.slice(offset..))
    }

    /// Raw table bytes
    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }
}

/// Static metadata describing one interface
#[derive(Clone, Debug)]
pub struct InterfaceDescriptor {
    name: &'static str,
    iid: Guid,
    table: MethodTable,
    format: FormatTable,
    base_iids: Vec<Guid>,
    min_version: RuntimeVersion,
}

impl InterfaceDescriptor {
    /// Create a descriptor
    pub fn new(
        name: &'static str,
        iid: Guid,
        table: MethodTable,
        format: FormatTable,
        base_iids: Vec<Guid>,
        min_version: RuntimeVersion,
    ) -> Self {
        Self {
            name,
            iid,
            table,
            format,
            base_iids,
            min_version,
        }
    }

    /// Interface display name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Interface identity
    pub fn iid(&self) -> Guid {
        self.iid
    }

    /// Method table shape
    pub fn table(&self) -> &MethodTable {
        &self.table
    }

    /// Format table for custom slots
    pub fn format(&self) -> &FormatTable {
        &self.format
    }

    /// Ancestor interface identities, nearest first
    pub fn base_iids(&self) -> &[Guid] {
        &self.base_iids
    }

    /// Minimum runtime tier the stub assumes
    pub fn min_version(&self) -> RuntimeVersion {
        self.min_version
    }
}
