//! GUID-keyed interface registry
//!
//! The registry binds interface identities to their descriptors. It is
//! built once at process start through [`RegistryBuilder`], which applies
//! the runtime-version gate, and is shared read-only (`Arc`) thereafter.
//! Lookups take no locks and are idempotent.

use std::sync::Arc;

use tracing::info;

use crate::descriptor::{InterfaceDescriptor, MethodTable};
use crate::types::{BridgeError, Guid, Result, RuntimeVersion};

/// Format version of the registry's table layout
pub const TABLE_VERSION: u16 = 2;

/// Immutable identity-to-descriptor mapping
#[derive(Debug)]
pub struct InterfaceRegistry {
    entries: Vec<InterfaceDescriptor>,
    host: RuntimeVersion,
}

impl InterfaceRegistry {
    /// Find the descriptor index for `iid`
    ///
    /// Linear scan over the registered descriptors. A miss means the object
    /// does not support the requested interface and is answered with
    /// [`BridgeError::UnknownInterface`], never a crash.
    pub fn lookup(&self, iid: &Guid) -> Result<usize> {
        self.entries
            .iter()
            .position(|d| d.iid() == *iid)
            .ok_or(BridgeError::UnknownInterface(*iid))
    }

    /// Descriptor at `index`
    pub fn descriptor(&self, index: usize) -> Option<&InterfaceDescriptor> {
        self.entries.get(index)
    }

    /// Method table for `iid`, if registered
    pub fn describe(&self, iid: &Guid) -> Result<&MethodTable> {
        let index = self.lookup(iid)?;
        Ok(self.entries[index].table())
    }

    /// Number of registered interfaces
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Host runtime tier the registry was validated against
    pub fn host_version(&self) -> RuntimeVersion {
        self.host
    }

    /// Registered interface display names, in registration order
    pub fn interface_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|d| d.name())
    }
}

/// Builder for [`InterfaceRegistry`]
pub struct RegistryBuilder {
    entries: Vec<InterfaceDescriptor>,
    host: RuntimeVersion,
}

impl RegistryBuilder {
    /// Start an empty registry validated against `host`
    pub fn new(host: RuntimeVersion) -> Self {
        Self {
            entries: Vec::new(),
            host,
        }
    }

    /// Add a descriptor
    pub fn register(mut self, descriptor: InterfaceDescriptor) -> Self {
        self.entries.push(descriptor);
        self
    }

    /// Validate and freeze the registry
    ///
    /// Fails fast with [`BridgeError::VersionMismatch`] when any descriptor
    /// requires a runtime tier above the host's: the registry refuses to
    /// initialize rather than run an incompatible protocol.
    pub fn build(self) -> Result<Arc<InterfaceRegistry>> {
        for descriptor in &self.entries {
            if descriptor.min_version() > self.host {
                return Err(BridgeError::VersionMismatch {
                    required: descriptor.min_version(),
                    host: self.host,
                });
            }
        }

        info!(
            interfaces = self.entries.len(),
            host = %self.host,
            "interface registry initialized"
        );

        Ok(Arc::new(InterfaceRegistry {
            entries: self.entries,
            host: self.host,
        }))
    }
}
