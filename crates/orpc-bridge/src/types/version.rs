//! Host runtime version tiers
//!
//! Descriptors record the minimum runtime tier their stubs assume. The
//! registry refuses to initialize below that tier instead of running an
//! incompatible protocol.

use std::fmt;

/// Runtime version as a (major, minor) pair
///
/// Ordered so that tier comparisons read naturally:
/// `host >= descriptor.min_version()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuntimeVersion {
    /// Major version number
    pub major: u16,
    /// Minor version number
    pub minor: u16,
}

impl RuntimeVersion {
    /// NT 5.1 tier (XP-era hosts)
    pub const NT_5_1: Self = Self { major: 5, minor: 1 };
    /// NT 6.0 tier (Vista-era hosts; first tier with robust stub checks)
    pub const NT_6_0: Self = Self { major: 6, minor: 0 };
    /// NT 6.1 tier
    pub const NT_6_1: Self = Self { major: 6, minor: 1 };

    /// Create a new version
    pub fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
