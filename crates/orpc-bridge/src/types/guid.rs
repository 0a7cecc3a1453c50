//! Interface identity values
//!
//! A GUID names an interface contract uniquely across the system. GUIDs are
//! immutable and compared only for equality.

use bytes::{Buf, BufMut};
use std::fmt;

use super::{BridgeError, Result};

/// 128-bit globally unique identifier
///
/// Stored in the registry field layout (one 32-bit group, two 16-bit
/// groups, eight trailing bytes), matching how interface identities are
/// declared in type libraries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    /// Size of a GUID on the wire
    pub const SIZE: usize = 16;

    /// Nil GUID (all zeros)
    pub const NIL: Self = Self {
        data1: 0,
        data2: 0,
        data3: 0,
        data4: [0; 8],
    };

    /// Build a GUID from its four field groups
    pub const fn from_fields(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    /// Parse from canonical form "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('{').trim_end_matches('}');
        if s.len() != 36 {
            return None;
        }
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 5 || parts[3].len() != 4 || parts[4].len() != 12 {
            return None;
        }

        let data1 = u32::from_str_radix(parts[0], 16).ok()?;
        let data2 = u16::from_str_radix(parts[1], 16).ok()?;
        let data3 = u16::from_str_radix(parts[2], 16).ok()?;

        let mut data4 = [0u8; 8];
        for (i, chunk) in parts[3]
            .as_bytes()
            .chunks(2)
            .chain(parts[4].as_bytes().chunks(2))
            .enumerate()
        {
            let pair = std::str::from_utf8(chunk).ok()?;
            data4[i] = u8::from_str_radix(pair, 16).ok()?;
        }

        Some(Self {
            data1,
            data2,
            data3,
            data4,
        })
    }

    /// Generate a fresh random (v4) GUID
    pub fn generate() -> Self {
        let bytes = *uuid::Uuid::new_v4().as_bytes();
        Self {
            data1: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            data2: u16::from_be_bytes([bytes[4], bytes[5]]),
            data3: u16::from_be_bytes([bytes[6], bytes[7]]),
            data4: [
                bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14],
                bytes[15],
            ],
        }
    }

    /// Check for the nil GUID
    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// Encode to the 16-byte wire layout
    pub fn encode<B: BufMut>(&self, buf: &mut B, little_endian: bool) {
        if little_endian {
            buf.put_u32_le(self.data1);
            buf.put_u16_le(self.data2);
            buf.put_u16_le(self.data3);
        } else {
            buf.put_u32(self.data1);
            buf.put_u16(self.data2);
            buf.put_u16(self.data3);
        }
        buf.put_slice(&self.data4);
    }

    /// Decode from the 16-byte wire layout
    pub fn decode<B: Buf>(buf: &mut B, little_endian: bool) -> Result<Self> {
        if buf.remaining() < Self::SIZE {
            return Err(BridgeError::BufferUnderflow {
                needed: Self::SIZE,
                have: buf.remaining(),
            });
        }

        let data1 = if little_endian {
            buf.get_u32_le()
        } else {
            buf.get_u32()
        };
        let data2 = if little_endian {
            buf.get_u16_le()
        } else {
            buf.get_u16()
        };
        let data3 = if little_endian {
            buf.get_u16_le()
        } else {
            buf.get_u16()
        };
        let mut data4 = [0u8; 8];
        buf.copy_to_slice(&mut data4);

        Ok(Self {
            data1,
            data2,
            data3,
            data4,
        })
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7],
        )
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({})", self)
    }
}
