//! Call frames and the transfer syntax tag
//!
//! The bridge moves exactly two frame shapes across the transport: a
//! request naming an interface, a method ordinal, and an opaque payload,
//! and a reply carrying a status word and an opaque payload. Argument
//! contents inside the payload belong to the marshaling engine, not here.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

use crate::types::{BridgeError, Guid, Result};

/// Wire-encoding negotiation tag: syntax identity plus version
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferSyntax {
    /// Syntax identity
    pub guid: Guid,
    /// Major version
    pub major: u16,
    /// Minor version
    pub minor: u16,
}

impl TransferSyntax {
    /// The NDR transfer syntax, version 2.0
    ///
    /// Reproduced exactly for interoperability with peers that negotiate it.
    pub const NDR: Self = Self {
        guid: Guid::from_fields(
            0x8a88_5d04,
            0x1ceb,
            0x11c9,
            [0x9f, 0xe8, 0x08, 0x00, 0x2b, 0x10, 0x48, 0x60],
        ),
        major: 2,
        minor: 0,
    };
}

impl fmt::Display for TransferSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}.{}", self.guid, self.major, self.minor)
    }
}

/// One invocation crossing the transport
#[derive(Clone, Debug)]
pub struct CallRequest {
    /// Target interface identity
    pub iid: Guid,
    /// Method slot ordinal
    pub ordinal: u16,
    /// Causality id of the logical call chain
    pub causality: Guid,
    /// Marshaled arguments, opaque to the bridge
    pub payload: Bytes,
}

impl CallRequest {
    /// Fixed header size ahead of the payload
    pub const HEADER_SIZE: usize = Guid::SIZE + 2 + 2 + Guid::SIZE + 4;

    /// Create a request with a fresh causality id
    pub fn new(iid: Guid, ordinal: u16, payload: Bytes) -> Self {
        Self {
            iid,
            ordinal,
            causality: Guid::generate(),
            payload,
        }
    }

    /// Encode to a frame
    pub fn encode(&self, little_endian: bool) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.len());
        self.iid.encode(&mut buf, little_endian);
        if little_endian {
            buf.put_u16_le(self.ordinal);
            buf.put_u16_le(0); // padding
            self.causality.encode(&mut buf, little_endian);
            buf.put_u32_le(self.payload.len() as u32);
        } else {
            buf.put_u16(self.ordinal);
            buf.put_u16(0);
            self.causality.encode(&mut buf, little_endian);
            buf.put_u32(self.payload.len() as u32);
        }
        buf.put_slice(&self.payload);
        buf.freeze()
    }

    /// Decode from a frame
    pub fn decode<B: Buf>(buf: &mut B, little_endian: bool) -> Result<Self> {
        let iid = Guid::decode(buf, little_endian)?;

        if buf.remaining() < 4 {
            return Err(BridgeError::BufferUnderflow {
                needed: 4,
                have: buf.remaining(),
            });
        }
        let ordinal = if little_endian {
            buf.get_u16_le()
        } else {
            buf.get_u16()
        };
        let _padding = buf.get_u16();

        let causality = Guid::decode(buf, little_endian)?;

        if buf.remaining() < 4 {
            return Err(BridgeError::BufferUnderflow {
                needed: 4,
                have: buf.remaining(),
            });
        }
        let len = if little_endian {
            buf.get_u32_le()
        } else {
            buf.get_u32()
        } as usize;

        if buf.remaining() < len {
            return Err(BridgeError::BufferUnderflow {
                needed: len,
                have: buf.remaining(),
            });
        }
        let payload = buf.copy_to_bytes(len);

        Ok(Self {
            iid,
            ordinal,
            causality,
            payload,
        })
    }
}

/// The stub's answer to one invocation
#[derive(Clone, Debug)]
pub struct CallReply {
    /// HRESULT-style status word
    pub status: u32,
    /// Marshaled results, opaque to the bridge
    pub payload: Bytes,
}

impl CallReply {
    /// Create a successful reply
    pub fn ok(payload: Bytes) -> Self {
        Self { status: 0, payload }
    }

    /// Create a failure reply with empty payload
    pub fn fault(status: u32) -> Self {
        Self {
            status,
            payload: Bytes::new(),
        }
    }

    /// Whether the status word signals success
    pub fn succeeded(&self) -> bool {
        self.status & 0x8000_0000 == 0
    }

    /// Encode to a frame
    pub fn encode(&self, little_endian: bool) -> Bytes {
        let mut buf = BytesMut::with_capacity(8 + self.payload.len());
        if little_endian {
            buf.put_u32_le(self.status);
            buf.put_u32_le(self.payload.len() as u32);
        } else {
            buf.put_u32(self.status);
            buf.put_u32(self.payload.len() as u32);
        }
        buf.put_slice(&self.payload);
        buf.freeze()
    }

    /// Decode from a frame
    pub fn decode<B: Buf>(buf: &mut B, little_endian: bool) -> Result<Self> {
        if buf.remaining() < 8 {
            return Err(BridgeError::BufferUnderflow {
                needed: 8,
                have: buf.remaining(),
            });
        }

        let (status, len) = if little_endian {
            (buf.get_u32_le(), buf.get_u32_le() as usize)
        } else {
            (buf.get_u32(), buf.get_u32() as usize)
        };

        if buf.remaining() < len {
            return Err(BridgeError::BufferUnderflow {
                needed: len,
                have: buf.remaining(),
            });
        }
        let payload = buf.copy_to_bytes(len);

        Ok(Self { status, payload })
    }
}
