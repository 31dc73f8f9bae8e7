//! OSC message model and codec
//!
//! Message = padded address + `,`-prefixed padded type-tag string + arguments.
//! Numerics are big-endian; every string is NUL-terminated and padded to a
//! 4-byte boundary.

use bytes::{Buf, BufMut, BytesMut};

use vmcast_core::{VmcastError, VmcastResult};

/// One typed OSC argument
#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    Int(i32),
    Float(f32),
    Str(String),
}

impl OscArg {
    /// OSC type tag character for this argument
    #[inline]
    pub fn type_tag(&self) -> u8 {
        match self {
            OscArg::Int(_) => b'i',
            OscArg::Float(_) => b'f',
            OscArg::Str(_) => b's',
        }
    }
}

impl From<i32> for OscArg {
    fn from(v: i32) -> Self {
        OscArg::Int(v)
    }
}

impl From<f32> for OscArg {
    fn from(v: f32) -> Self {
        OscArg::Float(v)
    }
}

impl From<&str> for OscArg {
    fn from(v: &str) -> Self {
        OscArg::Str(v.to_string())
    }
}

impl From<String> for OscArg {
    fn from(v: String) -> Self {
        OscArg::Str(v)
    }
}

/// One OSC message: address pattern plus typed argument list
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    pub address: String,
    pub args: Vec<OscArg>,
}

impl OscMessage {
    /// Message with no arguments
    pub fn new(address: impl Into<String>) -> Self {
        OscMessage {
            address: address.into(),
            args: Vec::new(),
        }
    }

    /// Message with an argument list
    pub fn with_args(address: impl Into<String>, args: Vec<OscArg>) -> Self {
        OscMessage {
            address: address.into(),
            args,
        }
    }

    /// Serialize to a datagram payload
    pub fn encode(&self) -> VmcastResult<Vec<u8>> {
        if !self.address.starts_with('/') || self.address.contains('\0') {
            return Err(VmcastError::InvalidAddress(self.address.clone()));
        }

        let mut buf = BytesMut::with_capacity(self.encoded_size());
        put_padded_str(&mut buf, &self.address);

        let mut tags = BytesMut::with_capacity(self.args.len() + 1);
        tags.put_u8(b',');
        for arg in &self.args {
            tags.put_u8(arg.type_tag());
        }
        put_padded_bytes(&mut buf, &tags);

        for arg in &self.args {
            match arg {
                OscArg::Int(v) => buf.put_i32(*v),
                OscArg::Float(v) => buf.put_f32(*v),
                OscArg::Str(v) => {
                    if v.contains('\0') {
                        return Err(VmcastError::InvalidWireFormat(
                            "NUL inside string argument".into(),
                        ));
                    }
                    put_padded_str(&mut buf, v);
                }
            }
        }

        Ok(buf.to_vec())
    }

    /// Parse a datagram payload
    ///
    /// Accepts `d`, `T` and `F` tags from foreign senders so the diagnostic
    /// listener can log them; everything else is rejected.
    pub fn decode(buf: &[u8]) -> VmcastResult<Self> {
        let mut cursor = buf;

        let address = take_padded_str(&mut cursor)?;
        if !address.starts_with('/') {
            return Err(VmcastError::InvalidAddress(address));
        }

        // A missing type-tag string means an argument-less message from a
        // sender predating OSC 1.0; treat like an empty tag list.
        if cursor.is_empty() {
            return Ok(OscMessage::new(address));
        }

        let tags = take_padded_str(&mut cursor)?;
        let tags = tags.strip_prefix(',').ok_or_else(|| {
            VmcastError::InvalidWireFormat("type-tag string missing ',' prefix".into())
        })?;

        let mut args = Vec::with_capacity(tags.len());
        for tag in tags.bytes() {
            let arg = match tag {
                b'i' => OscArg::Int(take_i32(&mut cursor)?),
                b'f' => OscArg::Float(take_f32(&mut cursor)?),
                b's' => OscArg::Str(take_padded_str(&mut cursor)?),
                b'd' => OscArg::Float(take_f64(&mut cursor)? as f32),
                b'T' => OscArg::Int(1),
                b'F' => OscArg::Int(0),
                other => return Err(VmcastError::UnknownTypeTag(other)),
            };
            args.push(arg);
        }

        Ok(OscMessage { address, args })
    }

    /// Encoded size in bytes
    pub fn encoded_size(&self) -> usize {
        let mut size = padded_len(self.address.len()) + padded_len(1 + self.args.len());
        for arg in &self.args {
            size += match arg {
                OscArg::Int(_) | OscArg::Float(_) => 4,
                OscArg::Str(v) => padded_len(v.len()),
            };
        }
        size
    }
}

impl std::fmt::Display for OscMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.address)?;
        for arg in &self.args {
            match arg {
                OscArg::Int(v) => write!(f, " {v}")?,
                OscArg::Float(v) => write!(f, " {v:.4}")?,
                OscArg::Str(v) => write!(f, " {v:?}")?,
            }
        }
        Ok(())
    }
}

/// String length rounded up to the next 4-byte boundary, NUL included
#[inline]
fn padded_len(len: usize) -> usize {
    (len + 4) & !3
}

fn put_padded_str(buf: &mut BytesMut, s: &str) {
    put_padded_bytes(buf, s.as_bytes());
}

fn put_padded_bytes(buf: &mut BytesMut, bytes: &[u8]) {
    buf.put_slice(bytes);
    for _ in bytes.len()..padded_len(bytes.len()) {
        buf.put_u8(0);
    }
}

fn take_padded_str(cursor: &mut &[u8]) -> VmcastResult<String> {
    let nul = cursor
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| VmcastError::InvalidWireFormat("unterminated string".into()))?;

    let consumed = padded_len(nul);
    if cursor.len() < consumed {
        return Err(VmcastError::BufferTooShort {
            expected: consumed,
            actual: cursor.len(),
        });
    }

    let s = std::str::from_utf8(&cursor[..nul])
        .map_err(|_| VmcastError::InvalidWireFormat("string is not UTF-8".into()))?
        .to_string();
    cursor.advance(consumed);
    Ok(s)
}

fn take_i32(cursor: &mut &[u8]) -> VmcastResult<i32> {
    check_len(cursor, 4)?;
    Ok(cursor.get_i32())
}

fn take_f32(cursor: &mut &[u8]) -> VmcastResult<f32> {
    check_len(cursor, 4)?;
    Ok(cursor.get_f32())
}

fn take_f64(cursor: &mut &[u8]) -> VmcastResult<f64> {
    check_len(cursor, 8)?;
    Ok(cursor.get_f64())
}

fn check_len(cursor: &[u8], expected: usize) -> VmcastResult<()> {
    if cursor.len() < expected {
        return Err(VmcastError::BufferTooShort {
            expected,
            actual: cursor.len(),
        });
    }
    Ok(())
}
