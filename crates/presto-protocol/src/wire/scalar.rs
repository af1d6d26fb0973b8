use std::fmt::{Debug, Formatter};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ProtocolError, ProtocolResult};
use crate::wire::{expect_str, WireCodec};

impl WireCodec for String {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::String(self.clone()))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        expect_str(node).map(str::to_string)
    }
}

impl WireCodec for bool {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::Bool(*self))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        node.as_bool()
            .ok_or_else(|| ProtocolError::type_mismatch("boolean", node))
    }
}

impl WireCodec for i64 {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::from(*self))
    }

    /// Only integral numbers within range are accepted; `1.5` or `"1"` are type mismatches.
    fn decode(node: &Value) -> ProtocolResult<Self> {
        node.as_i64()
            .ok_or_else(|| ProtocolError::type_mismatch("64-bit integer", node))
    }
}

impl WireCodec for i32 {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::from(*self))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        node.as_i64()
            .and_then(|x| i32::try_from(x).ok())
            .ok_or_else(|| ProtocolError::type_mismatch("32-bit integer", node))
    }
}

impl WireCodec for Uuid {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::String(self.hyphenated().to_string()))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        let text = expect_str(node)?;
        Uuid::parse_str(text).map_err(|_| ProtocolError::type_mismatch("UUID string", node))
    }
}

const MAX_BINARY_DEBUG_LENGTH: usize = 32;

/// An opaque byte string, carried on the wire as standard base64.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Binary(Vec<u8>);

impl Binary {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(data.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Binary {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Binary {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

/// Key material should not end up in logs in full, so only a prefix is shown.
impl Debug for Binary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Binary(")?;
        for (i, byte) in self.0.iter().enumerate() {
            if i >= MAX_BINARY_DEBUG_LENGTH {
                write!(f, "..")?;
                break;
            }
            write!(f, "{byte:02x}")?;
        }
        let n = self.0.len();
        if n == 1 {
            write!(f, ", 1 byte)")
        } else {
            write!(f, ", {n} bytes)")
        }
    }
}

impl WireCodec for Binary {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::String(STANDARD.encode(&self.0)))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        let text = expect_str(node)?;
        STANDARD
            .decode(text)
            .map(Binary)
            .map_err(|_| ProtocolError::type_mismatch("base64 string", node))
    }
}
