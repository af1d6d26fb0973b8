//! The mapping between protocol values and JSON wire nodes.
//!
//! Every value that crosses the coordinator/worker boundary implements
//! [`WireCodec`]. Records additionally implement [`WireRecord`], which encodes
//! their fields into an existing object so that a discriminator can be written
//! ahead of them when the record is carried by a capability.

mod container;
mod macros;
mod path;
mod scalar;

pub use container::WireKey;
pub use path::{PathSegment, WirePath};
pub use scalar::Binary;
pub use serde_json::Value;

use crate::error::{ProtocolError, ProtocolResult};

pub type WireObject = serde_json::Map<String, Value>;

/// The reserved key holding the discriminator of an encoded capability value.
pub const DISCRIMINATOR_KEY: &str = "@type";

pub trait WireCodec: Sized {
    fn encode(&self) -> ProtocolResult<Value>;

    fn decode(node: &Value) -> ProtocolResult<Self>;

    /// Writes this value as the field `key` of a record.
    fn encode_field(&self, key: &str, object: &mut WireObject) -> ProtocolResult<()> {
        let node = self.encode().map_err(|e| e.at_field(key))?;
        object.insert(key.to_string(), node);
        Ok(())
    }

    /// Reads the field `key` of a record. The field is required unless the
    /// implementation says otherwise.
    fn decode_field(object: &WireObject, key: &str) -> ProtocolResult<Self> {
        match object.get(key) {
            Some(node) => Self::decode(node).map_err(|e| e.at_field(key)),
            None => Err(ProtocolError::missing_field(key)),
        }
    }
}

/// A concrete record whose fields map one-to-one onto the keys of a wire object.
/// Implementations are generated by [`wire_record!`](crate::wire_record).
pub trait WireRecord: Sized {
    fn encode_fields(&self, object: &mut WireObject) -> ProtocolResult<()>;

    fn decode_fields(object: &WireObject) -> ProtocolResult<Self>;
}

pub fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn expect_object(node: &Value) -> ProtocolResult<&WireObject> {
    node.as_object()
        .ok_or_else(|| ProtocolError::type_mismatch("object", node))
}

pub fn expect_array(node: &Value) -> ProtocolResult<&Vec<Value>> {
    node.as_array()
        .ok_or_else(|| ProtocolError::type_mismatch("array", node))
}

pub fn expect_str(node: &Value) -> ProtocolResult<&str> {
    node.as_str()
        .ok_or_else(|| ProtocolError::type_mismatch("string", node))
}

pub fn to_json_string<T: WireCodec>(value: &T) -> ProtocolResult<String> {
    Ok(serde_json::to_string(&value.encode()?)?)
}

pub fn to_json_string_pretty<T: WireCodec>(value: &T) -> ProtocolResult<String> {
    Ok(serde_json::to_string_pretty(&value.encode()?)?)
}

pub fn from_json_str<T: WireCodec>(text: &str) -> ProtocolResult<T> {
    let node: Value = serde_json::from_str(text)?;
    T::decode(&node)
}
