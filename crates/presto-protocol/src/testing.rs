//! Round-trip checks for codec types and capability values.
//!
//! The checks return an error describing the first difference instead of
//! panicking, so they can be used from tests and from tools alike.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use serde_json::Value;

use crate::capability::Capability;
use crate::error::{ProtocolError, ProtocolResult};
use crate::object::DynObject;
use crate::registry::CapabilityRegistry;
use crate::wire::{WireCodec, DISCRIMINATOR_KEY};

/// Encodes and decodes a value.
pub fn round_trip<T: WireCodec>(value: &T) -> ProtocolResult<T> {
    T::decode(&value.encode()?)
}

/// Checks that a value survives encoding and that re-encoding the decoded
/// value yields the same wire node. Returns the wire node.
pub fn assert_round_trip<T>(value: &T) -> ProtocolResult<Value>
where
    T: WireCodec + PartialEq + Debug,
{
    let node = value.encode()?;
    let decoded = T::decode(&node)?;
    if &decoded != value {
        return Err(ProtocolError::internal(format!(
            "round trip changed the value: {value:?} became {decoded:?}"
        )));
    }
    check_stable(&node, &decoded.encode()?)?;
    Ok(node)
}

/// Checks a capability value against a registry: the encoded node starts with
/// the registered discriminator, decodes to the same concrete variant with
/// equal fields, and re-encodes to the same node. Returns the wire node.
pub fn assert_capability_round_trip<C: Capability>(
    registry: &CapabilityRegistry,
    value: &C::Object,
) -> ProtocolResult<Value> {
    let node = registry.encode::<C>(value)?;
    let expected = registry.discriminator_of::<C>(value).ok_or_else(|| {
        ProtocolError::internal(format!(
            "{} variant {} is not registered",
            C::NAME,
            value.dyn_object_type_name()
        ))
    })?;
    let first = node.as_object().and_then(|x| x.iter().next());
    match first {
        Some((key, Value::String(found))) if key == DISCRIMINATOR_KEY && found == &expected => {}
        _ => {
            return Err(ProtocolError::internal(format!(
                "{} value is not tagged with {DISCRIMINATOR_KEY} {expected} first: {node}",
                C::NAME
            )))
        }
    }
    let decoded: Arc<C::Object> = registry.decode::<C>(&node)?;
    let decoded: &C::Object = decoded.as_ref();
    if Any::type_id(decoded.dyn_object_as_any()) != Any::type_id(value.dyn_object_as_any()) {
        return Err(ProtocolError::internal(format!(
            "{} value {} decoded as {}",
            C::NAME,
            value.dyn_object_type_name(),
            decoded.dyn_object_type_name()
        )));
    }
    if decoded != value {
        return Err(ProtocolError::internal(format!(
            "round trip changed the {} value: {value:?} became {decoded:?}",
            C::NAME
        )));
    }
    check_stable(&node, &registry.encode::<C>(decoded)?)?;
    Ok(node)
}

/// Decodes a wire node, re-encodes it, and checks that the result matches.
pub fn assert_node_round_trip<T: WireCodec>(node: &Value) -> ProtocolResult<T> {
    let value = T::decode(node)?;
    check_stable(node, &value.encode()?)?;
    Ok(value)
}

fn check_stable(expected: &Value, actual: &Value) -> ProtocolResult<()> {
    if expected != actual {
        return Err(ProtocolError::internal(format!(
            "re-encoding is not stable: {expected} became {actual}"
        )));
    }
    Ok(())
}
