use serde_json::Value;

use crate::error::ProtocolResult;
use crate::wire::WireCodec;

/// A wire subtree owned by another subsystem and carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque(Value);

impl Opaque {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The discriminator of a polymorphic subtree such as a row expression.
    pub fn type_tag(&self) -> Option<&str> {
        self.0
            .get(crate::wire::DISCRIMINATOR_KEY)
            .and_then(Value::as_str)
    }
}

impl From<Value> for Opaque {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl WireCodec for Opaque {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(self.0.clone())
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        Ok(Self(node.clone()))
    }
}

/// A residual filter expression tree.
pub type RowExpression = Opaque;

/// The set of values allowed by a domain.
pub type ValueSet = Opaque;

/// A partial aggregation pushed into a scan.
pub type Aggregation = Opaque;
