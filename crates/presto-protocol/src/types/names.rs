use std::fmt;

use serde_json::Value;

use crate::error::ProtocolResult;
use crate::wire::{expect_str, WireCodec};
use crate::wire_record;

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct SchemaTableName {
        pub schema: String => "schema",
        pub table: String => "table",
    }
}

impl SchemaTableName {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for SchemaTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// A normalized engine type such as `bigint`, `varchar(10)` or `map(varchar,array(integer))`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeSignature(String);

impl TypeSignature {
    pub fn new(signature: impl Into<String>) -> Self {
        Self(signature.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type name without parameters, e.g. `varchar` for `varchar(10)`.
    pub fn base(&self) -> &str {
        match self.0.find('(') {
            Some(i) => self.0[..i].trim(),
            None => self.0.trim(),
        }
    }

    /// The top-level parameters, e.g. `["varchar", "array(integer)"]` for
    /// `map(varchar,array(integer))`. Nested parentheses are kept intact.
    pub fn parameters(&self) -> Vec<&str> {
        let Some(start) = self.0.find('(') else {
            return vec![];
        };
        let Some(end) = self.0.rfind(')') else {
            return vec![];
        };
        if end <= start {
            return vec![];
        }
        let inner = &self.0[start + 1..end];
        let mut out = vec![];
        let mut depth = 0usize;
        let mut from = 0;
        for (i, c) in inner.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    out.push(inner[from..i].trim());
                    from = i + 1;
                }
                _ => {}
            }
        }
        let last = inner[from..].trim();
        if !last.is_empty() || !out.is_empty() {
            out.push(last);
        }
        out
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl WireCodec for TypeSignature {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::String(self.0.clone()))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        expect_str(node).map(Self::new)
    }
}

/// A path into a nested column such as `info.address["city"]` or `items[1].price`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subfield(String);

impl Subfield {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name of the top-level column the path starts from.
    pub fn root_name(&self) -> &str {
        match self.0.find(['.', '[']) {
            Some(i) => &self.0[..i],
            None => &self.0,
        }
    }
}

impl fmt::Display for Subfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl WireCodec for Subfield {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::String(self.0.clone()))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        expect_str(node).map(Self::new)
    }
}
