//! The total order of column handles.
//!
//! Column handles are ordered by name, whatever connector produced them. The
//! comparison takes two `dyn ColumnHandle` values, so comparing a column handle
//! with a value of another capability is rejected by the type checker.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::Value;

use crate::capability::ColumnHandle;
use crate::error::ProtocolResult;
use crate::wire::WireCodec;

pub fn compare_column_handles(left: &dyn ColumnHandle, right: &dyn ColumnHandle) -> Ordering {
    left.name().cmp(right.name())
}

/// A column handle that is equal, ordered and hashed by name only, for use as
/// the key of ordered sets and maps.
///
/// Two handles with the same name are the same key even if they are different
/// variants or differ in other fields.
#[derive(Debug, Clone)]
pub struct OrderedColumnHandle(Arc<dyn ColumnHandle>);

impl OrderedColumnHandle {
    pub fn new(handle: Arc<dyn ColumnHandle>) -> Self {
        Self(handle)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn handle(&self) -> &Arc<dyn ColumnHandle> {
        &self.0
    }

    pub fn into_handle(self) -> Arc<dyn ColumnHandle> {
        self.0
    }
}

impl From<Arc<dyn ColumnHandle>> for OrderedColumnHandle {
    fn from(value: Arc<dyn ColumnHandle>) -> Self {
        Self(value)
    }
}

impl PartialEq for OrderedColumnHandle {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedColumnHandle {}

impl PartialOrd for OrderedColumnHandle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedColumnHandle {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_column_handles(self.0.as_ref(), other.0.as_ref())
    }
}

impl Hash for OrderedColumnHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state)
    }
}

impl WireCodec for OrderedColumnHandle {
    fn encode(&self) -> ProtocolResult<Value> {
        self.0.encode()
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        Arc::<dyn ColumnHandle>::decode(node).map(Self)
    }
}
