//! Protocol types shared by connector families.

mod domain;
mod names;
mod opaque;
mod split;

pub use domain::{ColumnDomain, Domain, TupleDomain};
pub use names::{SchemaTableName, Subfield, TypeSignature};
pub use opaque::{Aggregation, Opaque, RowExpression, ValueSet};
pub use split::{
    CacheQuotaRequirement, CacheQuotaScope, DataSize, HostAddress, NodeSelectionStrategy,
    SplitWeight,
};
