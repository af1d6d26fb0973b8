use presto_protocol::capability::{ColumnHandle, ColumnHandleCapability};
use presto_protocol::types::{Aggregation, Subfield, TypeSignature};
use presto_protocol::{impl_variant, wire_record};

use crate::enums::ColumnType;
use crate::metastore::HiveType;

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveColumnHandle {
        pub name: String => "name",
        pub hive_type: HiveType => "hiveType",
        pub type_signature: TypeSignature => "typeSignature",
        pub hive_column_index: i32 => "hiveColumnIndex",
        pub column_type: ColumnType => "columnType",
        pub comment: Option<String> => "comment",
        pub required_subfields: Vec<Subfield> => "requiredSubfields",
        pub partial_aggregation: Option<Aggregation> => "partialAggregation",
    }
}

impl HiveColumnHandle {
    pub fn is_partition_key(&self) -> bool {
        self.column_type == ColumnType::PartitionKey
    }
}

impl ColumnHandle for HiveColumnHandle {
    fn name(&self) -> &str {
        &self.name
    }
}

impl_variant!(HiveColumnHandle => ColumnHandleCapability);
