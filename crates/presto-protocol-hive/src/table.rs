use presto_protocol::capability::{ConnectorTableHandle, ConnectorTableHandleCapability};
use presto_protocol::types::SchemaTableName;
use presto_protocol::{impl_variant, wire_record};

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveTableHandle {
        pub schema_name: String => "schemaName",
        pub table_name: String => "tableName",
        /// The partition values to analyze, one list of values per partition.
        pub analyze_partition_values: Option<Vec<Vec<String>>> => "analyzePartitionValues",
    }
}

impl HiveTableHandle {
    pub fn schema_table_name(&self) -> SchemaTableName {
        SchemaTableName::new(&self.schema_name, &self.table_name)
    }
}

impl ConnectorTableHandle for HiveTableHandle {}

impl_variant!(HiveTableHandle => ConnectorTableHandleCapability);
