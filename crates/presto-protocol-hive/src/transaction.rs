use presto_protocol::capability::{
    ConnectorMetadataUpdateHandle, ConnectorMetadataUpdateHandleCapability,
    ConnectorTransactionHandle, ConnectorTransactionHandleCapability,
};
use presto_protocol::types::SchemaTableName;
use presto_protocol::{impl_variant, wire_record};
use uuid::Uuid;

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveTransactionHandle {
        pub uuid: Uuid => "uuid",
    }
}

impl HiveTransactionHandle {
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
        }
    }
}

impl Default for HiveTransactionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectorTransactionHandle for HiveTransactionHandle {}

impl_variant!(HiveTransactionHandle => ConnectorTransactionHandleCapability);

wire_record! {
    /// A request from a worker to the coordinator to update metastore state,
    /// such as reserving a unique file name for a partition.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveMetadataUpdateHandle {
        pub request_id: Uuid => "requestId",
        pub schema_table_name: SchemaTableName => "schemaTableName",
        pub partition_name: Option<String> => "partitionName",
        pub file_name: Option<String> => "fileName",
    }
}

impl ConnectorMetadataUpdateHandle for HiveMetadataUpdateHandle {}

impl_variant!(HiveMetadataUpdateHandle => ConnectorMetadataUpdateHandleCapability);
