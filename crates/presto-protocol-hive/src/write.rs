//! Handles of the insert and create-table-as-select write paths.

use std::collections::BTreeMap;

use presto_protocol::capability::{
    ConnectorInsertTableHandle, ConnectorInsertTableHandleCapability, ConnectorOutputTableHandle,
    ConnectorOutputTableHandleCapability,
};
use presto_protocol::types::SchemaTableName;
use presto_protocol::{impl_variant, wire_record};

use crate::column::HiveColumnHandle;
use crate::encryption::EncryptionInformation;
use crate::enums::{HiveCompressionCodec, HiveStorageFormat, TableType, WriteMode};
use crate::metastore::{HiveBucketProperty, SortingColumn, Table};

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HivePageSinkMetadata {
        pub schema_table_name: SchemaTableName => "schemaTableName",
        pub table: Option<Table> => "table",
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct LocationHandle {
        pub target_path: String => "targetPath",
        pub write_path: String => "writePath",
        pub temp_path: Option<String> => "tempPath",
        pub table_type: TableType => "tableType",
        pub write_mode: WriteMode => "writeMode",
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveInsertTableHandle {
        pub schema_name: String => "schemaName",
        pub table_name: String => "tableName",
        pub input_columns: Vec<HiveColumnHandle> => "inputColumns",
        pub page_sink_metadata: HivePageSinkMetadata => "pageSinkMetadata",
        pub location_handle: LocationHandle => "locationHandle",
        pub bucket_property: Option<HiveBucketProperty> => "bucketProperty",
        pub preferred_ordering_columns: Vec<SortingColumn> => "preferredOrderingColumns",
        pub table_storage_format: HiveStorageFormat => "tableStorageFormat",
        pub partition_storage_format: HiveStorageFormat => "partitionStorageFormat",
        pub actual_storage_format: HiveStorageFormat => "actualStorageFormat",
        pub compression_codec: HiveCompressionCodec => "compressionCodec",
        pub encryption_information: Option<EncryptionInformation> => "encryptionInformation",
    }
}

impl ConnectorInsertTableHandle for HiveInsertTableHandle {}

impl_variant!(HiveInsertTableHandle => ConnectorInsertTableHandleCapability);

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveOutputTableHandle {
        pub schema_name: String => "schemaName",
        pub table_name: String => "tableName",
        pub input_columns: Vec<HiveColumnHandle> => "inputColumns",
        pub page_sink_metadata: HivePageSinkMetadata => "pageSinkMetadata",
        pub location_handle: LocationHandle => "locationHandle",
        pub table_storage_format: HiveStorageFormat => "tableStorageFormat",
        pub partition_storage_format: HiveStorageFormat => "partitionStorageFormat",
        pub actual_storage_format: HiveStorageFormat => "actualStorageFormat",
        pub compression_codec: HiveCompressionCodec => "compressionCodec",
        pub partitioned_by: Vec<String> => "partitionedBy",
        pub bucket_property: Option<HiveBucketProperty> => "bucketProperty",
        pub preferred_ordering_columns: Vec<SortingColumn> => "preferredOrderingColumns",
        pub table_owner: String => "tableOwner",
        pub additional_table_parameters: BTreeMap<String, String> => "additionalTableParameters",
        pub encryption_information: Option<EncryptionInformation> => "encryptionInformation",
    }
}

impl ConnectorOutputTableHandle for HiveOutputTableHandle {}

impl_variant!(HiveOutputTableHandle => ConnectorOutputTableHandleCapability);
