use std::collections::BTreeMap;
use std::sync::Arc;

use presto_protocol::capability::{ColumnHandle, ConnectorSplit, ConnectorSplitCapability};
use presto_protocol::types::{CacheQuotaRequirement, HostAddress, NodeSelectionStrategy, SplitWeight};
use presto_protocol::{impl_variant, wire_record};

use crate::column::HiveColumnHandle;
use crate::encryption::EncryptionInformation;
use crate::metastore::{Column, Storage};

wire_record! {
    /// The byte range of a file read by one split.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveFileSplit {
        pub path: String => "path",
        pub start: i64 => "start",
        pub length: i64 => "length",
        pub file_size: i64 => "fileSize",
        pub file_modified_time: i64 => "fileModifiedTime",
        pub extra_file_info: Option<String> => "extraFileInfo",
        pub custom_split_info: BTreeMap<String, String> => "customSplitInfo",
        pub affinity_scheduling_file_section_index: i64 => "affinitySchedulingFileSectionIndex",
    }
}

wire_record! {
    /// The value of one partition column. An absent value is SQL `NULL`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HivePartitionKey {
        pub name: String => "name",
        pub value: Option<String> => "value",
    }
}

impl HivePartitionKey {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

wire_record! {
    /// Maps table column indexes to partition column indexes when the partition
    /// schema has drifted from the table schema.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct TableToPartitionMapping {
        pub table_to_partition_columns: Option<BTreeMap<i32, i32>> => "tableToPartitionColumns",
        pub partition_schema_difference: BTreeMap<i32, Column> => "partitionSchemaDifference",
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BucketConversion {
        pub table_bucket_count: i32 => "tableBucketCount",
        pub partition_bucket_count: i32 => "partitionBucketCount",
        pub bucket_column_handles: Vec<HiveColumnHandle> => "bucketColumnHandles",
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveSplit {
        pub file_split: HiveFileSplit => "fileSplit",
        pub database: String => "database",
        pub table: String => "table",
        pub partition_name: String => "partitionName",
        pub storage: Storage => "storage",
        pub partition_keys: Vec<HivePartitionKey> => "partitionKeys",
        pub addresses: Vec<HostAddress> => "addresses",
        pub read_bucket_number: Option<i32> => "readBucketNumber",
        pub table_bucket_number: Option<i32> => "tableBucketNumber",
        pub node_selection_strategy: NodeSelectionStrategy => "nodeSelectionStrategy",
        pub partition_data_column_count: i32 => "partitionDataColumnCount",
        pub table_to_partition_mapping: TableToPartitionMapping => "tableToPartitionMapping",
        pub bucket_conversion: Option<BucketConversion> => "bucketConversion",
        pub s3_select_pushdown_enabled: bool => "s3SelectPushdownEnabled",
        pub cache_quota: CacheQuotaRequirement => "cacheQuota",
        pub encryption_metadata: Option<EncryptionInformation> => "encryptionMetadata",
        pub redundant_column_domains: Vec<Arc<dyn ColumnHandle>> => "redundantColumnDomains",
        pub split_weight: SplitWeight => "splitWeight",
        pub row_id_partition_component: Option<String> => "rowIdPartitionComponent",
    }
}

impl HiveSplit {
    pub fn is_bucketed(&self) -> bool {
        self.read_bucket_number.is_some()
    }

    pub fn partition_key(&self, name: &str) -> Option<&HivePartitionKey> {
        self.partition_keys.iter().find(|x| x.name == name)
    }
}

impl ConnectorSplit for HiveSplit {}

impl_variant!(HiveSplit => ConnectorSplitCapability);
