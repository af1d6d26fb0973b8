use std::collections::BTreeMap;

use presto_protocol::capability::{ConnectorTableLayoutHandle, ConnectorTableLayoutHandleCapability};
use presto_protocol::ordering::OrderedColumnHandle;
use presto_protocol::types::{RowExpression, SchemaTableName, Subfield, TupleDomain};
use presto_protocol::{impl_variant, wire_record};

use crate::column::HiveColumnHandle;
use crate::metastore::Column;

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveBucketHandle {
        pub columns: Vec<HiveColumnHandle> => "columns",
        pub table_bucket_count: i32 => "tableBucketCount",
        pub read_bucket_count: i32 => "readBucketCount",
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct HiveBucketFilter {
        pub buckets_to_keep: Vec<i32> => "bucketsToKeep",
    }
}

wire_record! {
    /// A table scan after predicate and projection pushdown.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveTableLayoutHandle {
        pub schema_table_name: SchemaTableName => "schemaTableName",
        pub table_path: String => "tablePath",
        pub partition_columns: Vec<HiveColumnHandle> => "partitionColumns",
        pub data_columns: Vec<Column> => "dataColumns",
        pub table_parameters: BTreeMap<String, String> => "tableParameters",
        pub domain_predicate: TupleDomain<Subfield> => "domainPredicate",
        pub remaining_predicate: Option<RowExpression> => "remainingPredicate",
        pub predicate_columns: BTreeMap<String, HiveColumnHandle> => "predicateColumns",
        pub partition_column_predicate: TupleDomain<OrderedColumnHandle> => "partitionColumnPredicate",
        pub bucket_handle: Option<HiveBucketHandle> => "bucketHandle",
        pub bucket_filter: Option<HiveBucketFilter> => "bucketFilter",
        pub pushdown_filter_enabled: bool => "pushdownFilterEnabled",
        pub layout_string: String => "layoutString",
        pub requested_columns: Option<Vec<HiveColumnHandle>> => "requestedColumns",
        pub partial_aggregations_pushed_down: bool => "partialAggregationsPushedDown",
        pub append_row_number: bool => "appendRowNumber",
        pub footer_stats_unreliable: bool => "footerStatsUnreliable",
    }
}

impl ConnectorTableLayoutHandle for HiveTableLayoutHandle {}

impl_variant!(HiveTableLayoutHandle => ConnectorTableLayoutHandleCapability);
