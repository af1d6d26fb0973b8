//! Metastore records embedded in splits and write handles.

use std::collections::BTreeMap;
use std::fmt;

use presto_protocol::error::{ProtocolError, ProtocolResult};
use presto_protocol::types::TypeSignature;
use presto_protocol::wire::{expect_str, Value, WireCodec};
use presto_protocol::wire_record;

use crate::enums::{BucketFunctionType, Order, PrestoTableType};

/// A Hive type name such as `string`, `array<int>` or `map<string,bigint>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HiveType(String);

impl HiveType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl WireCodec for HiveType {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::String(self.0.clone()))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        expect_str(node).map(Self::new)
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct StorageFormat {
        pub serde: String => "serDe",
        pub input_format: String => "inputFormat",
        pub output_format: String => "outputFormat",
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SortingColumn {
        pub column_name: String => "columnName",
        pub order: Order => "order",
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HiveBucketProperty {
        pub bucketed_by: Vec<String> => "bucketedBy",
        pub bucket_count: i32 => "bucketCount",
        pub sorted_by: Vec<SortingColumn> => "sortedBy",
        pub bucket_function_type: BucketFunctionType => "bucketFunctionType",
        pub types: Option<Vec<TypeSignature>> => "types",
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Storage {
        pub storage_format: StorageFormat => "storageFormat",
        pub location: String => "location",
        pub bucket_property: Option<HiveBucketProperty> => "bucketProperty",
        pub skewed: bool => "skewed",
        pub serde_parameters: BTreeMap<String, String> => "serdeParameters",
        pub parameters: BTreeMap<String, String> => "parameters",
    }
}

wire_record! {
    /// A column as stored in the metastore.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Column {
        pub name: String => "name",
        pub column_type: HiveType => "type",
        pub comment: Option<String> => "comment",
        pub type_metadata: Option<String> => "typeMetadata",
    }
}

wire_record! {
    /// A metastore table. View texts may only be present when the table type is a view.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Table {
        pub database_name: String => "databaseName",
        pub table_name: String => "tableName",
        pub owner: String => "owner",
        pub table_type: PrestoTableType => "tableType",
        pub storage: Storage => "storage",
        pub data_columns: Vec<Column> => "dataColumns",
        pub partition_columns: Vec<Column> => "partitionColumns",
        pub parameters: BTreeMap<String, String> => "parameters",
        pub view_original_text: Option<String> => "viewOriginalText",
        pub view_expanded_text: Option<String> => "viewExpandedText",
    }
    validate = Table::validate_view_texts;
}

impl Table {
    pub fn is_view(&self) -> bool {
        matches!(
            self.table_type,
            PrestoTableType::VirtualView | PrestoTableType::MaterializedView
        )
    }

    fn validate_view_texts(&self) -> ProtocolResult<()> {
        if self.is_view() {
            return Ok(());
        }
        let key = match (&self.view_original_text, &self.view_expanded_text) {
            (Some(_), _) => "viewOriginalText",
            (None, Some(_)) => "viewExpandedText",
            (None, None) => return Ok(()),
        };
        Err(ProtocolError::invalid(format!(
            "{key} is only allowed for views, found table type {}",
            self.table_type
        )))
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.data_columns
            .iter()
            .chain(self.partition_columns.iter())
            .find(|x| x.name == name)
    }
}

#[cfg(test)]
mod tests {
    use presto_protocol::error::{ProtocolErrorKind, ProtocolResult};
    use presto_protocol::testing::assert_round_trip;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_column_wire_keys() -> ProtocolResult<()> {
        let column = Column::decode(&json!({"name": "ds", "type": "string"}))?;
        assert_eq!(column.column_type.as_str(), "string");
        assert_eq!(column.comment, None);
        assert_eq!(assert_round_trip(&column)?, json!({"name": "ds", "type": "string"}));
        Ok(())
    }

    #[test]
    fn test_storage_null_bucket_property_is_rejected() {
        let node = json!({
            "storageFormat": {"serDe": "s", "inputFormat": "i", "outputFormat": "o"},
            "location": "/warehouse/t",
            "bucketProperty": null,
            "skewed": false,
            "serdeParameters": {},
            "parameters": {},
        });
        let error = Storage::decode(&node).err();
        assert_eq!(error.as_ref().map(|e| e.kind()), Some(ProtocolErrorKind::TypeMismatch));
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("type mismatch at $.bucketProperty: expected value or absent key, found null".to_string())
        );
    }

    #[test]
    fn test_sorting_column_order() {
        let error = SortingColumn::decode(&json!({"columnName": "ts", "order": "SIDEWAYS"})).err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("unknown Order value at $.order: SIDEWAYS".to_string())
        );
    }
}
