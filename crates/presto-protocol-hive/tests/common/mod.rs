#![allow(dead_code)]

use std::collections::BTreeMap;

use presto_protocol::error::ProtocolResult;
use presto_protocol::types::{Subfield, TypeSignature};
use presto_protocol_hive::enums::{ColumnType, PrestoTableType};
use presto_protocol_hive::metastore::{Column, HiveType, Storage, StorageFormat, Table};
use presto_protocol_hive::{register_global, HiveColumnHandle, HiveProtocolConfig};
use serde_json::{json, Value};

pub fn setup() -> ProtocolResult<()> {
    register_global(&HiveProtocolConfig::default())
}

pub fn storage() -> Storage {
    Storage {
        storage_format: StorageFormat {
            serde: "org.apache.hadoop.hive.ql.io.orc.OrcSerde".to_string(),
            input_format: "org.apache.hadoop.hive.ql.io.orc.OrcInputFormat".to_string(),
            output_format: "org.apache.hadoop.hive.ql.io.orc.OrcOutputFormat".to_string(),
        },
        location: "/data".to_string(),
        bucket_property: None,
        skewed: false,
        serde_parameters: BTreeMap::new(),
        parameters: BTreeMap::new(),
    }
}

pub fn storage_node() -> Value {
    json!({
        "storageFormat": {
            "serDe": "org.apache.hadoop.hive.ql.io.orc.OrcSerde",
            "inputFormat": "org.apache.hadoop.hive.ql.io.orc.OrcInputFormat",
            "outputFormat": "org.apache.hadoop.hive.ql.io.orc.OrcOutputFormat",
        },
        "location": "/data",
        "skewed": false,
        "serdeParameters": {},
        "parameters": {},
    })
}

pub fn column(name: &str, hive_type: &str) -> Column {
    Column {
        name: name.to_string(),
        column_type: HiveType::new(hive_type),
        comment: None,
        type_metadata: None,
    }
}

pub fn table() -> Table {
    Table {
        database_name: "sales".to_string(),
        table_name: "orders".to_string(),
        owner: "etl".to_string(),
        table_type: PrestoTableType::ManagedTable,
        storage: storage(),
        data_columns: vec![column("id", "bigint"), column("amount", "double")],
        partition_columns: vec![column("ds", "string")],
        parameters: BTreeMap::new(),
        view_original_text: None,
        view_expanded_text: None,
    }
}

pub fn column_handle(name: &str, index: i32, column_type: ColumnType) -> HiveColumnHandle {
    HiveColumnHandle {
        name: name.to_string(),
        hive_type: HiveType::new("string"),
        type_signature: TypeSignature::new("varchar"),
        hive_column_index: index,
        column_type,
        comment: None,
        required_subfields: vec![],
        partial_aggregation: None,
    }
}

pub fn populated_column_handle(name: &str) -> HiveColumnHandle {
    HiveColumnHandle {
        name: name.to_string(),
        hive_type: HiveType::new("struct<city:string,zip:int>"),
        type_signature: TypeSignature::new("row(city varchar,zip integer)"),
        hive_column_index: 4,
        column_type: ColumnType::Regular,
        comment: Some("shipping address".to_string()),
        required_subfields: vec![Subfield::new(format!("{name}.city"))],
        partial_aggregation: Some(json!({"call": {"displayName": "count"}}).into()),
    }
}
