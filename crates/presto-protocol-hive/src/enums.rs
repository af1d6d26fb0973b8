use presto_protocol::wire_enum;

wire_enum! {
    pub enum ColumnType {
        PartitionKey => "PARTITION_KEY",
        Regular => "REGULAR",
        Synthesized => "SYNTHESIZED",
        Aggregated => "AGGREGATED",
    }
}

wire_enum! {
    pub enum BucketFunctionType {
        HiveCompatible => "HIVE_COMPATIBLE",
        PrestoNative => "PRESTO_NATIVE",
    }
}

wire_enum! {
    pub enum Order {
        Ascending => "ASCENDING",
        Descending => "DESCENDING",
    }
}

wire_enum! {
    pub enum HiveCompressionCodec {
        None => "NONE",
        Snappy => "SNAPPY",
        Gzip => "GZIP",
        Lz4 => "LZ4",
        Zstd => "ZSTD",
    }
}

wire_enum! {
    pub enum HiveStorageFormat {
        Orc => "ORC",
        Dwrf => "DWRF",
        Alpha => "ALPHA",
        Parquet => "PARQUET",
        Avro => "AVRO",
        RcBinary => "RCBINARY",
        RcText => "RCTEXT",
        SequenceFile => "SEQUENCEFILE",
        Json => "JSON",
        TextFile => "TEXTFILE",
        Csv => "CSV",
        PageFile => "PAGEFILE",
    }
}

wire_enum! {
    /// The kind of a table in the metastore.
    pub enum PrestoTableType {
        ManagedTable => "MANAGED_TABLE",
        ExternalTable => "EXTERNAL_TABLE",
        VirtualView => "VIRTUAL_VIEW",
        MaterializedView => "MATERIALIZED_VIEW",
        TemporaryTable => "TEMPORARY_TABLE",
        Other => "OTHER",
    }
}

wire_enum! {
    /// Whether a write targets a new, existing or temporary table.
    pub enum TableType {
        New => "NEW",
        Existing => "EXISTING",
        Temporary => "TEMPORARY",
    }
}

wire_enum! {
    pub enum WriteMode {
        StageAndMoveToTargetDirectory => "STAGE_AND_MOVE_TO_TARGET_DIRECTORY",
        DirectToTargetNewDirectory => "DIRECT_TO_TARGET_NEW_DIRECTORY",
        DirectToTargetExistingDirectory => "DIRECT_TO_TARGET_EXISTING_DIRECTORY",
    }
}

impl HiveStorageFormat {
    /// Formats whose files can be split and read by the native reader.
    pub fn is_columnar(&self) -> bool {
        matches!(
            self,
            HiveStorageFormat::Orc
                | HiveStorageFormat::Dwrf
                | HiveStorageFormat::Alpha
                | HiveStorageFormat::Parquet
        )
    }
}
