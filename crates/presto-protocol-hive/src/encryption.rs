use std::collections::BTreeMap;

use presto_protocol::wire::Binary;
use presto_protocol::wire_record;

wire_record! {
    /// Key material for DWRF files, keyed by the encrypted field.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DwrfEncryptionMetadata {
        pub field_to_key_data: BTreeMap<String, Binary> => "fieldToKeyData",
        pub extra_metadata: BTreeMap<String, String> => "extraMetadata",
        pub encryption_algorithm: String => "encryptionAlgorithm",
        pub encryption_provider: String => "encryptionProvider",
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct EncryptionInformation {
        pub dwrf_encryption_metadata: Option<DwrfEncryptionMetadata> => "dwrfEncryptionMetadata",
    }
}
