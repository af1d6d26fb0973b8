pub mod capability;
pub mod error;
pub mod object;
pub mod ordering;
pub mod registry;
pub mod testing;
pub mod types;
pub mod wire;

pub use capability::{
    Capability, ColumnHandle, ColumnHandleCapability, ConnectorInsertTableHandle,
    ConnectorInsertTableHandleCapability, ConnectorMetadataUpdateHandle,
    ConnectorMetadataUpdateHandleCapability, ConnectorObject, ConnectorOutputTableHandle,
    ConnectorOutputTableHandleCapability, ConnectorPartitioningHandle,
    ConnectorPartitioningHandleCapability, ConnectorSplit, ConnectorSplitCapability,
    ConnectorTableHandle, ConnectorTableHandleCapability, ConnectorTableLayoutHandle,
    ConnectorTableLayoutHandleCapability, ConnectorTransactionHandle,
    ConnectorTransactionHandleCapability, Variant,
};
pub use error::{ProtocolError, ProtocolErrorKind, ProtocolResult};
pub use ordering::{compare_column_handles, OrderedColumnHandle};
pub use registry::{decode_capability, encode_capability, CapabilityRegistry};
pub use wire::{WireCodec, WireRecord, DISCRIMINATOR_KEY};
