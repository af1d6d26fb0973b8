//! Wire records of the Hive connector family.
//!
//! Every capability value of the family is tagged with the configured connector
//! id. Call [`register`] (or [`register_global`]) once at startup, before the
//! first message is decoded.

pub mod column;
pub mod config;
pub mod encryption;
pub mod enums;
pub mod layout;
pub mod metastore;
pub mod partitioning;
pub mod split;
pub mod table;
pub mod transaction;
pub mod write;

use log::debug;
use presto_protocol::capability::{
    ColumnHandleCapability, ConnectorInsertTableHandleCapability,
    ConnectorMetadataUpdateHandleCapability, ConnectorOutputTableHandleCapability,
    ConnectorPartitioningHandleCapability, ConnectorSplitCapability,
    ConnectorTableHandleCapability, ConnectorTableLayoutHandleCapability,
    ConnectorTransactionHandleCapability,
};
use presto_protocol::error::ProtocolResult;
use presto_protocol::registry::CapabilityRegistry;

pub use crate::column::HiveColumnHandle;
pub use crate::config::HiveProtocolConfig;
pub use crate::layout::HiveTableLayoutHandle;
pub use crate::partitioning::HivePartitioningHandle;
pub use crate::split::HiveSplit;
pub use crate::table::HiveTableHandle;
pub use crate::transaction::{HiveMetadataUpdateHandle, HiveTransactionHandle};
pub use crate::write::{HiveInsertTableHandle, HiveOutputTableHandle};

/// Registers every Hive variant with its capability.
pub fn register(registry: &CapabilityRegistry, config: &HiveProtocolConfig) -> ProtocolResult<()> {
    let id = config.connector_id.as_str();
    registry.register::<ColumnHandleCapability, HiveColumnHandle>(id)?;
    registry.register::<ConnectorSplitCapability, HiveSplit>(id)?;
    registry.register::<ConnectorTableHandleCapability, HiveTableHandle>(id)?;
    registry.register::<ConnectorTableLayoutHandleCapability, HiveTableLayoutHandle>(id)?;
    registry.register::<ConnectorInsertTableHandleCapability, HiveInsertTableHandle>(id)?;
    registry.register::<ConnectorOutputTableHandleCapability, HiveOutputTableHandle>(id)?;
    registry.register::<ConnectorPartitioningHandleCapability, HivePartitioningHandle>(id)?;
    registry.register::<ConnectorTransactionHandleCapability, HiveTransactionHandle>(id)?;
    registry.register::<ConnectorMetadataUpdateHandleCapability, HiveMetadataUpdateHandle>(id)?;
    debug!("registered Hive protocol variants as {id}");
    Ok(())
}

/// Registers every Hive variant with the global registry.
pub fn register_global(config: &HiveProtocolConfig) -> ProtocolResult<()> {
    register(CapabilityRegistry::global(), config)
}
