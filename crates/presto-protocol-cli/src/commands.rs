use std::io::Read;
use std::path::Path;

use clap::ValueEnum;
use presto_protocol::capability::{
    Capability, ColumnHandleCapability, ConnectorInsertTableHandleCapability,
    ConnectorMetadataUpdateHandleCapability, ConnectorOutputTableHandleCapability,
    ConnectorPartitioningHandleCapability, ConnectorSplitCapability,
    ConnectorTableHandleCapability, ConnectorTableLayoutHandleCapability,
    ConnectorTransactionHandleCapability,
};
use presto_protocol::error::{ProtocolError, ProtocolResult};
use presto_protocol::registry::CapabilityRegistry;
use presto_protocol::testing::assert_capability_round_trip;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CapabilityArg {
    ColumnHandle,
    Split,
    TableHandle,
    TableLayoutHandle,
    InsertTableHandle,
    OutputTableHandle,
    PartitioningHandle,
    TransactionHandle,
    MetadataUpdateHandle,
}

/// Calls a generic function with the capability marker selected by a [`CapabilityArg`].
macro_rules! dispatch {
    ($arg:expr, $f:ident($($x:expr),*)) => {
        match $arg {
            CapabilityArg::ColumnHandle => $f::<ColumnHandleCapability>($($x),*),
            CapabilityArg::Split => $f::<ConnectorSplitCapability>($($x),*),
            CapabilityArg::TableHandle => $f::<ConnectorTableHandleCapability>($($x),*),
            CapabilityArg::TableLayoutHandle => $f::<ConnectorTableLayoutHandleCapability>($($x),*),
            CapabilityArg::InsertTableHandle => $f::<ConnectorInsertTableHandleCapability>($($x),*),
            CapabilityArg::OutputTableHandle => $f::<ConnectorOutputTableHandleCapability>($($x),*),
            CapabilityArg::PartitioningHandle => {
                $f::<ConnectorPartitioningHandleCapability>($($x),*)
            }
            CapabilityArg::TransactionHandle => {
                $f::<ConnectorTransactionHandleCapability>($($x),*)
            }
            CapabilityArg::MetadataUpdateHandle => {
                $f::<ConnectorMetadataUpdateHandleCapability>($($x),*)
            }
        }
    };
}

pub fn read_input(file: Option<&Path>) -> ProtocolResult<Value> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            ProtocolError::invalid(format!("failed to read {}: {e}", path.display()))
        })?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| ProtocolError::invalid(format!("failed to read stdin: {e}")))?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}

pub fn decode(
    registry: &CapabilityRegistry,
    capability: CapabilityArg,
    node: &Value,
) -> ProtocolResult<String> {
    dispatch!(capability, decode_as(registry, node))
}

fn decode_as<C: Capability>(registry: &CapabilityRegistry, node: &Value) -> ProtocolResult<String> {
    let value = registry.decode::<C>(node)?;
    Ok(format!("{value:#?}"))
}

pub fn round_trip(
    registry: &CapabilityRegistry,
    capability: CapabilityArg,
    node: &Value,
    compact: bool,
) -> ProtocolResult<String> {
    let node = dispatch!(capability, round_trip_as(registry, node))?;
    if compact {
        Ok(serde_json::to_string(&node)?)
    } else {
        Ok(serde_json::to_string_pretty(&node)?)
    }
}

fn round_trip_as<C: Capability>(
    registry: &CapabilityRegistry,
    node: &Value,
) -> ProtocolResult<Value> {
    let value = registry.decode::<C>(node)?;
    assert_capability_round_trip::<C>(registry, &*value)
}

pub fn variants(registry: &CapabilityRegistry, capability: Option<CapabilityArg>) -> String {
    let capabilities = match capability {
        Some(x) => vec![x],
        None => CapabilityArg::value_variants().to_vec(),
    };
    capabilities
        .into_iter()
        .map(|x| dispatch!(x, variants_of(registry)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn variants_of<C: Capability>(registry: &CapabilityRegistry) -> String {
    format!("{}: {}", C::NAME, registry.discriminators::<C>().join(", "))
}
