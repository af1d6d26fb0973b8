//! Abstract capabilities carried polymorphically on the wire.
//!
//! A capability is a trait implemented by connector-specific records. Values are
//! held as shared trait objects (`Arc<dyn ColumnHandle>`, ...) and encoded with a
//! discriminator that the [`CapabilityRegistry`] maps back to the concrete record
//! when decoding. The set of capabilities is closed; the set of variants is open.

use std::fmt::Debug;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ProtocolResult;
use crate::impl_dyn_object_traits;
use crate::object::DynObject;
use crate::registry::{CapabilityRegistry, VariantTable};
use crate::wire::{WireCodec, WireRecord};

/// The common supertrait of every capability.
pub trait ConnectorObject: DynObject + Debug + Send + Sync {}

impl<T: DynObject + Debug + Send + Sync> ConnectorObject for T {}

/// A column of a connector table.
///
/// Column handles are kept in ordered sets and maps, so every variant exposes the
/// name that defines the ordering. See [`crate::ordering`].
pub trait ColumnHandle: ConnectorObject {
    fn name(&self) -> &str;
}

pub trait ConnectorSplit: ConnectorObject {}

pub trait ConnectorTableHandle: ConnectorObject {}

pub trait ConnectorTableLayoutHandle: ConnectorObject {}

pub trait ConnectorInsertTableHandle: ConnectorObject {}

pub trait ConnectorOutputTableHandle: ConnectorObject {}

pub trait ConnectorPartitioningHandle: ConnectorObject {}

pub trait ConnectorTransactionHandle: ConnectorObject {}

pub trait ConnectorMetadataUpdateHandle: ConnectorObject {}

/// A marker type naming one capability.
pub trait Capability: Send + Sync + 'static {
    /// The trait object type of the capability values.
    type Object: ?Sized + ConnectorObject + PartialEq;

    /// The capability name used in error messages.
    const NAME: &'static str;

    fn variants(registry: &CapabilityRegistry) -> &VariantTable<Self::Object>;
}

/// A concrete record that can be carried by the capability `C`.
/// Implement it with [`impl_variant!`](crate::impl_variant).
pub trait Variant<C: Capability>: WireRecord + ConnectorObject {
    fn into_object(self: Arc<Self>) -> Arc<C::Object>;
}

/// Implements [`Variant`] for a record that already implements the capability trait.
#[macro_export]
macro_rules! impl_variant {
    ($ty:ty => $capability:ty) => {
        impl $crate::capability::Variant<$capability> for $ty {
            fn into_object(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::sync::Arc<<$capability as $crate::capability::Capability>::Object> {
                self
            }
        }
    };
}

macro_rules! define_capabilities {
    ($($(#[$meta:meta])* $marker:ident => $object:ident, $table:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $marker;

            impl Capability for $marker {
                type Object = dyn $object;

                const NAME: &'static str = stringify!($object);

                fn variants(registry: &CapabilityRegistry) -> &VariantTable<Self::Object> {
                    &registry.tables.$table
                }
            }

            impl_dyn_object_traits!($object);

            /// Nested capability values resolve through the active registry.
            impl WireCodec for Arc<dyn $object> {
                fn encode(&self) -> ProtocolResult<Value> {
                    CapabilityRegistry::active().encode::<$marker>(self.as_ref())
                }

                fn decode(node: &Value) -> ProtocolResult<Self> {
                    CapabilityRegistry::active().decode::<$marker>(node)
                }
            }
        )*
    };
}

define_capabilities! {
    ColumnHandleCapability => ColumnHandle, column_handles;
    ConnectorSplitCapability => ConnectorSplit, splits;
    ConnectorTableHandleCapability => ConnectorTableHandle, table_handles;
    ConnectorTableLayoutHandleCapability => ConnectorTableLayoutHandle, table_layout_handles;
    ConnectorInsertTableHandleCapability => ConnectorInsertTableHandle, insert_table_handles;
    ConnectorOutputTableHandleCapability => ConnectorOutputTableHandle, output_table_handles;
    ConnectorPartitioningHandleCapability => ConnectorPartitioningHandle, partitioning_handles;
    ConnectorTransactionHandleCapability => ConnectorTransactionHandle, transaction_handles;
    ConnectorMetadataUpdateHandleCapability => ConnectorMetadataUpdateHandle, metadata_update_handles;
}
