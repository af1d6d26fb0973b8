use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;
use log::{debug, trace, warn};
use serde_json::Value;

use crate::capability::{Capability, Variant};
use crate::error::{ProtocolError, ProtocolResult};
use crate::object::DynObject;
use crate::wire::{expect_object, WireObject, DISCRIMINATOR_KEY};

type EncodeFn<O> = fn(&O, &mut WireObject) -> ProtocolResult<()>;
type DecodeFn<O> = fn(&WireObject) -> ProtocolResult<Arc<O>>;

struct VariantEntry<O: ?Sized> {
    discriminator: String,
    type_id: TypeId,
    type_name: &'static str,
    encode: EncodeFn<O>,
    decode: DecodeFn<O>,
}

struct VariantIndex<O: ?Sized> {
    by_discriminator: HashMap<String, Arc<VariantEntry<O>>>,
    by_type: HashMap<TypeId, Arc<VariantEntry<O>>>,
}

/// The registered variants of one capability.
pub struct VariantTable<O: ?Sized> {
    index: RwLock<VariantIndex<O>>,
}

impl<O: ?Sized> Default for VariantTable<O> {
    fn default() -> Self {
        Self {
            index: RwLock::new(VariantIndex {
                by_discriminator: HashMap::new(),
                by_type: HashMap::new(),
            }),
        }
    }
}

impl<O: ?Sized> VariantTable<O> {
    fn by_discriminator(&self, discriminator: &str) -> Option<Arc<VariantEntry<O>>> {
        let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
        index.by_discriminator.get(discriminator).cloned()
    }

    fn by_type(&self, type_id: TypeId) -> Option<Arc<VariantEntry<O>>> {
        let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
        index.by_type.get(&type_id).cloned()
    }

    fn discriminators(&self) -> Vec<String> {
        let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
        let mut out = index.by_discriminator.keys().cloned().collect::<Vec<_>>();
        out.sort();
        out
    }
}

#[derive(Default)]
pub(crate) struct VariantTables {
    pub(crate) column_handles: VariantTable<dyn crate::capability::ColumnHandle>,
    pub(crate) splits: VariantTable<dyn crate::capability::ConnectorSplit>,
    pub(crate) table_handles: VariantTable<dyn crate::capability::ConnectorTableHandle>,
    pub(crate) table_layout_handles:
        VariantTable<dyn crate::capability::ConnectorTableLayoutHandle>,
    pub(crate) insert_table_handles:
        VariantTable<dyn crate::capability::ConnectorInsertTableHandle>,
    pub(crate) output_table_handles:
        VariantTable<dyn crate::capability::ConnectorOutputTableHandle>,
    pub(crate) partitioning_handles:
        VariantTable<dyn crate::capability::ConnectorPartitioningHandle>,
    pub(crate) transaction_handles:
        VariantTable<dyn crate::capability::ConnectorTransactionHandle>,
    pub(crate) metadata_update_handles:
        VariantTable<dyn crate::capability::ConnectorMetadataUpdateHandle>,
}

/// Maps the discriminator of every registered variant to its codec, per capability.
///
/// The registry is append-only. Registration is idempotent and the order in which
/// connectors register does not matter, but registration of a variant must finish
/// before the first value of that variant is decoded.
///
/// Clones share the same variant tables.
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    pub(crate) tables: Arc<VariantTables>,
}

lazy_static! {
    static ref GLOBAL_REGISTRY: CapabilityRegistry = CapabilityRegistry::new();
}

thread_local! {
    static ACTIVE_REGISTRIES: RefCell<Vec<CapabilityRegistry>> = const { RefCell::new(Vec::new()) };
}

/// Pops the active registry when dropped.
struct ActiveRegistryGuard;

impl Drop for ActiveRegistryGuard {
    fn drop(&mut self) {
        ACTIVE_REGISTRIES.with(|x| {
            x.borrow_mut().pop();
        });
    }
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static CapabilityRegistry {
        &GLOBAL_REGISTRY
    }

    /// The registry that capability values nested inside records resolve through
    /// on the current thread.
    ///
    /// This is the registry encoding or decoding the enclosing capability value,
    /// or the registry passed to [`CapabilityRegistry::scope`], and falls back to
    /// the global registry otherwise.
    pub fn active() -> CapabilityRegistry {
        ACTIVE_REGISTRIES
            .with(|x| x.borrow().last().cloned())
            .unwrap_or_else(|| Self::global().clone())
    }

    /// Runs `f` with this registry as the [active](CapabilityRegistry::active) one,
    /// so that plain records holding capability values can be encoded or decoded
    /// against it.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.enter();
        f()
    }

    fn enter(&self) -> ActiveRegistryGuard {
        ACTIVE_REGISTRIES.with(|x| x.borrow_mut().push(self.clone()));
        ActiveRegistryGuard
    }

    /// Registers the record `T` as the variant of capability `C` named `discriminator`.
    ///
    /// Registering the same pair again is a no-op. A discriminator can only name one
    /// record, and a record can only have one discriminator, per capability.
    pub fn register<C, T>(&self, discriminator: impl Into<String>) -> ProtocolResult<()>
    where
        C: Capability,
        T: Variant<C>,
    {
        let discriminator = discriminator.into();
        let type_id = TypeId::of::<T>();
        let type_name = type_name::<T>();
        let table = C::variants(self);
        let mut index = table.index.write().unwrap_or_else(PoisonError::into_inner);

        let existing_by_name = index.by_discriminator.get(&discriminator);
        let existing_by_type = index.by_type.get(&type_id);
        match (existing_by_name, existing_by_type) {
            (Some(entry), _) if entry.type_id != type_id => {
                warn!(
                    "{} discriminator {discriminator} is already bound to {}",
                    C::NAME,
                    entry.type_name
                );
                return Err(ProtocolError::conflict(
                    C::NAME,
                    format!(
                        "discriminator {discriminator} is already bound to {}",
                        entry.type_name
                    ),
                ));
            }
            (_, Some(entry)) if entry.discriminator != discriminator => {
                warn!(
                    "{} variant {type_name} is already registered as {}",
                    C::NAME,
                    entry.discriminator
                );
                return Err(ProtocolError::conflict(
                    C::NAME,
                    format!(
                        "{type_name} is already registered as {}",
                        entry.discriminator
                    ),
                ));
            }
            (Some(_), Some(_)) => {
                trace!("{} variant {discriminator} is already registered", C::NAME);
                return Ok(());
            }
            _ => {}
        }

        let entry = Arc::new(VariantEntry {
            discriminator: discriminator.clone(),
            type_id,
            type_name,
            encode: encode_variant::<C, T>,
            decode: decode_variant::<C, T>,
        });
        index.by_type.insert(type_id, Arc::clone(&entry));
        index.by_discriminator.insert(discriminator.clone(), entry);
        debug!("registered {} variant {discriminator} ({type_name})", C::NAME);
        Ok(())
    }

    /// Encodes a capability value as an object whose first key is the discriminator.
    pub fn encode<C: Capability>(&self, value: &C::Object) -> ProtocolResult<Value> {
        let type_id = Any::type_id(value.dyn_object_as_any());
        let entry = C::variants(self)
            .by_type(type_id)
            .ok_or_else(|| ProtocolError::unknown_variant(C::NAME, value.dyn_object_type_name()))?;
        let mut object = WireObject::new();
        object.insert(
            DISCRIMINATOR_KEY.to_string(),
            Value::String(entry.discriminator.clone()),
        );
        let _guard = self.enter();
        (entry.encode)(value, &mut object)?;
        Ok(Value::Object(object))
    }

    /// Decodes a capability value, selecting the variant by its discriminator.
    pub fn decode<C: Capability>(&self, node: &Value) -> ProtocolResult<Arc<C::Object>> {
        let object = expect_object(node)?;
        let discriminator = match object.get(DISCRIMINATOR_KEY) {
            Some(Value::String(x)) => x,
            Some(other) => {
                return Err(ProtocolError::type_mismatch("discriminator string", other)
                    .at_field(DISCRIMINATOR_KEY))
            }
            None => return Err(ProtocolError::missing_discriminator(C::NAME)),
        };
        let entry = C::variants(self)
            .by_discriminator(discriminator)
            .ok_or_else(|| {
                ProtocolError::unknown_variant(C::NAME, discriminator.as_str())
                    .at_field(DISCRIMINATOR_KEY)
            })?;
        let _guard = self.enter();
        (entry.decode)(object)
    }

    /// The discriminator that `value` is encoded with, if its variant is registered.
    pub fn discriminator_of<C: Capability>(&self, value: &C::Object) -> Option<String> {
        let type_id = Any::type_id(value.dyn_object_as_any());
        C::variants(self)
            .by_type(type_id)
            .map(|entry| entry.discriminator.clone())
    }

    pub fn is_registered<C: Capability>(&self, discriminator: &str) -> bool {
        C::variants(self).by_discriminator(discriminator).is_some()
    }

    /// The registered discriminators of capability `C`, sorted.
    pub fn discriminators<C: Capability>(&self) -> Vec<String> {
        C::variants(self).discriminators()
    }
}

fn encode_variant<C, T>(value: &C::Object, object: &mut WireObject) -> ProtocolResult<()>
where
    C: Capability,
    T: Variant<C>,
{
    let Some(value) = value.dyn_object_as_any().downcast_ref::<T>() else {
        return Err(ProtocolError::internal(format!(
            "{} variant {} was encoded as {}",
            C::NAME,
            value.dyn_object_type_name(),
            type_name::<T>()
        )));
    };
    value.encode_fields(object)
}

fn decode_variant<C, T>(object: &WireObject) -> ProtocolResult<Arc<C::Object>>
where
    C: Capability,
    T: Variant<C>,
{
    let value = Arc::new(T::decode_fields(object)?);
    Ok(<T as Variant<C>>::into_object(value))
}

/// Encodes a capability value with the global registry.
pub fn encode_capability<C: Capability>(value: &C::Object) -> ProtocolResult<Value> {
    CapabilityRegistry::global().encode::<C>(value)
}

/// Decodes a capability value with the global registry.
pub fn decode_capability<C: Capability>(node: &Value) -> ProtocolResult<Arc<C::Object>> {
    CapabilityRegistry::global().decode::<C>(node)
}
