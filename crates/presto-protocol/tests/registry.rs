use std::sync::Arc;

use presto_protocol::capability::{
    ColumnHandle, ColumnHandleCapability, ConnectorSplit, ConnectorSplitCapability,
};
use presto_protocol::error::{ProtocolErrorKind, ProtocolResult};
use presto_protocol::registry::CapabilityRegistry;
use presto_protocol::testing::assert_capability_round_trip;
use presto_protocol::wire::WireCodec;
use presto_protocol::{impl_variant, wire_record};
use serde_json::json;

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct MemoryColumn {
        name: String => "name",
        ordinal: i32 => "ordinal",
    }
}

impl ColumnHandle for MemoryColumn {
    fn name(&self) -> &str {
        &self.name
    }
}

impl_variant!(MemoryColumn => ColumnHandleCapability);

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct SystemColumn {
        column_name: String => "columnName",
    }
}

impl ColumnHandle for SystemColumn {
    fn name(&self) -> &str {
        &self.column_name
    }
}

impl_variant!(SystemColumn => ColumnHandleCapability);

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct MemorySplit {
        columns: Vec<Arc<dyn ColumnHandle>> => "columns",
        filter_column: Option<Arc<dyn ColumnHandle>> => "filterColumn",
    }
}

impl ConnectorSplit for MemorySplit {}

impl_variant!(MemorySplit => ConnectorSplitCapability);

fn memory_column(name: &str, ordinal: i32) -> Arc<dyn ColumnHandle> {
    Arc::new(MemoryColumn {
        name: name.to_string(),
        ordinal,
    })
}

fn registry() -> ProtocolResult<CapabilityRegistry> {
    let registry = CapabilityRegistry::new();
    registry.register::<ColumnHandleCapability, MemoryColumn>("memory")?;
    registry.register::<ColumnHandleCapability, SystemColumn>("$system")?;
    Ok(registry)
}

#[test]
fn test_encode_writes_discriminator_first() -> ProtocolResult<()> {
    let registry = registry()?;
    let node = registry.encode::<ColumnHandleCapability>(memory_column("id", 0).as_ref())?;
    assert_eq!(
        serde_json::to_string(&node).ok(),
        Some(r#"{"@type":"memory","name":"id","ordinal":0}"#.to_string())
    );
    let handle = registry.decode::<ColumnHandleCapability>(&node)?;
    assert_eq!(handle.name(), "id");
    assert!(handle.as_ref() == memory_column("id", 0).as_ref());
    assert!(handle.as_ref() != memory_column("id", 1).as_ref());
    Ok(())
}

#[test]
fn test_registration_is_idempotent() -> ProtocolResult<()> {
    let registry = registry()?;
    registry.register::<ColumnHandleCapability, MemoryColumn>("memory")?;
    registry.register::<ColumnHandleCapability, SystemColumn>("$system")?;
    assert_eq!(
        registry.discriminators::<ColumnHandleCapability>(),
        vec!["$system", "memory"]
    );
    assert!(registry.is_registered::<ColumnHandleCapability>("memory"));
    assert!(!registry.is_registered::<ConnectorSplitCapability>("memory"));
    Ok(())
}

#[test]
fn test_registration_conflicts() -> ProtocolResult<()> {
    let registry = registry()?;
    let error = registry
        .register::<ColumnHandleCapability, SystemColumn>("memory")
        .err();
    assert_eq!(
        error.map(|e| e.kind()),
        Some(ProtocolErrorKind::RegistrationConflict)
    );
    let error = registry
        .register::<ColumnHandleCapability, MemoryColumn>("memory-v2")
        .err();
    assert_eq!(
        error.map(|e| e.kind()),
        Some(ProtocolErrorKind::RegistrationConflict)
    );
    // The same discriminator may name variants of different capabilities.
    registry.register::<ConnectorSplitCapability, MemorySplit>("memory")?;
    Ok(())
}

#[test]
fn test_registration_order_does_not_matter() -> ProtocolResult<()> {
    let first = CapabilityRegistry::new();
    first.register::<ColumnHandleCapability, SystemColumn>("$system")?;
    first.register::<ColumnHandleCapability, MemoryColumn>("memory")?;
    let second = registry()?;
    let handle = memory_column("ds", 3);
    assert_eq!(
        first.encode::<ColumnHandleCapability>(handle.as_ref())?,
        second.encode::<ColumnHandleCapability>(handle.as_ref())?
    );
    Ok(())
}

#[test]
fn test_decode_errors() -> ProtocolResult<()> {
    let registry = registry()?;
    let cases = [
        (
            json!({"@type": "not-a-real-connector", "name": "x"}),
            ProtocolErrorKind::UnknownVariant,
            "unknown ColumnHandle variant at $.@type: not-a-real-connector",
        ),
        (
            json!({"name": "x", "ordinal": 1}),
            ProtocolErrorKind::MissingDiscriminator,
            "missing discriminator for ColumnHandle at $",
        ),
        (
            json!({"@type": 7, "name": "x"}),
            ProtocolErrorKind::TypeMismatch,
            "type mismatch at $.@type: expected discriminator string, found number",
        ),
        (
            json!("memory"),
            ProtocolErrorKind::TypeMismatch,
            "type mismatch at $: expected object, found string",
        ),
        (
            json!({"@type": "memory", "name": "x"}),
            ProtocolErrorKind::MissingField,
            "missing field at $.ordinal",
        ),
    ];
    for (node, kind, message) in cases {
        let error = registry.decode::<ColumnHandleCapability>(&node).err();
        assert_eq!(error.as_ref().map(|e| e.kind()), Some(kind), "{node}");
        assert_eq!(error.map(|e| e.to_string()), Some(message.to_string()));
    }
    Ok(())
}

#[test]
fn test_encode_unregistered_variant() {
    let registry = CapabilityRegistry::new();
    let error = registry
        .encode::<ColumnHandleCapability>(memory_column("id", 0).as_ref())
        .err();
    assert_eq!(
        error.map(|e| e.kind()),
        Some(ProtocolErrorKind::UnknownVariant)
    );
}

#[test]
fn test_registries_are_isolated() -> ProtocolResult<()> {
    let registry = registry()?;
    let empty = CapabilityRegistry::new();
    let node = registry.encode::<ColumnHandleCapability>(memory_column("id", 0).as_ref())?;
    let error = empty.decode::<ColumnHandleCapability>(&node).err();
    assert_eq!(
        error.map(|e| e.kind()),
        Some(ProtocolErrorKind::UnknownVariant)
    );
    assert!(empty.discriminators::<ColumnHandleCapability>().is_empty());
    Ok(())
}

#[test]
fn test_nested_capabilities_use_enclosing_registry() -> ProtocolResult<()> {
    let registry = registry()?;
    registry.register::<ConnectorSplitCapability, MemorySplit>("memory")?;

    let split: Arc<dyn ConnectorSplit> = Arc::new(MemorySplit {
        columns: vec![memory_column("a", 0), memory_column("b", 1)],
        filter_column: Some(memory_column("a", 0)),
    });
    let node = assert_capability_round_trip::<ConnectorSplitCapability>(&registry, split.as_ref())?;
    assert_eq!(
        node,
        json!({
            "@type": "memory",
            "columns": [
                {"@type": "memory", "name": "a", "ordinal": 0},
                {"@type": "memory", "name": "b", "ordinal": 1},
            ],
            "filterColumn": {"@type": "memory", "name": "a", "ordinal": 0},
        })
    );
    // Nothing is registered globally.
    let error = CapabilityRegistry::global()
        .decode::<ConnectorSplitCapability>(&node)
        .err();
    assert_eq!(
        error.map(|e| e.kind()),
        Some(ProtocolErrorKind::UnknownVariant)
    );

    let error = registry
        .decode::<ConnectorSplitCapability>(&json!({
            "@type": "memory",
            "columns": [{"@type": "memory", "name": "a", "ordinal": 0}, {"name": "b"}],
        }))
        .err();
    assert_eq!(
        error.map(|e| e.to_string()),
        Some("missing discriminator for ColumnHandle at $.columns[1]".to_string())
    );

    let error = registry
        .decode::<ConnectorSplitCapability>(&json!({
            "@type": "memory",
            "columns": [],
            "filterColumn": null,
        }))
        .err();
    assert_eq!(
        error.map(|e| e.kind()),
        Some(ProtocolErrorKind::TypeMismatch)
    );
    Ok(())
}

#[test]
fn test_nested_discriminators_follow_registry() -> ProtocolResult<()> {
    let first = registry()?;
    first.register::<ConnectorSplitCapability, MemorySplit>("memory")?;
    let second = CapabilityRegistry::new();
    second.register::<ColumnHandleCapability, MemoryColumn>("memory-v2")?;
    second.register::<ConnectorSplitCapability, MemorySplit>("memory-v2")?;

    let split = MemorySplit {
        columns: vec![memory_column("a", 0)],
        filter_column: None,
    };
    let node = second.encode::<ConnectorSplitCapability>(&split)?;
    assert_eq!(node["@type"], json!("memory-v2"));
    assert_eq!(node["columns"][0]["@type"], json!("memory-v2"));
    // The registry is restored once the outer value is done.
    let node = first.encode::<ConnectorSplitCapability>(&split)?;
    assert_eq!(node["columns"][0]["@type"], json!("memory"));
    Ok(())
}

#[test]
fn test_scope_applies_to_plain_records() -> ProtocolResult<()> {
    let registry = registry()?;
    let columns = vec![memory_column("a", 0), memory_column("b", 1)];
    let error = columns.encode().err();
    assert_eq!(
        error.as_ref().map(|e| e.kind()),
        Some(ProtocolErrorKind::UnknownVariant)
    );
    assert_eq!(
        error.and_then(|e| e.path().map(|p| p.to_string())),
        Some("$[0]".to_string())
    );
    let node = registry.scope(|| columns.encode())?;
    assert_eq!(node[1], json!({"@type": "memory", "name": "b", "ordinal": 1}));
    let decoded = registry.scope(|| Vec::<Arc<dyn ColumnHandle>>::decode(&node))?;
    assert_eq!(decoded.len(), 2);
    assert!(decoded[1].as_ref() == columns[1].as_ref());
    assert!(Vec::<Arc<dyn ColumnHandle>>::decode(&node).is_err());
    Ok(())
}

#[test]
fn test_concurrent_decode() -> ProtocolResult<()> {
    let registry = registry()?;
    let node = registry.encode::<ColumnHandleCapability>(memory_column("id", 0).as_ref())?;
    let names = std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    registry
                        .decode::<ColumnHandleCapability>(&node)
                        .map(|x| x.name().to_string())
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|x| x.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect::<ProtocolResult<Vec<_>>>()
    })?;
    assert_eq!(names, vec!["id"; 4]);
    Ok(())
}

#[test]
fn test_capability_round_trip_checks_variant() -> ProtocolResult<()> {
    let registry = registry()?;
    let handle: Arc<dyn ColumnHandle> = Arc::new(SystemColumn {
        column_name: "$path".to_string(),
    });
    let node = assert_capability_round_trip::<ColumnHandleCapability>(&registry, handle.as_ref())?;
    assert_eq!(node, json!({"@type": "$system", "columnName": "$path"}));
    assert_eq!(handle.encode().err().map(|e| e.kind()), Some(ProtocolErrorKind::UnknownVariant));
    Ok(())
}
