use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{ProtocolError, ProtocolResult};
use crate::wire::{expect_array, expect_object, WireCodec, WireObject};

/// A type usable as the key of a key-unique mapping.
/// JSON object keys are strings, so every key has a string form.
pub trait WireKey: Ord + Sized {
    fn to_wire_key(&self) -> String;

    fn from_wire_key(key: &str) -> ProtocolResult<Self>;
}

impl WireKey for String {
    fn to_wire_key(&self) -> String {
        self.clone()
    }

    fn from_wire_key(key: &str) -> ProtocolResult<Self> {
        Ok(key.to_string())
    }
}

impl WireKey for i32 {
    fn to_wire_key(&self) -> String {
        self.to_string()
    }

    fn from_wire_key(key: &str) -> ProtocolResult<Self> {
        key.parse().map_err(|_| {
            ProtocolError::type_mismatch("32-bit integer key", &Value::String(key.to_string()))
        })
    }
}

impl<T: WireCodec> WireCodec for Vec<T> {
    fn encode(&self) -> ProtocolResult<Value> {
        let elements = self
            .iter()
            .enumerate()
            .map(|(i, x)| x.encode().map_err(|e| e.at_index(i)))
            .collect::<ProtocolResult<Vec<_>>>()?;
        Ok(Value::Array(elements))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        expect_array(node)?
            .iter()
            .enumerate()
            .map(|(i, x)| T::decode(x).map_err(|e| e.at_index(i)))
            .collect()
    }
}

impl<K: WireKey, V: WireCodec> WireCodec for BTreeMap<K, V> {
    fn encode(&self) -> ProtocolResult<Value> {
        let mut object = WireObject::new();
        for (key, value) in self {
            let key = key.to_wire_key();
            let node = value.encode().map_err(|e| e.at_key(&key))?;
            object.insert(key, node);
        }
        Ok(Value::Object(object))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        let mut map = BTreeMap::new();
        for (key, value) in expect_object(node)? {
            let k = K::from_wire_key(key).map_err(|e| e.at_key(key))?;
            let v = V::decode(value).map_err(|e| e.at_key(key))?;
            // Distinct strings such as "1" and "01" may parse to the same key.
            if map.insert(k, v).is_some() {
                return Err(ProtocolError::duplicate_key(key.as_str()).at_key(key));
            }
        }
        Ok(map)
    }
}

/// Optional values are only meaningful as record fields, where the empty state
/// is represented by the absence of the key. An explicit `null` is rejected, and
/// an empty value has no wire form outside a record, e.g. as a list element.
impl<T: WireCodec> WireCodec for Option<T> {
    fn encode(&self) -> ProtocolResult<Value> {
        match self {
            Some(x) => x.encode(),
            None => Err(ProtocolError::internal(
                "an empty optional value can only be encoded as a record field",
            )),
        }
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        T::decode(node).map(Some)
    }

    fn encode_field(&self, key: &str, object: &mut WireObject) -> ProtocolResult<()> {
        match self {
            Some(x) => x.encode_field(key, object),
            None => Ok(()),
        }
    }

    fn decode_field(object: &WireObject, key: &str) -> ProtocolResult<Self> {
        match object.get(key) {
            None => Ok(None),
            Some(node @ Value::Null) => {
                Err(ProtocolError::type_mismatch("value or absent key", node).at_field(key))
            }
            Some(node) => T::decode(node).map(Some).map_err(|e| e.at_field(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ProtocolErrorKind;

    #[test]
    fn test_list_error_carries_index() {
        let error = Vec::<String>::decode(&json!(["a", "b", 3])).err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("type mismatch at $[2]: expected string, found number".to_string())
        );
    }

    #[test]
    fn test_map_error_carries_key() {
        let error = BTreeMap::<String, String>::decode(&json!({"a": "x", "b": false})).err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some(r#"type mismatch at $["b"]: expected string, found boolean"#.to_string())
        );
    }

    #[test]
    fn test_integer_keyed_map() -> ProtocolResult<()> {
        let map = BTreeMap::<i32, i32>::decode(&json!({"0": 2, "1": 0}))?;
        assert_eq!(map, BTreeMap::from([(0, 2), (1, 0)]));
        assert_eq!(map.encode()?, json!({"0": 2, "1": 0}));

        let error = BTreeMap::<i32, i32>::decode(&json!({"x": 1})).err();
        assert_eq!(
            error.map(|e| e.kind()),
            Some(ProtocolErrorKind::TypeMismatch)
        );
        let error = BTreeMap::<i32, i32>::decode(&json!({"1": 1, "01": 2})).err();
        assert_eq!(
            error.map(|e| e.kind()),
            Some(ProtocolErrorKind::DuplicateKey)
        );
        Ok(())
    }

    #[test]
    fn test_optional_field_absent_and_null() -> ProtocolResult<()> {
        let mut object = WireObject::new();
        None::<String>.encode_field("comment", &mut object)?;
        assert!(object.is_empty());
        assert_eq!(Option::<String>::decode_field(&object, "comment")?, None);

        Some("c".to_string()).encode_field("comment", &mut object)?;
        assert_eq!(object.get("comment"), Some(&json!("c")));
        assert_eq!(
            Option::<String>::decode_field(&object, "comment")?,
            Some("c".to_string())
        );

        object.insert("comment".to_string(), Value::Null);
        let error = Option::<String>::decode_field(&object, "comment").err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("type mismatch at $.comment: expected value or absent key, found null".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_empty_optional_outside_record() -> ProtocolResult<()> {
        let values = vec![Some("a".to_string()), None];
        let error = values.encode().err();
        assert_eq!(
            error.map(|e| e.kind()),
            Some(ProtocolErrorKind::InternalError)
        );
        let values = vec![Some("a".to_string())];
        assert_eq!(Vec::<Option<String>>::decode(&values.encode()?)?, values);
        Ok(())
    }

    #[test]
    fn test_required_field_missing() {
        let object = WireObject::new();
        let error = String::decode_field(&object, "path").err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("missing field at $.path".to_string())
        );
    }
}
