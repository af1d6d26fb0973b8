/// Declares a record together with its wire codec.
///
/// Each field is declared once along with its wire key. Encoding writes every
/// field under its key in declaration order; decoding reads every key with the
/// codec of the field's type, so `Option<T>` fields may be absent while all other
/// fields are required.
///
/// An optional `validate = path;` after the struct names a function
/// `fn(&Self) -> ProtocolResult<()>` that checks a decoded record.
///
/// ```
/// use presto_protocol::wire_record;
///
/// wire_record! {
///     #[derive(Debug, Clone, PartialEq, Eq)]
///     pub struct SortKey {
///         pub column_name: String => "columnName",
///         pub descending: bool => "descending",
///         pub comment: Option<String> => "comment",
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty => $key:literal
            ),* $(,)?
        }
        $(validate = $validate:path;)?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::wire::WireRecord for $name {
            fn encode_fields(
                &self,
                object: &mut $crate::wire::WireObject,
            ) -> $crate::error::ProtocolResult<()> {
                $(
                    $crate::wire::WireCodec::encode_field(&self.$field, $key, object)?;
                )*
                Ok(())
            }

            fn decode_fields(
                object: &$crate::wire::WireObject,
            ) -> $crate::error::ProtocolResult<Self> {
                let value = Self {
                    $(
                        $field: <$ty as $crate::wire::WireCodec>::decode_field(object, $key)?,
                    )*
                };
                $($validate(&value)?;)?
                Ok(value)
            }
        }

        impl $crate::wire::WireCodec for $name {
            fn encode(&self) -> $crate::error::ProtocolResult<$crate::wire::Value> {
                let mut object = $crate::wire::WireObject::new();
                $crate::wire::WireRecord::encode_fields(self, &mut object)?;
                Ok($crate::wire::Value::Object(object))
            }

            fn decode(node: &$crate::wire::Value) -> $crate::error::ProtocolResult<Self> {
                let object = $crate::wire::expect_object(node)?;
                <Self as $crate::wire::WireRecord>::decode_fields(object)
            }
        }
    };
}

/// Declares a closed enumeration encoded as its symbolic name.
///
/// There is no numeric form and no default: a string outside the declared set
/// fails with [`ProtocolError::UnknownEnumValue`](crate::error::ProtocolError::UnknownEnumValue).
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $symbol:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $symbol,)*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::ProtocolError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($symbol => Ok($name::$variant),)*
                    _ => Err($crate::error::ProtocolError::unknown_enum_value(
                        stringify!($name),
                        s,
                    )),
                }
            }
        }

        impl $crate::wire::WireCodec for $name {
            fn encode(&self) -> $crate::error::ProtocolResult<$crate::wire::Value> {
                Ok($crate::wire::Value::String(self.as_str().to_string()))
            }

            fn decode(node: &$crate::wire::Value) -> $crate::error::ProtocolResult<Self> {
                $crate::wire::expect_str(node)?.parse()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::{ProtocolError, ProtocolResult};
    use crate::wire::{WireCodec, WireObject, WireRecord};

    crate::wire_enum! {
        enum Direction {
            Up => "UP",
            Down => "DOWN",
        }
    }

    crate::wire_record! {
        #[derive(Debug, Clone, PartialEq, Eq)]
        struct Step {
            direction: Direction => "direction",
            count: i32 => "count",
            label: Option<String> => "label",
        }
    }

    #[test]
    fn test_enum_symbolic_names() -> ProtocolResult<()> {
        assert_eq!(Direction::Up.encode()?, json!("UP"));
        assert_eq!(Direction::decode(&json!("DOWN"))?, Direction::Down);
        assert_eq!(Direction::ALL, &[Direction::Up, Direction::Down]);
        assert_eq!(Direction::Down.to_string(), "DOWN");
        let error = Direction::decode(&json!("up")).err();
        assert!(matches!(
            error,
            Some(ProtocolError::UnknownEnumValue { name: "Direction", ref value, .. }) if value == "up"
        ));
        Ok(())
    }

    #[test]
    fn test_record_fields_in_declaration_order() -> ProtocolResult<()> {
        let step = Step {
            direction: Direction::Up,
            count: 2,
            label: None,
        };
        let node = step.encode()?;
        assert_eq!(node, json!({"direction": "UP", "count": 2}));
        let keys = node
            .as_object()
            .map(|x| x.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        assert_eq!(keys, vec!["direction", "count"]);
        assert_eq!(Step::decode(&node)?, step);
        Ok(())
    }

    #[test]
    fn test_record_errors_are_tagged_with_field() {
        let error = Step::decode(&json!({"direction": "LEFT", "count": 1})).err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("unknown Direction value at $.direction: LEFT".to_string())
        );
        let error = Step::decode(&json!({"direction": "UP"})).err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("missing field at $.count".to_string())
        );
        let error = Step::decode(&json!(["UP", 1])).err();
        assert_eq!(
            error.map(|e| e.to_string()),
            Some("type mismatch at $: expected object, found array".to_string())
        );
    }

    #[test]
    fn test_record_ignores_unknown_keys() -> ProtocolResult<()> {
        let mut object = WireObject::new();
        object.insert("direction".to_string(), json!("DOWN"));
        object.insert("count".to_string(), json!(0));
        object.insert("extra".to_string(), json!({"nested": true}));
        let step = Step::decode_fields(&object)?;
        assert_eq!(step.label, None);
        Ok(())
    }
}
