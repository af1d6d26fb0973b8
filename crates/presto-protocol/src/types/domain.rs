use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{ProtocolError, ProtocolResult};
use crate::types::ValueSet;
use crate::wire::{expect_array, expect_object, WireCodec, WireObject};
use crate::wire_record;

wire_record! {
    /// The values a single column may take. The value set is carried opaquely.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Domain {
        pub values: ValueSet => "values",
        pub null_allowed: bool => "nullAllowed",
    }
}

/// A conjunction of per-column domains.
///
/// `None` matches nothing. An empty map matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleDomain<T: Ord> {
    domains: Option<BTreeMap<T, Domain>>,
}

impl<T: Ord> TupleDomain<T> {
    pub fn all() -> Self {
        Self {
            domains: Some(BTreeMap::new()),
        }
    }

    pub fn none() -> Self {
        Self { domains: None }
    }

    pub fn with_column_domains(domains: BTreeMap<T, Domain>) -> Self {
        Self {
            domains: Some(domains),
        }
    }

    pub fn is_all(&self) -> bool {
        self.domains.as_ref().is_some_and(|x| x.is_empty())
    }

    pub fn is_none(&self) -> bool {
        self.domains.is_none()
    }

    pub fn domains(&self) -> Option<&BTreeMap<T, Domain>> {
        self.domains.as_ref()
    }

    pub fn domain(&self, column: &T) -> Option<&Domain> {
        self.domains.as_ref().and_then(|x| x.get(column))
    }
}

impl<T: Ord> Default for TupleDomain<T> {
    fn default() -> Self {
        Self::all()
    }
}

const COLUMN_DOMAINS_KEY: &str = "columnDomains";
const COLUMN_KEY: &str = "column";
const DOMAIN_KEY: &str = "domain";

/// One entry of the `columnDomains` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDomain<T> {
    pub column: T,
    pub domain: Domain,
}

fn encode_column_domain<T: WireCodec>(column: &T, domain: &Domain) -> ProtocolResult<Value> {
    let mut object = WireObject::new();
    column.encode_field(COLUMN_KEY, &mut object)?;
    domain.encode_field(DOMAIN_KEY, &mut object)?;
    Ok(Value::Object(object))
}

impl<T: WireCodec> WireCodec for ColumnDomain<T> {
    fn encode(&self) -> ProtocolResult<Value> {
        encode_column_domain(&self.column, &self.domain)
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        let object = expect_object(node)?;
        Ok(Self {
            column: T::decode_field(object, COLUMN_KEY)?,
            domain: Domain::decode_field(object, DOMAIN_KEY)?,
        })
    }
}

impl<T: Ord + WireCodec> WireCodec for TupleDomain<T> {
    fn encode(&self) -> ProtocolResult<Value> {
        let mut object = WireObject::new();
        if let Some(domains) = &self.domains {
            let entries = domains
                .iter()
                .enumerate()
                .map(|(i, (column, domain))| {
                    encode_column_domain(column, domain)
                        .map_err(|e| e.at_index(i).at_field(COLUMN_DOMAINS_KEY))
                })
                .collect::<ProtocolResult<Vec<_>>>()?;
            object.insert(COLUMN_DOMAINS_KEY.to_string(), Value::Array(entries));
        }
        Ok(Value::Object(object))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        let object = expect_object(node)?;
        let Some(entries) = object.get(COLUMN_DOMAINS_KEY) else {
            return Ok(Self::none());
        };
        let mut domains = BTreeMap::new();
        let entries = expect_array(entries).map_err(|e| e.at_field(COLUMN_DOMAINS_KEY))?;
        for (i, entry) in entries.iter().enumerate() {
            let at = |e: ProtocolError| e.at_index(i).at_field(COLUMN_DOMAINS_KEY);
            let ColumnDomain { column, domain } = ColumnDomain::<T>::decode(entry).map_err(at)?;
            if domains.contains_key(&column) {
                let key = match column.encode() {
                    Ok(Value::String(x)) => x,
                    Ok(other) => other.to_string(),
                    Err(_) => String::new(),
                };
                return Err(at(ProtocolError::duplicate_key(key).at_field(COLUMN_KEY)));
            }
            domains.insert(column, domain);
        }
        Ok(Self::with_column_domains(domains))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ProtocolErrorKind;
    use crate::types::{Opaque, Subfield};

    fn domain(null_allowed: bool) -> Domain {
        Domain {
            values: Opaque::new(json!({"@type": "sortable", "type": "bigint", "ranges": []})),
            null_allowed,
        }
    }

    #[test]
    fn test_all_and_none_are_distinct() -> ProtocolResult<()> {
        let all = TupleDomain::<Subfield>::all();
        let none = TupleDomain::<Subfield>::none();
        assert_eq!(all.encode()?, json!({"columnDomains": []}));
        assert_eq!(none.encode()?, json!({}));
        assert!(TupleDomain::<Subfield>::decode(&json!({"columnDomains": []}))?.is_all());
        assert!(TupleDomain::<Subfield>::decode(&json!({}))?.is_none());
        Ok(())
    }

    #[test]
    fn test_column_domains_are_sorted() -> ProtocolResult<()> {
        let node = json!({
            "columnDomains": [
                {"column": "b", "domain": domain(true).encode()?},
                {"column": "a", "domain": domain(false).encode()?},
            ]
        });
        let tuple = TupleDomain::<Subfield>::decode(&node)?;
        let columns = tuple
            .domains()
            .map(|x| x.keys().map(|k| k.as_str().to_string()).collect::<Vec<_>>())
            .unwrap_or_default();
        assert_eq!(columns, vec!["a", "b"]);
        assert_eq!(tuple.domain(&Subfield::new("a")), Some(&domain(false)));
        assert_eq!(TupleDomain::<Subfield>::decode(&tuple.encode()?)?, tuple);
        Ok(())
    }

    #[test]
    fn test_decode_coordinator_domain() -> ProtocolResult<()> {
        let node = json!({
            "columnDomains": [{
                "column": "a",
                "domain": {
                    "values": {"@type": "sortable", "type": "bigint", "ranges": []},
                    "nullAllowed": false,
                },
            }]
        });
        let tuple = TupleDomain::<Subfield>::decode(&node)?;
        assert_eq!(tuple.domain(&Subfield::new("a")), Some(&domain(false)));
        assert_eq!(tuple.encode()?, node);
        Ok(())
    }

    #[test]
    fn test_duplicate_column_is_rejected()-> ProtocolResult<()> {
        let node = json!({
            "columnDomains": [
                {"column": "a", "domain": domain(true).encode()?},
                {"column": "a", "domain": domain(false).encode()?},
            ]
        });
        let error = TupleDomain::<Subfield>::decode(&node).err();
        assert_eq!(
            error.as_ref().map(|e| e.kind()),
            Some(ProtocolErrorKind::DuplicateKey)
        );
        assert_eq!(
            error.and_then(|e| e.path().map(|p| p.to_string())),
            Some("$.columnDomains[1].column".to_string())
        );
        Ok(())
    }
}
