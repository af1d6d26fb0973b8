use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{ProtocolError, ProtocolResult};
use crate::wire::{expect_str, WireCodec};
use crate::{wire_enum, wire_record};

/// A network location of a worker that can serve a split.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostAddress {
    host: String,
    port: Option<u16>,
}

impl HostAddress {
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl FromStr for HostAddress {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProtocolError::invalid(format!("invalid host address: {s}"));
        let parse_port = |port: &str| port.parse::<u16>().map_err(|_| invalid());
        if let Some(rest) = s.strip_prefix('[') {
            let (host, rest) = rest.split_once(']').ok_or_else(invalid)?;
            if host.is_empty() {
                return Err(invalid());
            }
            let port = match rest {
                "" => None,
                _ => Some(parse_port(rest.strip_prefix(':').ok_or_else(invalid)?)?),
            };
            return Ok(Self::new(host, port));
        }
        // A bare IPv6 literal has more than one colon and no port.
        match s.split_once(':') {
            Some((host, port)) if !port.contains(':') => {
                if host.is_empty() {
                    return Err(invalid());
                }
                Ok(Self::new(host, Some(parse_port(port)?)))
            }
            _ if s.is_empty() => Err(invalid()),
            _ => Ok(Self::new(s, None)),
        }
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]", self.host)?;
        } else {
            f.write_str(&self.host)?;
        }
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

impl WireCodec for HostAddress {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::String(self.to_string()))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        let text = expect_str(node)?;
        text.parse()
            .map_err(|_| ProtocolError::type_mismatch("host address", node))
    }
}

/// The relative cost of processing a split, in hundredths of a standard split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SplitWeight(i64);

impl SplitWeight {
    const UNIT: i64 = 100;

    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub fn standard() -> Self {
        Self(Self::UNIT)
    }

    pub fn raw(&self) -> i64 {
        self.0
    }

    pub fn proportion(&self) -> f64 {
        self.0 as f64 / Self::UNIT as f64
    }
}

impl Default for SplitWeight {
    fn default() -> Self {
        Self::standard()
    }
}

impl WireCodec for SplitWeight {
    fn encode(&self) -> ProtocolResult<Value> {
        self.0.encode()
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        i64::decode(node).map(Self)
    }
}

wire_enum! {
    pub enum NodeSelectionStrategy {
        HardAffinity => "HARD_AFFINITY",
        SoftAffinity => "SOFT_AFFINITY",
        NoPreference => "NO_PREFERENCE",
    }
}

wire_enum! {
    pub enum CacheQuotaScope {
        Global => "GLOBAL",
        Schema => "SCHEMA",
        Table => "TABLE",
        Partition => "PARTITION",
    }
}

/// A quantity of bytes in its textual form, e.g. `512MB` or `1.50GB`.
/// The text is kept as received so that re-encoding is stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataSize(String);

const DATA_SIZE_UNITS: [(&str, u32); 6] = [
    ("PB", 5),
    ("TB", 4),
    ("GB", 3),
    ("MB", 2),
    ("kB", 1),
    ("B", 0),
];

impl DataSize {
    pub fn bytes(bytes: u64) -> Self {
        Self(format!("{bytes}B"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_bytes(&self) -> f64 {
        // The text is validated on construction.
        match Self::split(&self.0) {
            Some((value, exponent)) => value * 1024f64.powi(exponent as i32),
            None => 0.0,
        }
    }

    fn split(text: &str) -> Option<(f64, u32)> {
        let text = text.trim();
        DATA_SIZE_UNITS.iter().find_map(|(unit, exponent)| {
            let number = text.strip_suffix(unit)?.trim();
            let value = number.parse::<f64>().ok()?;
            (value.is_finite() && value >= 0.0).then_some((value, *exponent))
        })
    }
}

impl FromStr for DataSize {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::split(s) {
            Some(_) => Ok(Self(s.to_string())),
            None => Err(ProtocolError::invalid(format!("invalid data size: {s}"))),
        }
    }
}

impl fmt::Display for DataSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl WireCodec for DataSize {
    fn encode(&self) -> ProtocolResult<Value> {
        Ok(Value::String(self.0.clone()))
    }

    fn decode(node: &Value) -> ProtocolResult<Self> {
        expect_str(node)?
            .parse()
            .map_err(|_| ProtocolError::type_mismatch("data size", node))
    }
}

wire_record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CacheQuotaRequirement {
        pub cache_quota_scope: CacheQuotaScope => "cacheQuotaScope",
        pub quota: Option<DataSize> => "quota",
    }
}

impl CacheQuotaRequirement {
    /// The requirement of a split that does not ask for any cache quota.
    pub fn no_cache_requirement() -> Self {
        Self {
            cache_quota_scope: CacheQuotaScope::Global,
            quota: None,
        }
    }
}

impl Default for CacheQuotaRequirement {
    fn default() -> Self {
        Self::no_cache_requirement()
    }
}
