use serde_json::Value;
use thiserror::Error;

use crate::wire::{node_kind, PathSegment, WirePath};

pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: WirePath,
        expected: String,
        found: String,
    },
    #[error("missing field at {path}")]
    MissingField { path: WirePath },
    #[error("missing discriminator for {capability} at {path}")]
    MissingDiscriminator {
        path: WirePath,
        capability: &'static str,
    },
    #[error("unknown {capability} variant at {path}: {variant}")]
    UnknownVariant {
        path: WirePath,
        capability: &'static str,
        variant: String,
    },
    #[error("unknown {name} value at {path}: {value}")]
    UnknownEnumValue {
        path: WirePath,
        name: &'static str,
        value: String,
    },
    #[error("duplicate key at {path}: {key}")]
    DuplicateKey { path: WirePath, key: String },
    #[error("conflicting {capability} registration: {message}")]
    RegistrationConflict {
        capability: &'static str,
        message: String,
    },
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

/// The kind of a [`ProtocolError`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolErrorKind {
    TypeMismatch,
    MissingField,
    MissingDiscriminator,
    UnknownVariant,
    UnknownEnumValue,
    DuplicateKey,
    RegistrationConflict,
    InvalidJson,
    InvalidArgument,
    InternalError,
}

impl ProtocolError {
    pub fn type_mismatch(expected: impl Into<String>, found: &Value) -> Self {
        ProtocolError::TypeMismatch {
            path: WirePath::root(),
            expected: expected.into(),
            found: node_kind(found).to_string(),
        }
    }

    /// A required key is absent from the object being decoded.
    /// The path points at the missing key itself.
    pub fn missing_field(key: &str) -> Self {
        ProtocolError::MissingField {
            path: WirePath::from_segment(PathSegment::Field(key.to_string())),
        }
    }

    pub fn missing_discriminator(capability: &'static str) -> Self {
        ProtocolError::MissingDiscriminator {
            path: WirePath::root(),
            capability,
        }
    }

    pub fn unknown_variant(capability: &'static str, variant: impl Into<String>) -> Self {
        ProtocolError::UnknownVariant {
            path: WirePath::root(),
            capability,
            variant: variant.into(),
        }
    }

    pub fn unknown_enum_value(name: &'static str, value: impl Into<String>) -> Self {
        ProtocolError::UnknownEnumValue {
            path: WirePath::root(),
            name,
            value: value.into(),
        }
    }

    pub fn duplicate_key(key: impl Into<String>) -> Self {
        ProtocolError::DuplicateKey {
            path: WirePath::root(),
            key: key.into(),
        }
    }

    pub fn conflict(capability: &'static str, message: impl Into<String>) -> Self {
        ProtocolError::RegistrationConflict {
            capability,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ProtocolError::InvalidArgument(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ProtocolError::InternalError(message.into())
    }

    pub fn kind(&self) -> ProtocolErrorKind {
        match self {
            ProtocolError::TypeMismatch { .. } => ProtocolErrorKind::TypeMismatch,
            ProtocolError::MissingField { .. } => ProtocolErrorKind::MissingField,
            ProtocolError::MissingDiscriminator { .. } => ProtocolErrorKind::MissingDiscriminator,
            ProtocolError::UnknownVariant { .. } => ProtocolErrorKind::UnknownVariant,
            ProtocolError::UnknownEnumValue { .. } => ProtocolErrorKind::UnknownEnumValue,
            ProtocolError::DuplicateKey { .. } => ProtocolErrorKind::DuplicateKey,
            ProtocolError::RegistrationConflict { .. } => ProtocolErrorKind::RegistrationConflict,
            ProtocolError::InvalidJson(_) => ProtocolErrorKind::InvalidJson,
            ProtocolError::InvalidArgument(_) => ProtocolErrorKind::InvalidArgument,
            ProtocolError::InternalError(_) => ProtocolErrorKind::InternalError,
        }
    }

    /// The location of the offending value, for errors raised while walking a wire tree.
    pub fn path(&self) -> Option<&WirePath> {
        match self {
            ProtocolError::TypeMismatch { path, .. }
            | ProtocolError::MissingField { path }
            | ProtocolError::MissingDiscriminator { path, .. }
            | ProtocolError::UnknownVariant { path, .. }
            | ProtocolError::UnknownEnumValue { path, .. }
            | ProtocolError::DuplicateKey { path, .. } => Some(path),
            ProtocolError::RegistrationConflict { .. }
            | ProtocolError::InvalidJson(_)
            | ProtocolError::InvalidArgument(_)
            | ProtocolError::InternalError(_) => None,
        }
    }

    /// Prepends a path segment. Errors without a path are returned unchanged.
    pub fn at(mut self, segment: PathSegment) -> Self {
        match &mut self {
            ProtocolError::TypeMismatch { path, .. }
            | ProtocolError::MissingField { path }
            | ProtocolError::MissingDiscriminator { path, .. }
            | ProtocolError::UnknownVariant { path, .. }
            | ProtocolError::UnknownEnumValue { path, .. }
            | ProtocolError::DuplicateKey { path, .. } => path.prepend(segment),
            ProtocolError::RegistrationConflict { .. }
            | ProtocolError::InvalidJson(_)
            | ProtocolError::InvalidArgument(_)
            | ProtocolError::InternalError(_) => {}
        }
        self
    }

    pub fn at_field(self, key: &str) -> Self {
        self.at(PathSegment::Field(key.to_string()))
    }

    pub fn at_index(self, index: usize) -> Self {
        self.at(PathSegment::Index(index))
    }

    pub fn at_key(self, key: &str) -> Self {
        self.at(PathSegment::Key(key.to_string()))
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(value: serde_json::Error) -> Self {
        ProtocolError::InvalidJson(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_path_segments_are_prepended() {
        let error = ProtocolError::type_mismatch("string", &json!(1))
            .at_field("value")
            .at_index(1)
            .at_field("partitionKeys");
        assert_eq!(error.kind(), ProtocolErrorKind::TypeMismatch);
        assert_eq!(
            error.path().map(|p| p.to_string()),
            Some("$.partitionKeys[1].value".to_string())
        );
        assert_eq!(
            error.to_string(),
            "type mismatch at $.partitionKeys[1].value: expected string, found number"
        );
    }

    #[test]
    fn test_missing_field_points_at_key() {
        let error = ProtocolError::missing_field("length").at_field("fileSplit");
        assert_eq!(error.to_string(), "missing field at $.fileSplit.length");
    }

    #[test]
    fn test_errors_without_path_ignore_segments() {
        let error = ProtocolError::invalid("connector id is empty").at_field("x");
        assert_eq!(error.path(), None);
        assert_eq!(error.to_string(), "invalid argument: connector id is empty");
    }
}
