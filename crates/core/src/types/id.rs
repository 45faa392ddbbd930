//! Product identifiers.
//!
//! Local products are keyed by an integer. Products sourced from the remote
//! catalog carry a namespaced identifier (`external-<remote id>`) so that any
//! consumer can tell the two origins apart from the identifier alone, and so
//! lookups can be routed without consulting either catalog first.
//!
//! On the wire a local id is a JSON number and an external id is a JSON
//! string:
//!
//! ```rust
//! # use velour_core::ProductId;
//! let local: ProductId = "42".parse().unwrap();
//! let external: ProductId = "external-7".parse().unwrap();
//!
//! assert_eq!(serde_json::to_string(&local).unwrap(), "42");
//! assert_eq!(serde_json::to_string(&external).unwrap(), "\"external-7\"");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Marker prefix carried by every identifier of a remote-catalog product.
pub const EXTERNAL_ID_PREFIX: &str = "external-";

/// Identifier of a product, tagged by the catalog it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductId {
    /// Product from the static local catalog.
    Local(i64),
    /// Product from the remote catalog, keyed by its remote numeric id.
    External(u64),
}

/// Errors produced when parsing a [`ProductId`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductIdError {
    #[error("invalid local product id: {0}")]
    InvalidLocal(String),
    #[error("invalid external product id: {0}")]
    InvalidExternal(String),
}

impl ProductId {
    /// Returns `true` if the product comes from the remote catalog.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Returns `true` if the identifier string carries the external marker.
    ///
    /// This only inspects the prefix; the remainder may still fail to parse.
    #[must_use]
    pub fn has_external_marker(raw: &str) -> bool {
        raw.starts_with(EXTERNAL_ID_PREFIX)
    }
}

impl FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(remote_id) = s.strip_prefix(EXTERNAL_ID_PREFIX) {
            return remote_id
                .parse::<u64>()
                .map(Self::External)
                .map_err(|_| ProductIdError::InvalidExternal(s.to_string()));
        }

        s.trim()
            .parse::<i64>()
            .map(Self::Local)
            .map_err(|_| ProductIdError::InvalidLocal(s.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(id) => write!(f, "{id}"),
            Self::External(id) => write!(f, "{EXTERNAL_ID_PREFIX}{id}"),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Local(id)
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Local(id) => serializer.serialize_i64(*id),
            Self::External(_) => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Ok(Self::Local(id)),
            RawId::Text(raw) => raw.parse().map_err(serde::de::Error::custom),
        }
    }
}
