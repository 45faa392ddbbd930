//! Category descriptors and the top-level departments products belong to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A browsable category, as listed by the categories endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Display name (e.g., "Women").
    pub name: String,
    /// Filter value (e.g., "women").
    pub value: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_categories: Option<Vec<SubCategory>>,
}

/// A sub-category entry under a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub name: String,
    pub value: String,
}

/// Top-level department every remote product is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Women,
    Men,
    Accessories,
}

impl Department {
    /// The lowercase category tag for this department.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Women => "women",
            Self::Men => "men",
            Self::Accessories => "accessories",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
