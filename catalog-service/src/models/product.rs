use serde::{Deserialize, Serialize};

/// A catalog entry as persisted in the products container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    pub fn new(id: String, name: Option<String>, category: Option<String>) -> Self {
        Self { id, name, category }
    }
}
