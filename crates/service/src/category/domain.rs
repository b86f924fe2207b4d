use serde::{Deserialize, Serialize};

/// Category fields as decoded from a create/replace/update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    pub name: String,
    pub description: String,
}

impl CategoryRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into() }
    }
}
