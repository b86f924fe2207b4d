use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product fields as decoded from a create/replace request.
///
/// `category_id` stays textual; it is parsed when the category is resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    pub category_id: String,
    pub description: String,
    pub image: String,
}

/// Partial product update: `Some` replaces the stored value, `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Zero values in a decoded request mean "not supplied": empty strings, a
/// price of 0 and an empty or nil category id.
impl From<ProductRequest> for ProductPatch {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: non_empty(req.name),
            price: (req.price != 0.0).then_some(req.price),
            category_id: non_empty(req.category_id).filter(|raw| !is_nil_uuid(raw)),
            description: non_empty(req.description),
            image: non_empty(req.image),
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn is_nil_uuid(raw: &str) -> bool {
    Uuid::parse_str(raw).map(|id| id.is_nil()).unwrap_or(false)
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool { *self == ProductPatch::default() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_become_absent() {
        let patch = ProductPatch::from(ProductRequest {
            name: "NewName".into(),
            price: 0.0,
            category_id: Uuid::nil().to_string(),
            ..Default::default()
        });
        assert_eq!(patch.name.as_deref(), Some("NewName"));
        assert_eq!(patch.price, None);
        assert_eq!(patch.category_id, None);
        assert_eq!(patch.description, None);
        assert_eq!(patch.image, None);
    }

    #[test]
    fn decodes_partial_json_request() {
        let req: ProductRequest = serde_json::from_str(r#"{"price": 12.5, "image": "https://img.example.com/b.png"}"#).unwrap();
        let patch = ProductPatch::from(req);
        assert_eq!(patch.price, Some(12.5));
        assert_eq!(patch.image.as_deref(), Some("https://img.example.com/b.png"));
        assert!(patch.name.is_none());
    }

    #[test]
    fn empty_request_gives_empty_patch() {
        assert!(ProductPatch::from(ProductRequest::default()).is_empty());
    }
}
