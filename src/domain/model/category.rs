use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// A read-only question category (e.g. "Science").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: i32, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// `{id: type}` map as served to clients. Serializes with the id as the object key.
pub type CategoryMap = BTreeMap<i32, String>;

pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|c| (c.id, c.kind.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_map_serializes_ids_as_keys() {
        let map = category_map(&[Category::new(2, "Art"), Category::new(1, "Science")]);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({ "1": "Science", "2": "Art" }));
    }

    #[test]
    fn category_uses_type_as_wire_name() {
        let json = serde_json::to_value(Category::new(6, "Sports")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 6, "type": "Sports" }));
    }
}
