use serde::{Deserialize, Serialize};

/// Collection endpoints answer either with a page object or a bare array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged(PagedList<T>),
    Bare(Vec<T>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paged(page) => page.items,
            ListResponse::Bare(items) => items,
        }
    }
}

impl<T> From<ListResponse<T>> for Vec<T> {
    fn from(value: ListResponse<T>) -> Self {
        value.into_items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn decodes_paged_object() {
        let body = json!({"items": [{"id": "a"}, {"id": "b"}], "total": 2});
        let list: ListResponse<Value> = serde_json::from_value(body).expect("decode");
        assert!(matches!(list, ListResponse::Paged(_)));
        assert_eq!(list.into_items().len(), 2);
    }

    #[test]
    fn decodes_bare_array() {
        let body = json!([{"id": "a"}]);
        let list: ListResponse<Value> = serde_json::from_value(body).expect("decode");
        assert!(matches!(list, ListResponse::Bare(_)));
        let items: Vec<Value> = list.into();
        assert_eq!(items[0]["id"], "a");
    }

    #[test]
    fn rejects_scalar_body() {
        let result = serde_json::from_value::<ListResponse<Value>>(json!("oops"));
        assert!(result.is_err());
    }
}
