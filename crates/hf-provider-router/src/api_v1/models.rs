use serde::Deserialize;
use serde_json::Value;

/// Body of `GET /models`.
///
/// The router answers with an OpenAI-style `{"object": "list", "data": [...]}`
/// envelope, while some compatible deployments return the bare array. Entries
/// stay untyped here; the catalog decides which ones are usable.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ModelListResponse {
    List(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

impl ModelListResponse {
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            ModelListResponse::List(entries) => entries,
            ModelListResponse::Wrapped { data } => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_bare_array() {
        let parsed: ModelListResponse = serde_json::from_value(json!([{"id": "a/b"}])).unwrap();
        assert_eq!(parsed.into_entries().len(), 1);
    }

    #[test]
    fn accepts_data_envelope() {
        let parsed: ModelListResponse =
            serde_json::from_value(json!({"object": "list", "data": [{"id": "a/b"}, {"id": "c"}]}))
                .unwrap();
        assert_eq!(parsed.into_entries().len(), 2);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_value::<ModelListResponse>(json!({"models": []})).is_err());
    }
}
