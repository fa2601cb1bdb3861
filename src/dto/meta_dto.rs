use serde::{Deserialize, Deserializer, Serialize};

/// Ids arrive as numbers or strings depending on the upstream table.
fn deserialize_id_flexible<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrInt {
        Int(i64),
        String(String),
    }

    match IdOrInt::deserialize(deserializer)? {
        IdOrInt::Int(i) => Ok(i.to_string()),
        IdOrInt::String(s) => Ok(s),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaOption {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_and_string_ids() {
        let raw = r#"[{"id": 7, "name": "Deep Cleaning"}, {"id": "ar", "name": "Arabic"}]"#;
        let options: Vec<MetaOption> = serde_json::from_str(raw).unwrap();
        assert_eq!(options[0].id, "7");
        assert_eq!(options[1].id, "ar");
        assert_eq!(options[1].name, "Arabic");
    }
}
