use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct PutSettingRequest {
    /// `None` when the key is absent; an explicit `null` is kept as `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
    pub description: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
