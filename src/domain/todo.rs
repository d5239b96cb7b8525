use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Layout of `created_at`, local server time.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

const FIELDS: [&str; 5] = ["id", "title", "description", "completed", "created_at"];

/// Wire and storage shape of a todo item.
///
/// Decoding accepts any subset of fields; anything missing or `null` falls
/// back to its zero value. `id` and `created_at` are server-assigned, so
/// whatever a client sends for them is overwritten on create. Request bodies
/// go through [`Todo::from_json`], which only accepts objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Todo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: TodoId,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

impl Todo {
    /// Decodes the first JSON value in `bytes`; anything after it is ignored.
    ///
    /// The value must be an object. A repeated key keeps its last value, and
    /// keys match field names ignoring ASCII case, an exact match winning.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value = serde_json::Deserializer::from_slice(bytes)
            .into_iter::<Value>()
            .next()
            .unwrap_or_else(|| Err(de::Error::custom("empty body")))?;
        match value {
            Value::Object(object) => Todo::deserialize(Value::Object(fold_keys(object))),
            _ => Err(de::Error::custom("expected a JSON object")),
        }
    }
}

fn fold_keys(object: Map<String, Value>) -> Map<String, Value> {
    let mut folded = Map::new();
    for (key, value) in object {
        let Some(field) = FIELDS.iter().find(|f| f.eq_ignore_ascii_case(&key)) else { continue };
        if key == *field || !folded.contains_key(*field) {
            folded.insert(field.to_string(), value);
        }
    }
    folded
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
