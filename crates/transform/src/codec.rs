//! JSON and YAML encoding of documents

use serde::ser::{Error as _, Serializer};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Number, Value};

const JSON_INDENT: &[u8] = b"    ";

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("document root must be a JSON object")]
    NotAnObject,
}

/// Parse a JSON document. The root has to be an object.
pub fn decode_document(content: &str) -> Result<Value, CodecError> {
    let document: Value = serde_json::from_str(content)?;
    if !document.is_object() {
        return Err(CodecError::NotAnObject);
    }
    Ok(document)
}

/// Pretty-printed JSON with a four-space indent. Key order is kept and `/` is
/// written as is.
pub fn encode_json(document: &Value) -> Result<String, CodecError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document.serialize(&mut serializer)?;

    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// YAML rendering of the same tree. Empty sequences stay `[]` and empty
/// mappings stay `{}`; numbers are plain YAML scalars.
pub fn encode_yaml(document: &Value) -> Result<String, CodecError> {
    Ok(serde_yaml::to_string(&YamlTree(document))?)
}

/// Walks a JSON tree for the YAML serializer. With `arbitrary_precision` a
/// `Number` serializes as a private wrapper map, so numbers are emitted here.
struct YamlTree<'a>(&'a Value);

impl Serialize for YamlTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Number(number) => serialize_number(number, serializer),
            Value::Array(items) => serializer.collect_seq(items.iter().map(YamlTree)),
            Value::Object(map) => {
                serializer.collect_map(map.iter().map(|(key, value)| (key, YamlTree(value))))
            }
            other => other.serialize(serializer),
        }
    }
}

/// Integers keep every digit; anything else is written as a float, where YAML
/// has no wider type.
fn serialize_number<S: Serializer>(number: &Number, serializer: S) -> Result<S::Ok, S::Error> {
    if let Some(n) = number.as_i64() {
        return serializer.serialize_i64(n);
    }
    if let Some(n) = number.as_u64() {
        return serializer.serialize_u64(n);
    }
    if let Some(n) = number.as_i128() {
        return serializer.serialize_i128(n);
    }
    if let Some(n) = number.as_u128() {
        return serializer.serialize_u128(n);
    }

    let float: f64 = number.as_str().parse().map_err(S::Error::custom)?;
    serializer.serialize_f64(float)
}
