//! JSON text for serde-serializable values.
//!
//! [`from_json_overwrite`] updates an existing value in place: only the fields present in the
//! text change, nested objects merge recursively and everything else keeps its current value.
//! That holds for the fields serde sees. `#[serde(skip)]` fields are rebuilt from their
//! `Default`, and a value whose current state has no JSON form (a NaN float, say) is refused
//! with [`JsonError::TargetNotRepresentable`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug)]
pub enum JsonError {
    Serialize(serde_json::Error),
    Parse(serde_json::Error),

    /// [`from_json_overwrite`] was given something other than a JSON object.
    NotAnObject,

    /// The current state of the overwrite target does not survive a trip through JSON.
    TargetNotRepresentable(serde_json::Error),
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "json serialize error: {err}"),
            Self::Parse(err) => write!(f, "json parse error: {err}"),
            Self::NotAnObject => write!(f, "json overwrite expects an object at the top level"),
            Self::TargetNotRepresentable(err) => {
                write!(f, "json overwrite target has no json form: {err}")
            }
        }
    }
}

impl std::error::Error for JsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(err) | Self::Parse(err) | Self::TargetNotRepresentable(err) => {
                Some(err)
            }
            Self::NotAnObject => None,
        }
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Render `value` as JSON text, indented when `pretty`.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, JsonError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.map_err(JsonError::Serialize)
}

/// Parse a new `T` from JSON text.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, JsonError> {
    Ok(serde_json::from_str(text)?)
}

/// Overwrite the fields of `target` that appear in `text`.
///
/// Only serde-visible fields keep their current values. Skipped fields come back as their
/// `Default`. Fails with [`JsonError::TargetNotRepresentable`] when `target` itself cannot be
/// read back from its own JSON. On error `target` is left unchanged.
pub fn from_json_overwrite<T>(text: &str, target: &mut T) -> Result<(), JsonError>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(patch) = serde_json::from_str::<Value>(text)? else {
        return Err(JsonError::NotAnObject);
    };

    let mut current = serde_json::to_value(&*target).map_err(JsonError::Serialize)?;
    if let Err(err) = <T as serde::Deserialize>::deserialize(&current) {
        return Err(JsonError::TargetNotRepresentable(err));
    }
    match &mut current {
        Value::Object(fields) => merge_objects(fields, patch),
        other => *other = Value::Object(patch),
    }

    *target = serde_json::from_value(current)?;
    Ok(())
}

fn merge_objects(into: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        match (into.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                merge_objects(existing, nested);
            }
            (_, value) => {
                into.insert(key, value);
            }
        }
    }
}
