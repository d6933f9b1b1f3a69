//! The `{data, status, message}` wrapper every endpoint of the match service
//! responds with, and the identifiers carried inside it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{Error, ErrorKind};

/// Placeholder printed when the service leaves out `status` or `message`.
pub const NOT_AVAILABLE: &str = "N/A";

/// A server-issued identifier.
///
/// The service hands out either numbers or strings depending on the entity, so
/// the identifier keeps whichever JSON type it arrived as and is written back
/// the same way when it's used in a later request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResourceId::Number(id) => write!(f, "{id}"),
            ResourceId::Text(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Number(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}

impl TryFrom<&Value> for ResourceId {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(id) => Ok(ResourceId::Text(id.clone())),
            Value::Number(n) => n.as_i64().map(ResourceId::Number).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidId,
                    Some(format!("{n} is not an integer identifier").into()),
                )
            }),
            other => Err(Error::new(
                ErrorKind::InvalidId,
                Some(format!("unexpected identifier {other}").into()),
            )),
        }
    }
}

/// `status` and `message` are only ever printed, so any JSON type is accepted
/// for them. `data` keeps an explicit `null` apart from a missing key.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub data: Option<Value>,
}

/// Maps a present key to `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Text for a metadata field: strings bare, other JSON as written, `N/A` if unset.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl ApiResponse {
    pub fn status(&self) -> String {
        display_value(self.status.as_ref())
    }

    pub fn message(&self) -> String {
        display_value(self.message.as_ref())
    }

    /// Borrows `data`, failing only when the key is absent. An explicit
    /// `null` comes back as `Value::Null`.
    pub fn data(&self) -> Result<&Value, Error> {
        self.data
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::MissingData, None))
    }

    /// The identifier of the record the request created.
    pub fn resource_id(&self) -> Result<ResourceId, Error> {
        ResourceId::try_from(self.data()?)
    }
}
