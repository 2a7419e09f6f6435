use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Local-storage key holding the serialized session user.
pub const SESSION_USER_KEY: &str = "skysail_user";

/// Role assumed by role checks when the stored user has none.
pub const DEFAULT_ROLE: &str = "user";

/// Keys that can carry the user's identity. At least one must be truthy.
pub const IDENTITY_FIELDS: [&str; 3] = ["id_user", "id", "username"];

/// The cached user object, exactly as the login page stored it. Nothing here
/// is verified; a well-formed object is trusted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionUser(Map<String, Value>);

impl SessionUser {
    /// Accept `value` only if it is an object with a truthy identity field.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => {
                let user = Self(fields);
                user.identity().is_some().then_some(user)
            }
            _ => None,
        }
    }

    /// Parse stored JSON. Malformed text is an error; well-formed JSON that
    /// is not a valid user is `Ok(None)`.
    pub fn parse(raw: &str) -> Result<Option<Self>, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(value))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// First truthy identity field, in `id_user`, `id`, `username` order.
    pub fn identity(&self) -> Option<&Value> {
        IDENTITY_FIELDS
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| is_truthy(value))
    }

    /// Stored role, if it is a non-empty string.
    pub fn role(&self) -> Option<&str> {
        self.0
            .get("role")
            .and_then(Value::as_str)
            .filter(|role| !role.is_empty())
    }

    /// Role used by role checks. A falsy role (missing, null, empty, 0,
    /// false) reads as [`DEFAULT_ROLE`]. A truthy role that is not a string
    /// is `None` and matches no allow-set.
    pub fn effective_role(&self) -> Option<&str> {
        match self.0.get("role") {
            Some(Value::String(role)) if !role.is_empty() => Some(role.as_str()),
            Some(role) if is_truthy(role) => None,
            _ => Some(DEFAULT_ROLE),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Truthiness as the page scripts see it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
