use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{error::Error, query::RoleQuery};

/// Field names that can never be adopted as extra attributes.
///
/// The canonical `username`/`roles` fields are always set from validated
/// values, and the underscored names plus the query-method name are blocked
/// so a hostile record cannot stomp internal state.
const RESERVED_FIELDS: [&str; 5] = ["username", "_username", "roles", "_roles", "hasRole"];

/// A validated request-time identity for authorization checks.
///
/// A `Principal` carries a non-empty username, an ordered role list
/// (duplicates and order preserved as given), and arbitrary extra attributes
/// adopted from the construction input. It is a pure in-memory value object:
/// every field is written exactly once, at construction, so a shared
/// `Principal` is safe to read from multiple threads without synchronization.
///
/// Construction goes through one of three entry points, all of which funnel
/// into the same validation routine:
///
/// - [`Principal::from_record`] — a single JSON object ("record" form)
/// - [`Principal::from_parts`] — positional username/roles plus optional
///   extra properties
/// - [`Principal::new`] — fully typed convenience for the common case
///
/// # Examples
///
/// ```
/// use principal_core::Principal;
/// use serde_json::json;
///
/// let principal = Principal::from_record(json!({
///     "username": "foobar",
///     "roles": ["admin", "user"],
///     "tenant": "acme",
/// }))?;
///
/// assert_eq!(principal.username(), "foobar");
/// assert!(principal.has_role("admin"));
/// assert!(!principal.has_role("superadmin"));
/// assert_eq!(principal.attribute("tenant"), Some(&json!("acme")));
/// # Ok::<(), principal_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    username: String,
    roles: Vec<String>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Principal {
    /// Creates a principal from a typed username and role list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUsername`] if `username` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use principal_core::Principal;
    ///
    /// let principal = Principal::new("alice", ["admin", "user"])?;
    /// assert_eq!(principal.roles(), &["admin", "user"]);
    /// # Ok::<(), principal_core::Error>(())
    /// ```
    pub fn new(
        username: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, Error> {
        let roles = roles
            .into_iter()
            .map(|role| Value::String(role.into()))
            .collect();
        Self::from_parts(username, Value::Array(roles), None)
    }

    /// Creates a principal from a record: a single JSON object carrying
    /// `username`, `roles`, and any extra attributes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUserData`] if `record` is not a non-array object.
    /// - [`Error::InvalidUsername`] if the `username` field is missing,
    ///   not a string, or empty.
    /// - [`Error::InvalidRolesField`] if the `roles` field is not an array
    ///   of strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use principal_core::{Error, Principal};
    /// use serde_json::json;
    ///
    /// let principal = Principal::from_record(json!({
    ///     "username": "alice",
    ///     "roles": ["viewer"],
    /// }))?;
    /// assert_eq!(principal.username(), "alice");
    ///
    /// assert_eq!(Principal::from_record(json!(42)), Err(Error::InvalidUserData));
    /// # Ok::<(), principal_core::Error>(())
    /// ```
    pub fn from_record(record: Value) -> Result<Self, Error> {
        match record {
            Value::Object(record) => Self::from_working_record(record),
            _ => Err(Error::InvalidUserData),
        }
    }

    /// Creates a principal from positional fields: a username, a roles
    /// array, and optional extra properties.
    ///
    /// `props`, when present, must be a non-array object; any other value is
    /// treated as an empty record rather than an error. The working record is
    /// assembled from the props object with its `username` and `roles`
    /// entries overwritten by the positional values, then validated exactly
    /// like [`Principal::from_record`] input.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRoles`] if `roles` is not an array.
    /// - [`Error::InvalidUsername`] if `username` is empty.
    /// - [`Error::InvalidRolesField`] if the roles array contains a
    ///   non-string element.
    ///
    /// # Examples
    ///
    /// ```
    /// use principal_core::Principal;
    /// use serde_json::json;
    ///
    /// let principal = Principal::from_parts(
    ///     "alice",
    ///     json!(["admin"]),
    ///     Some(json!({"tenant": "acme"})),
    /// )?;
    /// assert_eq!(principal.attribute("tenant"), Some(&json!("acme")));
    /// # Ok::<(), principal_core::Error>(())
    /// ```
    pub fn from_parts(
        username: impl Into<String>,
        roles: Value,
        props: Option<Value>,
    ) -> Result<Self, Error> {
        if !roles.is_array() {
            return Err(Error::InvalidRoles);
        }

        // Malformed or absent props degrades to an empty record, not an
        // error. The props object is owned here, so the working record is
        // independent of anything the caller still holds.
        let mut record = match props {
            Some(Value::Object(props)) => props,
            _ => Map::new(),
        };
        record.insert("username".to_owned(), Value::String(username.into()));
        record.insert("roles".to_owned(), roles);

        Self::from_working_record(record)
    }

    /// Validates the working record and assembles the principal.
    ///
    /// Validation runs first; attribute adoption happens only on a record
    /// that already has a usable username and role list, and `username` /
    /// `roles` are always taken from the validated values rather than from
    /// the general field pass.
    fn from_working_record(record: Map<String, Value>) -> Result<Self, Error> {
        let username = match record.get("username") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(Error::InvalidUsername),
        };

        let roles = match record.get("roles") {
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| match value {
                    Value::String(role) => Ok(role.clone()),
                    _ => Err(Error::InvalidRolesField),
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(Error::InvalidRolesField),
        };

        let mut attributes = Map::new();
        for (name, value) in record {
            if RESERVED_FIELDS.contains(&name.as_str()) {
                if name != "username" && name != "roles" {
                    tracing::debug!(field = %name, "dropping reserved field from principal attributes");
                }
                continue;
            }
            attributes.insert(name, value);
        }

        tracing::trace!(
            username = %username,
            role_count = roles.len(),
            attribute_count = attributes.len(),
            "constructed principal"
        );

        Ok(Self {
            username,
            roles,
            attributes,
        })
    }

    /// Returns the principal's username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the principal's roles, in the order they were given.
    ///
    /// The returned slice is a read-only view; the internal role list cannot
    /// be mutated through it.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns the extra attribute with the given name, if present.
    ///
    /// Only non-reserved fields from the construction input appear here;
    /// `username` and `roles` are reachable through their own accessors.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns all extra attributes adopted at construction.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Answers a role-membership query.
    ///
    /// Accepts a single role name or a sequence of role names (see
    /// [`RoleQuery`] for the accepted conversions) and returns `true` iff at
    /// least one queried role is held by this principal. Comparison is exact
    /// string equality. This operation never fails: an empty query, disjoint
    /// role sets, or input that is neither a string nor a sequence all
    /// answer `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use principal_core::Principal;
    ///
    /// let principal = Principal::new("alice", ["user", "admin"])?;
    /// assert!(principal.has_role("user"));
    /// assert!(principal.has_role(["bad", "admin"]));
    /// assert!(!principal.has_role(["bad", "role"]));
    /// assert!(!principal.has_role(serde_json::json!(42)));
    /// # Ok::<(), principal_core::Error>(())
    /// ```
    pub fn has_role(&self, query: impl Into<RoleQuery>) -> bool {
        query.into().matches(&self.roles)
    }
}

/// The conversion-trait spelling of [`Principal::from_record`].
impl TryFrom<Value> for Principal {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_record(value)
    }
}

/// Deserialization routes through [`Principal::from_record`], so payloads
/// from the wire pass the same validation as programmatic construction.
impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = Value::deserialize(deserializer)?;
        Self::from_record(record).map_err(serde::de::Error::custom)
    }
}
