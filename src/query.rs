use serde_json::Value;

/// A normalized role-membership query.
///
/// [`Principal::has_role`](crate::Principal::has_role) accepts either a single
/// role name or a sequence of role names; this enum is the normalized form.
/// Anything else — a number, `null`, a nested object — converts to
/// [`RoleQuery::Other`], which matches nothing. The query operation never
/// raises an error: malformed input degrades to a `false` answer.
///
/// # Examples
///
/// ```
/// use principal_core::RoleQuery;
///
/// assert_eq!(RoleQuery::from("admin"), RoleQuery::One("admin".to_string()));
/// assert_eq!(
///     RoleQuery::from(serde_json::Value::Null),
///     RoleQuery::Other,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleQuery {
    /// A single role name
    One(String),
    /// A sequence of role names; matching is set-membership OR
    Many(Vec<String>),
    /// Input that was neither a string nor a sequence; matches nothing
    Other,
}

impl RoleQuery {
    /// Returns `true` if at least one queried role appears in `roles`.
    ///
    /// Comparison is exact string equality. An empty query sequence, an empty
    /// role list, or an [`Other`](RoleQuery::Other) query all answer `false`.
    pub(crate) fn matches(&self, roles: &[String]) -> bool {
        match self {
            RoleQuery::One(queried) => roles.iter().any(|role| role == queried),
            RoleQuery::Many(queried) => queried
                .iter()
                .any(|q| roles.iter().any(|role| role == q)),
            RoleQuery::Other => false,
        }
    }
}

impl From<&str> for RoleQuery {
    fn from(role: &str) -> Self {
        RoleQuery::One(role.to_owned())
    }
}

impl From<String> for RoleQuery {
    fn from(role: String) -> Self {
        RoleQuery::One(role)
    }
}

impl From<&String> for RoleQuery {
    fn from(role: &String) -> Self {
        RoleQuery::One(role.clone())
    }
}

impl From<Vec<String>> for RoleQuery {
    fn from(roles: Vec<String>) -> Self {
        RoleQuery::Many(roles)
    }
}

impl From<Vec<&str>> for RoleQuery {
    fn from(roles: Vec<&str>) -> Self {
        RoleQuery::Many(roles.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[String]> for RoleQuery {
    fn from(roles: &[String]) -> Self {
        RoleQuery::Many(roles.to_vec())
    }
}

impl From<&[&str]> for RoleQuery {
    fn from(roles: &[&str]) -> Self {
        RoleQuery::Many(roles.iter().map(|role| (*role).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RoleQuery {
    fn from(roles: [&str; N]) -> Self {
        RoleQuery::Many(roles.iter().map(|role| (*role).to_owned()).collect())
    }
}

/// Converts dynamic query input, typically sourced from decoded request data.
///
/// A JSON string becomes a one-element query; a JSON array keeps its string
/// elements (non-string elements can never compare equal to a role name and
/// are skipped); every other value becomes [`RoleQuery::Other`].
impl From<Value> for RoleQuery {
    fn from(value: Value) -> Self {
        match value {
            Value::String(role) => RoleQuery::One(role),
            Value::Array(values) => RoleQuery::Many(
                values
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(role) => Some(role),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => RoleQuery::Other,
        }
    }
}

impl From<&Value> for RoleQuery {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(role) => RoleQuery::One(role.clone()),
            Value::Array(values) => RoleQuery::Many(
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect(),
            ),
            _ => RoleQuery::Other,
        }
    }
}
