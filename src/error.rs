use std::fmt;

/// Errors that can occur while constructing a principal.
///
/// All variants are raised synchronously at construction time; the role
/// membership query never fails. Construction is atomic: either a fully
/// validated [`Principal`](crate::Principal) is returned, or one of these
/// errors, with no partially constructed value observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The record input was neither a string nor a usable non-array object
    InvalidUserData,
    /// The positional roles argument was not a sequence
    InvalidRoles,
    /// The resolved username field was missing, non-string, or empty
    InvalidUsername,
    /// The resolved roles field was not a sequence of strings
    InvalidRolesField,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidUserData => {
                write!(f, "invalid user data: argument 1 must be a string or an object")
            }
            Error::InvalidRoles => {
                write!(f, "invalid roles: argument 2 must be an array")
            }
            Error::InvalidUsername => {
                write!(f, "user data does not define a valid username")
            }
            Error::InvalidRolesField => {
                write!(f, "user data does not define valid roles")
            }
        }
    }
}

impl std::error::Error for Error {}
