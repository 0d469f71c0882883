use std::fmt::{Debug, Formatter};

/// Stored as entered. Debug output is masked so passwords do not leak into
/// logs through derived formatting.
#[derive(Clone, Eq, PartialEq)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Password> for String {
    fn from(value: Password) -> Self {
        value.0
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password(****)")
    }
}
