use convert_case::{Case, Casing};

use crate::{Result, error};

/// True for characters permitted in a control name.
pub(crate) fn valid_name_char(c: char) -> bool {
    (c.is_ascii_lowercase() || c.is_ascii_digit()) || c == '_'
}

/// True when every character of `name` is permitted.
pub(crate) fn valid_name(name: &str) -> bool {
    name.chars().all(valid_name_char)
}

/// A control name: lowercase ASCII alphanumerics plus underscores.
///
/// Names identify control kinds in diagnostics, tracing output, and tree
/// dumps. They carry no layout semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlName {
    /// The validated name string.
    name: String,
}

impl ControlName {
    /// Create a new name, returning an error if the string contains invalid
    /// characters.
    fn new(name: &str) -> Result<Self> {
        if !valid_name(name) {
            return Err(error::Error::Invalid(name.into()));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Munge an arbitrary string into a valid control name by converting to
    /// snake case and dropping any remaining invalid characters.
    pub fn convert(name: &str) -> Self {
        let name = name.to_case(Case::Snake);
        Self {
            name: name.chars().filter(|x| valid_name_char(*x)).collect(),
        }
    }
}

impl std::fmt::Display for ControlName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq<&str> for ControlName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl TryFrom<&str> for ControlName {
    type Error = error::Error;
    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}
