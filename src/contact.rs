use serde::{Deserialize, Serialize};
use std::fmt;

/// A single entry in the contact book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
}

impl ContactRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Key used for case-insensitive name lookups
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}
