use super::UserId;
use std::fmt;

/// Author of an inbound message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: UserId,
}

impl User {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self { id: id.into() }
    }

    /// Platform markup that addresses this user
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
