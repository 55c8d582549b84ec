//! User domain model

use super::producer::DataProducer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person acting on behalf of a data producer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Identity assigned on persistence
    pub id: Option<i64>,

    /// Contact email
    pub email: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Whether the account may act
    pub is_active: bool,

    /// Producer the user belongs to
    pub producer: DataProducer,

    /// When the user was first persisted
    pub created_at: DateTime<Utc>,

    /// When the user was last persisted
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an unsaved user
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        is_active: bool,
        producer: DataProducer,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            is_active,
            producer,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new() {
        let user = User::new("test@test.org", "foo", "bar", true, DataProducer::new("NJ"));
        assert!(user.id.is_none());
        assert_eq!(user.full_name(), "foo bar");
        assert_eq!(user.producer.name, "NJ");
    }
}
