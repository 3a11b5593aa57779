use serde::{Deserialize, Serialize};

/// Identifier of a user in the registry and the interaction log
pub type UserId = i64;

/// Self-reported gender of a user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// A known user.
///
/// Only `user_id` takes part in recommendation; the remaining fields are
/// descriptive profile data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub user_id: UserId,
    pub age: u32,
    pub gender: Gender,
    pub location: String,
}

impl User {
    pub fn new(user_id: UserId, age: u32, gender: Gender, location: impl Into<String>) -> Self {
        Self {
            user_id,
            age,
            gender,
            location: location.into(),
        }
    }
}
