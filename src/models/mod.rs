use serde::{Deserialize, Serialize};

mod interaction;
mod user;

pub use interaction::{Interaction, ItemId, RatingScale};
pub use user::{Gender, User, UserId};

/// A single scored item returned to the client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub item_id: ItemId,
    /// Model estimate rounded to two decimals
    pub predicted_score: f64,
}

impl Recommendation {
    pub fn new(item_id: ItemId, estimate: f64) -> Self {
        Self {
            item_id,
            predicted_score: round_score(estimate),
        }
    }
}

/// Rounds a score to two decimal places
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Query string accepted by `GET /recommend`.
///
/// Built from the raw key/value pairs so that a missing, repeated or malformed
/// `user_id` is reported with a JSON error instead of the extractor's
/// plain-text rejection. A repeated key keeps its first value.
#[derive(Debug, Default, PartialEq)]
pub struct RecommendParams {
    pub user_id: Option<String>,
}

impl From<Vec<(String, String)>> for RecommendParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self {
            user_id: pairs
                .into_iter()
                .find(|(key, _)| key == "user_id")
                .map(|(_, value)| value),
        }
    }
}

/// Response body of `GET /recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub user_id: UserId,
    pub recommendations: Vec<Recommendation>,
}
