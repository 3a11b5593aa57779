use serde::{Deserialize, Serialize};

use super::UserId;

/// Identifier of an item that users interact with
pub type ItemId = i64;

/// Inclusive bounds of the interaction score scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingScale {
    pub min: f64,
    pub max: f64,
}

impl RatingScale {
    /// The 1 to 5 scale used by the sample data
    pub const FIVE_STAR: RatingScale = RatingScale { min: 1.0, max: 5.0 };

    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }

    /// Clamps an estimate into the scale
    pub fn clip(&self, score: f64) -> f64 {
        score.clamp(self.min, self.max)
    }
}

/// One observed (user, item, score) triple
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub interaction_score: f64,
}

impl Interaction {
    pub fn new(user_id: UserId, item_id: ItemId, interaction_score: f64) -> Self {
        Self {
            user_id,
            item_id,
            interaction_score,
        }
    }
}
