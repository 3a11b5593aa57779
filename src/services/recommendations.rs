use std::cmp::Ordering;
use std::sync::Arc;

use crate::{
    db::InteractionStore,
    error::AppResult,
    models::{ItemId, Recommendation, UserId},
};

use super::svd::{ModelError, RatingModel};

/// Maximum number of recommendations returned per user
pub const TOP_K: usize = 5;

/// Scores and ranks the items a user has not interacted with yet
#[derive(Clone)]
pub struct Recommender {
    interactions: Arc<InteractionStore>,
    model: Arc<dyn RatingModel>,
}

impl Recommender {
    pub fn new(interactions: Arc<InteractionStore>, model: Arc<dyn RatingModel>) -> Self {
        Self {
            interactions,
            model,
        }
    }

    pub fn interactions(&self) -> &InteractionStore {
        &self.interactions
    }

    /// Items eligible for `user_id`, in store enumeration order
    pub fn candidates(&self, user_id: UserId) -> Vec<ItemId> {
        let interacted = self.interactions.items_interacted_by(user_id);
        self.interactions
            .all_item_ids()
            .iter()
            .copied()
            .filter(|item| !interacted.contains(item))
            .collect()
    }

    /// Top `TOP_K` candidates for `user_id`, highest predicted score first.
    ///
    /// Equal scores keep candidate enumeration order. A user who has interacted
    /// with every item gets an empty list.
    pub fn recommend(&self, user_id: UserId) -> AppResult<Vec<Recommendation>> {
        let mut scored = Vec::new();
        for item_id in self.candidates(user_id) {
            let estimate = self.model.predict(user_id, item_id);
            if !estimate.is_finite() {
                return Err(ModelError::InvalidPrediction { user_id, item_id }.into());
            }
            scored.push((item_id, estimate));
        }

        // stable: ties stay in enumeration order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        tracing::debug!(user_id, candidates = scored.len(), "Scored candidates");

        Ok(scored
            .into_iter()
            .take(TOP_K)
            .map(|(item_id, estimate)| Recommendation::new(item_id, estimate))
            .collect())
    }
}
