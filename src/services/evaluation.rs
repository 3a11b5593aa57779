use crate::models::Interaction;

use super::svd::RatingModel;

/// Root mean squared error of the model over `holdout`.
///
/// Returns `None` when there is nothing to evaluate.
pub fn rmse(model: &dyn RatingModel, holdout: &[Interaction]) -> Option<f64> {
    if holdout.is_empty() {
        return None;
    }
    let sum: f64 = holdout
        .iter()
        .map(|r| (model.predict(r.user_id, r.item_id) - r.interaction_score).powi(2))
        .sum();
    Some((sum / holdout.len() as f64).sqrt())
}
