use std::collections::HashMap;

use rand::Rng;
use rand_distr::Normal;
use thiserror::Error;

use crate::models::{Interaction, ItemId, RatingScale, UserId};

/// Error types for model fitting and scoring
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Cannot fit a model on an empty training set")]
    EmptyTrainingSet,
    #[error("Score {score} for user {user_id} and item {item_id} is outside the rating scale")]
    ScoreOutOfRange {
        user_id: UserId,
        item_id: ItemId,
        score: f64,
    },
    #[error("Invalid model parameter: {0}")]
    InvalidParameter(String),
    #[error("Non-finite prediction for user {user_id} and item {item_id}")]
    InvalidPrediction { user_id: UserId, item_id: ItemId },
}

/// A trained scoring function.
///
/// Implementations must answer for any pair of ids, falling back to a default
/// estimate for users or items never seen during training.
#[cfg_attr(test, mockall::automock)]
pub trait RatingModel: Send + Sync {
    /// Estimated score of `item_id` for `user_id`
    fn predict(&self, user_id: UserId, item_id: ItemId) -> f64;
}

/// Hyperparameters of biased matrix factorization trained with SGD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svd {
    pub factors: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    pub regularization: f64,
    pub init_std: f64,
}

impl Default for Svd {
    fn default() -> Self {
        Self {
            factors: 100,
            epochs: 20,
            learning_rate: 0.005,
            regularization: 0.02,
            init_std: 0.1,
        }
    }
}

impl Svd {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.factors == 0 {
            return Err(ModelError::InvalidParameter(
                "factors must be positive".to_string(),
            ));
        }
        if self.epochs == 0 {
            return Err(ModelError::InvalidParameter(
                "epochs must be positive".to_string(),
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ModelError::InvalidParameter(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.regularization.is_finite() && self.regularization >= 0.0) {
            return Err(ModelError::InvalidParameter(format!(
                "regularization must be non-negative, got {}",
                self.regularization
            )));
        }
        if !(self.init_std.is_finite() && self.init_std >= 0.0) {
            return Err(ModelError::InvalidParameter(format!(
                "init std must be non-negative, got {}",
                self.init_std
            )));
        }
        Ok(())
    }

    /// Fits the model on `trainset`, visiting triples in the given order each epoch
    pub fn fit<R: Rng>(
        &self,
        trainset: &[Interaction],
        scale: RatingScale,
        rng: &mut R,
    ) -> Result<SvdModel, ModelError> {
        self.validate()?;
        if trainset.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let mut users: HashMap<UserId, usize> = HashMap::new();
        let mut items: HashMap<ItemId, usize> = HashMap::new();
        let mut triples = Vec::with_capacity(trainset.len());
        let mut total = 0.0;

        for interaction in trainset {
            let score = interaction.interaction_score;
            if !scale.contains(score) {
                return Err(ModelError::ScoreOutOfRange {
                    user_id: interaction.user_id,
                    item_id: interaction.item_id,
                    score,
                });
            }
            let next_user = users.len();
            let u = *users.entry(interaction.user_id).or_insert(next_user);
            let next_item = items.len();
            let i = *items.entry(interaction.item_id).or_insert(next_item);
            triples.push((u, i, score));
            total += score;
        }

        let global_mean = total / triples.len() as f64;
        let normal = Normal::new(0.0, self.init_std)
            .map_err(|e| ModelError::InvalidParameter(e.to_string()))?;

        let k = self.factors;
        let mut user_bias = vec![0.0; users.len()];
        let mut item_bias = vec![0.0; items.len()];
        let mut user_factors: Vec<f64> = (0..users.len() * k).map(|_| rng.sample(normal)).collect();
        let mut item_factors: Vec<f64> = (0..items.len() * k).map(|_| rng.sample(normal)).collect();

        let lr = self.learning_rate;
        let reg = self.regularization;

        for _ in 0..self.epochs {
            for &(u, i, score) in &triples {
                let pu = &mut user_factors[u * k..(u + 1) * k];
                let qi = &mut item_factors[i * k..(i + 1) * k];

                let dot: f64 = pu.iter().zip(qi.iter()).map(|(p, q)| p * q).sum();
                let err = score - (global_mean + user_bias[u] + item_bias[i] + dot);

                user_bias[u] += lr * (err - reg * user_bias[u]);
                item_bias[i] += lr * (err - reg * item_bias[i]);

                for (p, q) in pu.iter_mut().zip(qi.iter_mut()) {
                    let (puf, qif) = (*p, *q);
                    *p += lr * (err * qif - reg * puf);
                    *q += lr * (err * puf - reg * qif);
                }
            }
        }

        Ok(SvdModel {
            factors: k,
            scale,
            global_mean,
            users,
            items,
            user_bias,
            item_bias,
            user_factors,
            item_factors,
        })
    }
}

/// Trained latent-factor model. Immutable once fitted.
#[derive(Debug, Clone)]
pub struct SvdModel {
    factors: usize,
    scale: RatingScale,
    global_mean: f64,
    users: HashMap<UserId, usize>,
    items: HashMap<ItemId, usize>,
    user_bias: Vec<f64>,
    item_bias: Vec<f64>,
    user_factors: Vec<f64>,
    item_factors: Vec<f64>,
}

impl SvdModel {
    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    fn user_vector(&self, u: usize) -> &[f64] {
        &self.user_factors[u * self.factors..(u + 1) * self.factors]
    }

    fn item_vector(&self, i: usize) -> &[f64] {
        &self.item_factors[i * self.factors..(i + 1) * self.factors]
    }

    /// Unclipped estimate
    fn estimate(&self, user_id: UserId, item_id: ItemId) -> f64 {
        let user = self.users.get(&user_id).copied();
        let item = self.items.get(&item_id).copied();

        let mut est = self.global_mean;
        if let Some(u) = user {
            est += self.user_bias[u];
        }
        if let Some(i) = item {
            est += self.item_bias[i];
        }
        if let (Some(u), Some(i)) = (user, item) {
            est += self
                .user_vector(u)
                .iter()
                .zip(self.item_vector(i))
                .map(|(p, q)| p * q)
                .sum::<f64>();
        }
        est
    }
}

impl RatingModel for SvdModel {
    fn predict(&self, user_id: UserId, item_id: ItemId) -> f64 {
        self.scale.clip(self.estimate(user_id, item_id))
    }
}
