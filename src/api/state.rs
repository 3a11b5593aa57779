use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::{
    config::Config,
    db::{
        sample::{sample_interactions, sample_users},
        InteractionStore, UserRegistry,
    },
    models::{Interaction, RatingScale, User},
    services::{evaluation, split::train_test_split, RatingModel, Recommender},
};

/// Facts about the fitted model, reported by the health endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelSummary {
    pub factors: usize,
    pub epochs: usize,
    pub trained_on: usize,
    pub held_out: usize,
    pub holdout_rmse: Option<f64>,
    pub global_mean: f64,
    pub fitted_at: DateTime<Utc>,
}

/// Shared application state.
///
/// Everything behind it is built before the server starts and never mutated,
/// so handlers read it without locks.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserRegistry>,
    pub recommender: Arc<Recommender>,
    pub model_summary: Option<Arc<ModelSummary>>,
}

impl AppState {
    /// Wraps already-built parts; used directly by tests with a stub model
    pub fn new(users: UserRegistry, interactions: InteractionStore, model: Arc<dyn RatingModel>) -> Self {
        Self {
            users: Arc::new(users),
            recommender: Arc::new(Recommender::new(Arc::new(interactions), model)),
            model_summary: None,
        }
    }

    /// Builds the state from the bundled sample data
    pub fn bootstrap(config: &Config) -> anyhow::Result<Self> {
        Self::from_data(config, sample_users(), sample_interactions())
    }

    /// Builds the stores, holds out part of the interactions and fits the model.
    ///
    /// Any failure here is fatal: the service cannot answer without a model.
    pub fn from_data(
        config: &Config,
        users: Vec<User>,
        interactions: Vec<Interaction>,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let users = UserRegistry::new(users);
        let store = InteractionStore::new(interactions);
        tracing::info!(
            users = users.len(),
            interactions = store.len(),
            items = store.all_item_ids().len(),
            "Loaded interaction data"
        );

        let mut rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let split = train_test_split(store.interactions(), config.holdout_fraction, &mut rng);
        let params = config.svd();

        let started = Instant::now();
        let model = params
            .fit(&split.train, RatingScale::FIVE_STAR, &mut rng)
            .map_err(|e| anyhow::anyhow!("Failed to fit recommendation model: {}", e))?;
        let holdout_rmse = evaluation::rmse(&model, &split.holdout);

        tracing::info!(
            factors = params.factors,
            epochs = params.epochs,
            trained_on = split.train.len(),
            held_out = split.holdout.len(),
            holdout_rmse = ?holdout_rmse,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model fitted"
        );

        let summary = ModelSummary {
            factors: params.factors,
            epochs: params.epochs,
            trained_on: split.train.len(),
            held_out: split.holdout.len(),
            holdout_rmse,
            global_mean: model.global_mean(),
            fitted_at: Utc::now(),
        };

        let mut state = Self::new(users, store, Arc::new(model));
        state.model_summary = Some(Arc::new(summary));
        Ok(state)
    }
}
