use serde::Deserialize;

use crate::services::svd::Svd;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of latent factors per user and item
    #[serde(default = "default_svd_factors")]
    pub svd_factors: usize,

    /// Number of SGD passes over the training set
    #[serde(default = "default_svd_epochs")]
    pub svd_epochs: usize,

    /// SGD learning rate shared by biases and factors
    #[serde(default = "default_svd_learning_rate")]
    pub svd_learning_rate: f64,

    /// L2 regularization shared by biases and factors
    #[serde(default = "default_svd_regularization")]
    pub svd_regularization: f64,

    /// Standard deviation of the factor initialization
    #[serde(default = "default_svd_init_std")]
    pub svd_init_std: f64,

    /// Share of interactions held out of training for evaluation
    #[serde(default = "default_holdout_fraction")]
    pub holdout_fraction: f64,

    /// Seed for the split and the factor initialization
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_svd_factors() -> usize {
    100
}

fn default_svd_epochs() -> usize {
    20
}

fn default_svd_learning_rate() -> f64 {
    0.005
}

fn default_svd_regularization() -> f64 {
    0.02
}

fn default_svd_init_std() -> f64 {
    0.1
}

fn default_holdout_fraction() -> f64 {
    0.2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            svd_factors: default_svd_factors(),
            svd_epochs: default_svd_epochs(),
            svd_learning_rate: default_svd_learning_rate(),
            svd_regularization: default_svd_regularization(),
            svd_init_std: default_svd_init_std(),
            holdout_fraction: default_holdout_fraction(),
            random_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the trainer cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..1.0).contains(&self.holdout_fraction) {
            anyhow::bail!(
                "HOLDOUT_FRACTION must be in [0, 1), got {}",
                self.holdout_fraction
            );
        }
        self.svd().validate()?;
        Ok(())
    }

    /// Model hyperparameters from this configuration
    pub fn svd(&self) -> Svd {
        Svd {
            factors: self.svd_factors,
            epochs: self.svd_epochs,
            learning_rate: self.svd_learning_rate,
            regularization: self.svd_regularization,
            init_std: self.svd_init_std,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
