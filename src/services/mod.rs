pub mod evaluation;
pub mod recommendations;
pub mod split;
pub mod svd;

pub use recommendations::Recommender;
pub use svd::{ModelError, RatingModel, Svd, SvdModel};
