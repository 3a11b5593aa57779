use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Interaction;

/// Interactions divided into a training part and a held-out part
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: Vec<Interaction>,
    pub holdout: Vec<Interaction>,
}

/// Number of interactions to hold out of `n` for a given fraction.
///
/// Rounds up, and falls back to zero when nothing would be left to train on.
pub fn holdout_size(n: usize, fraction: f64) -> usize {
    if fraction <= 0.0 || n == 0 {
        return 0;
    }
    let size = (fraction * n as f64).ceil() as usize;
    if size >= n {
        0
    } else {
        size
    }
}

/// Shuffles the interactions and moves `holdout_size(n, fraction)` of them
/// into the holdout set.
pub fn train_test_split<R: Rng>(
    interactions: &[Interaction],
    fraction: f64,
    rng: &mut R,
) -> Split {
    let n_holdout = holdout_size(interactions.len(), fraction);
    if n_holdout == 0 {
        return Split {
            train: interactions.to_vec(),
            holdout: Vec::new(),
        };
    }

    let mut shuffled = interactions.to_vec();
    shuffled.shuffle(rng);
    let train = shuffled.split_off(n_holdout);

    Split {
        train,
        holdout: shuffled,
    }
}
