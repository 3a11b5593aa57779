use crate::models::{Gender, Interaction, User};

/// Sample users loaded at startup
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(1, 23, Gender::Male, "New York"),
        User::new(2, 30, Gender::Female, "London"),
        User::new(3, 26, Gender::Female, "Tokyo"),
    ]
}

/// Sample interactions loaded at startup
pub fn sample_interactions() -> Vec<Interaction> {
    vec![
        Interaction::new(1, 101, 5.0),
        Interaction::new(1, 102, 3.0),
        Interaction::new(2, 103, 4.0),
        Interaction::new(2, 104, 2.0),
        Interaction::new(3, 105, 5.0),
    ]
}
