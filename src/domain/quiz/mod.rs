//! Quiz play: pick a random question the player has not seen yet.

pub mod selector;

pub use selector::{select_next, CategoryFilter, QuizOutcome};

/// Category id the front end sends when the player picks "ALL".
pub const ALL_CATEGORIES_ID: i32 = 0;

/// Category type the front end sends alongside [`ALL_CATEGORIES_ID`].
pub const ALL_CATEGORIES_TYPE: &str = "click";
