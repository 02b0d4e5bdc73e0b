//! Domain records for the trivia question bank.

pub mod category;
pub mod question;

pub use category::{category_map, Category, CategoryMap};
pub use question::{NewQuestion, Question, MAX_DIFFICULTY, MIN_DIFFICULTY};
