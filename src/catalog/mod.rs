pub mod builtin;
pub mod types;
pub mod validation;

pub use builtin::builtin_categories;
pub use types::{question_id, Catalog, Category, QuestionRef};
pub use validation::validate_catalog;
