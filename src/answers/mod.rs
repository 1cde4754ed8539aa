pub mod repository;
pub mod store;
pub mod types;

pub use repository::{AnswerRepository, ANSWERS_KEY, LAST_SAVED_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use types::{
    clamp_rating, AnswerParseError, AnswerSheet, DEFAULT_RATING, MAX_RATING, MIN_RATING,
};
