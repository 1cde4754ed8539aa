//! Business self-assessment questionnaire: a static catalog of Likert
//! questions, an answer sheet persisted to a local key-value store, and a
//! scoring engine that turns answers into per-area and overall diagnostics.

pub mod answers;
pub mod catalog;
pub mod config;
pub mod notices;
pub mod output;
pub mod prompt;
pub mod scoring;
pub mod session;
pub mod tui;

pub use session::Session;
