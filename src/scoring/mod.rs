pub mod engine;
pub mod level;

pub use engine::{
    compute_category_scores, compute_overall, format_average, CategoryScore, Overall,
    OverallResult, INSUFFICIENT_DATA_MESSAGE,
};
pub use level::{advise, classify, overall_message, Level, MEDIUM_THRESHOLD, STRONG_THRESHOLD};
