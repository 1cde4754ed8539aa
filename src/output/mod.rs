pub mod formatter;

pub use formatter::{
    format_badge, format_last_saved, format_questionnaire, format_results, format_results_tsv,
    format_timestamp, rating_dots, rating_split, should_use_colors, EMPTY_DOT, FILLED_DOT,
    NEVER_SAVED_MESSAGE,
};
