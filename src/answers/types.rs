use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lowest rating on the Likert scale
pub const MIN_RATING: u8 = 1;
/// Highest rating on the Likert scale
pub const MAX_RATING: u8 = 5;
/// Rating shown for a question nobody has answered yet
pub const DEFAULT_RATING: u8 = 3;

/// Clamp any integer into the rating range
pub fn clamp_rating(value: i64) -> u8 {
    value.clamp(i64::from(MIN_RATING), i64::from(MAX_RATING)) as u8
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerParseError {
    InvalidJson(String),
    NotAnObject,
}

impl fmt::Display for AnswerParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerParseError::InvalidJson(msg) => write!(f, "invalid JSON: {}", msg),
            AnswerParseError::NotAnObject => write!(f, "expected a JSON object of ratings"),
        }
    }
}

impl std::error::Error for AnswerParseError {}

/// Sparse mapping from question id to rating.
///
/// A missing key means the question is unanswered. Stored ratings are always
/// within `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    ratings: BTreeMap<String, u8>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted JSON form (`{"finanzas-0": 4, ...}`).
    ///
    /// Entries that are not JSON numbers are dropped as unanswered. Numbers
    /// are rounded to the nearest whole rating (halves away from zero) and
    /// clamped into the scale.
    pub fn from_json(text: &str) -> Result<Self, AnswerParseError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| AnswerParseError::InvalidJson(e.to_string()))?;

        let object = value.as_object().ok_or(AnswerParseError::NotAnObject)?;

        let ratings = object
            .iter()
            .filter_map(|(id, value)| {
                value
                    .as_f64()
                    .map(|v| (id.clone(), clamp_rating(v.round() as i64)))
            })
            .collect();

        Ok(Self { ratings })
    }

    pub fn to_json(&self) -> String {
        // A map of string keys to integers always serializes
        serde_json::to_string(&self.ratings).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn get(&self, question_id: &str) -> Option<u8> {
        self.ratings.get(question_id).copied()
    }

    /// Current rating, falling back to `DEFAULT_RATING` when unanswered
    pub fn rating_or_default(&self, question_id: &str) -> u8 {
        self.get(question_id).unwrap_or(DEFAULT_RATING)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.ratings.contains_key(question_id)
    }

    /// Record a rating, clamped into range. Returns the stored value.
    pub fn set(&mut self, question_id: &str, rating: u8) -> u8 {
        let rating = clamp_rating(i64::from(rating));
        self.ratings.insert(question_id.to_string(), rating);
        rating
    }

    pub fn clear(&mut self) {
        self.ratings.clear();
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.ratings.iter().map(|(id, rating)| (id.as_str(), *rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sheet_empty() {
        let sheet = AnswerSheet::new();
        assert!(sheet.is_empty());
        assert_eq!(sheet.get("finanzas-0"), None);
    }

    #[test]
    fn test_rating_defaults_to_three() {
        let sheet = AnswerSheet::new();
        assert_eq!(sheet.rating_or_default("finanzas-0"), DEFAULT_RATING);
        assert_eq!(DEFAULT_RATING, 3);
    }

    #[test]
    fn test_set_clamps() {
        let mut sheet = AnswerSheet::new();
        assert_eq!(sheet.set("a-0", 0), 1);
        assert_eq!(sheet.set("a-1", 9), 5);
        assert_eq!(sheet.set("a-2", 4), 4);
        assert_eq!(sheet.get("a-0"), Some(1));
        assert_eq!(sheet.get("a-1"), Some(5));
    }

    #[test]
    fn test_clamp_rating() {
        assert_eq!(clamp_rating(-3), 1);
        assert_eq!(clamp_rating(3), 3);
        assert_eq!(clamp_rating(500), 5);
    }

    #[test]
    fn test_clear() {
        let mut sheet = AnswerSheet::new();
        sheet.set("a-0", 2);
        sheet.clear();
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut sheet = AnswerSheet::new();
        sheet.set("finanzas-0", 5);
        sheet.set("liderazgo-2", 1);

        let json = sheet.to_json();
        assert_eq!(json, r#"{"finanzas-0":5,"liderazgo-2":1}"#);
        assert_eq!(AnswerSheet::from_json(&json).unwrap(), sheet);
    }

    #[test]
    fn test_from_json_skips_non_numeric() {
        let sheet = AnswerSheet::from_json(
            r#"{"a-0": 4, "a-1": "5", "a-2": null, "a-3": true, "a-4": [3]}"#,
        )
        .unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get("a-0"), Some(4));
        assert!(!sheet.is_answered("a-1"));
        assert!(!sheet.is_answered("a-2"));
    }

    #[test]
    fn test_from_json_accepts_float_ratings() {
        let sheet =
            AnswerSheet::from_json(r#"{"finanzas-0": 4.0, "finanzas-1": 2.5, "finanzas-2": 1.2}"#)
                .unwrap();
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.get("finanzas-0"), Some(4));
        assert_eq!(sheet.get("finanzas-1"), Some(3));
        assert_eq!(sheet.get("finanzas-2"), Some(1));
    }

    #[test]
    fn test_from_json_clamps_out_of_range_floats() {
        let sheet = AnswerSheet::from_json(r#"{"a-0": 7.8, "a-1": 0.4, "a-2": 1e300}"#).unwrap();
        assert_eq!(sheet.get("a-0"), Some(5));
        assert_eq!(sheet.get("a-1"), Some(1));
        assert_eq!(sheet.get("a-2"), Some(5));
    }

    #[test]
    fn test_from_json_clamps_out_of_range() {
        let sheet = AnswerSheet::from_json(r#"{"a-0": 12, "a-1": -1}"#).unwrap();
        assert_eq!(sheet.get("a-0"), Some(5));
        assert_eq!(sheet.get("a-1"), Some(1));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            AnswerSheet::from_json("{not json"),
            Err(AnswerParseError::InvalidJson(_))
        ));
        assert_eq!(
            AnswerSheet::from_json("[1, 2, 3]"),
            Err(AnswerParseError::NotAnObject)
        );
    }
}
