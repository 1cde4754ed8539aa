use std::cmp::Ordering;

use super::level::{classify, overall_message, Level};
use crate::answers::AnswerSheet;
use crate::catalog::Catalog;

/// Shown instead of a score when no category has an answer yet
pub const INSUFFICIENT_DATA_MESSAGE: &str =
    "Responde al menos algunas preguntas para ver tu diagnóstico.";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Mean of the answered ratings, 0.0 when nothing was answered
    pub average: f64,
    pub answered: usize,
}

impl CategoryScore {
    pub fn is_answered(&self) -> bool {
        self.average > 0.0
    }

    pub fn level(&self) -> Level {
        classify(self.average)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallResult {
    pub average: f64,
    pub level: Level,
    /// Narrative with the one-decimal average appended
    pub message: String,
    /// Answered categories, weakest first
    pub ranked: Vec<CategoryScore>,
}

/// Outcome of the overall diagnostic
#[derive(Debug, Clone, PartialEq)]
pub enum Overall {
    /// No category has a single answer
    Insufficient,
    Scored(OverallResult),
}

impl Overall {
    pub fn message(&self) -> &str {
        match self {
            Overall::Insufficient => INSUFFICIENT_DATA_MESSAGE,
            Overall::Scored(result) => &result.message,
        }
    }

    pub fn result(&self) -> Option<&OverallResult> {
        match self {
            Overall::Insufficient => None,
            Overall::Scored(result) => Some(result),
        }
    }
}

/// Average the answered ratings of every category, in catalog order.
///
/// Unanswered questions count toward neither the sum nor the count.
pub fn compute_category_scores(answers: &AnswerSheet, catalog: &Catalog) -> Vec<CategoryScore> {
    catalog
        .categories()
        .iter()
        .map(|category| {
            let mut sum = 0u32;
            let mut count = 0usize;

            for id in category.question_ids() {
                if let Some(rating) = answers.get(&id) {
                    sum += u32::from(rating);
                    count += 1;
                }
            }

            let average = if count > 0 {
                f64::from(sum) / count as f64
            } else {
                0.0
            };

            CategoryScore {
                id: category.id.clone(),
                name: category.name.clone(),
                description: category.description.clone(),
                average,
                answered: count,
            }
        })
        .collect()
}

/// Aggregate category scores into the overall diagnostic.
///
/// Categories with no answers are left out. The remaining ones are returned
/// sorted ascending by average; ties keep catalog order.
pub fn compute_overall(scores: &[CategoryScore]) -> Overall {
    let mut ranked: Vec<CategoryScore> = scores
        .iter()
        .filter(|s| s.is_answered())
        .cloned()
        .collect();

    if ranked.is_empty() {
        return Overall::Insufficient;
    }

    let average = ranked.iter().map(|s| s.average).sum::<f64>() / ranked.len() as f64;
    let level = classify(average);
    let message = format!(
        "{} (Promedio general: {} / 5)",
        overall_message(level),
        format_average(average)
    );

    // Vec::sort_by is stable
    ranked.sort_by(|a, b| a.average.partial_cmp(&b.average).unwrap_or(Ordering::Equal));

    Overall::Scored(OverallResult {
        average,
        level,
        message,
        ranked,
    })
}

/// One decimal place, as shown in badges and the overall message.
///
/// Rounds on the exact binary value with halves going up, so 2.25 shows as
/// "2.3" while 0.15 (stored just below the half) shows as "0.1".
pub fn format_average(average: f64) -> String {
    let twentieths = (average * 20.0).round();
    // mul_add rounds once, so a zero remainder means 20 * average is exact
    let exact_half = average.mul_add(20.0, -twentieths) == 0.0 && twentieths % 2.0 == 1.0;

    if exact_half {
        let tenths = (twentieths as i64 + 1) / 2;
        format!("{}.{}", tenths / 10, tenths % 10)
    } else {
        format!("{:.1}", average)
    }
}
