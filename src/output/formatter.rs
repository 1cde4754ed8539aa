use std::fmt::Display;
use std::io::IsTerminal;

use chrono::{DateTime, Local, TimeZone, Utc};
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::answers::{AnswerSheet, MAX_RATING};
use crate::catalog::Catalog;
use crate::scoring::{advise, format_average, CategoryScore, Level, Overall};

pub const NEVER_SAVED_MESSAGE: &str = "Aún no guardas un diagnóstico.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

pub const FILLED_DOT: &str = "●";
pub const EMPTY_DOT: &str = "○";

/// Number of filled and empty dots for a rating on the scale
pub fn rating_split(rating: u8) -> (usize, usize) {
    let filled = rating.min(MAX_RATING) as usize;
    (filled, MAX_RATING as usize - filled)
}

/// Filled/empty dots for a rating, e.g. "●●●○○"
pub fn rating_dots(rating: u8) -> String {
    let (filled, empty) = rating_split(rating);
    format!("{}{}", FILLED_DOT.repeat(filled), EMPTY_DOT.repeat(empty))
}

/// "X.X / 5" badge
pub fn format_badge(average: f64) -> String {
    format!("{} / {}", format_average(average), MAX_RATING)
}

/// Format every question with its id and current rating.
///
/// Unanswered questions show the default rating followed by a marker.
pub fn format_questionnaire(catalog: &Catalog, answers: &AnswerSheet, use_colors: bool) -> String {
    let term_width = get_terminal_width();
    let mut blocks = Vec::new();

    for category in catalog.categories() {
        let mut lines = Vec::new();
        if use_colors {
            lines.push(format!("{}", category.name.bold()));
            if !category.description.is_empty() {
                lines.push(format!("{}", category.description.dimmed()));
            }
        } else {
            lines.push(category.name.clone());
            if !category.description.is_empty() {
                lines.push(category.description.clone());
            }
        }

        for (index, prompt) in category.questions.iter().enumerate() {
            let id = category.question_id(index);
            let rating = answers.rating_or_default(&id);
            let marker = if answers.is_answered(&id) {
                ""
            } else {
                " (sin responder)"
            };

            // "  id  ●●●○○ 3  prompt"
            let fixed_width = 2 + id.chars().count() + 2 + 5 + 3 + 2 + marker.chars().count();
            let prompt = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(prompt, width - fixed_width)
                }
                _ => prompt.clone(),
            };

            if use_colors {
                lines.push(format!(
                    "  {}  {} {}  {}{}",
                    id.cyan(),
                    rating_dots(rating),
                    rating.bold(),
                    prompt,
                    marker.dimmed()
                ));
            } else {
                lines.push(format!(
                    "  {}  {} {}  {}{}",
                    id,
                    rating_dots(rating),
                    rating,
                    prompt,
                    marker
                ));
            }
        }

        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}

fn colorize_level(text: &str, level: Level) -> String {
    match level {
        Level::Strong => text.green().to_string(),
        Level::Medium => text.yellow().to_string(),
        Level::Weak => text.red().to_string(),
    }
}

/// Format one category result line: name, badge, level label, advice
fn format_category_line(score: &CategoryScore, name_width: usize, use_colors: bool) -> String {
    let level = score.level();
    let name = format!("{:<width$}", score.name, width = name_width);
    let badge = format_badge(score.average);
    let label = format!("{:<9}", level.label());

    if use_colors {
        format!(
            "{}  {}  {}  {}",
            name.bold(),
            colorize_level(&badge, level),
            colorize_level(&label, level),
            advise(level)
        )
    } else {
        format!("{}  {}  {}  {}", name, badge, label, advise(level))
    }
}

/// Format the overall diagnostic followed by the answered categories,
/// weakest first.
pub fn format_results(overall: &Overall, use_colors: bool) -> String {
    let result = match overall {
        Overall::Insufficient => return overall.message().to_string(),
        Overall::Scored(result) => result,
    };

    let mut lines = Vec::new();
    if use_colors {
        lines.push(colorize_level(&result.message, result.level));
    } else {
        lines.push(result.message.clone());
    }
    lines.push(String::new());

    let name_width = result
        .ranked
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);

    for score in &result.ranked {
        lines.push(format_category_line(score, name_width, use_colors));
    }

    lines.join("\n")
}

/// Results as tab-separated values for scripting
/// Columns: id, name, average (one decimal), level (no headers, no colors)
pub fn format_results_tsv(overall: &Overall) -> String {
    match overall.result() {
        None => String::new(),
        Some(result) => result
            .ranked
            .iter()
            .map(|s| {
                format!(
                    "{}\t{}\t{}\t{}",
                    s.id,
                    s.name,
                    format_average(s.average),
                    s.level()
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// "dd/mm/yyyy, HH:MM"
pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    timestamp.format("%d/%m/%Y, %H:%M").to_string()
}

/// Last-saved line in local time
pub fn format_last_saved(last_saved: Option<DateTime<Utc>>) -> String {
    match last_saved {
        Some(ts) => format!(
            "Última actualización: {}",
            format_timestamp(&ts.with_timezone(&Local))
        ),
        None => NEVER_SAVED_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{compute_category_scores, compute_overall};
    use chrono::FixedOffset;

    fn sample_overall() -> Overall {
        let mut answers = AnswerSheet::new();
        answers.set("marketing-0", 5);
        answers.set("marketing-1", 5);
        answers.set("sistemas-0", 1);
        compute_overall(&compute_category_scores(&answers, &Catalog::builtin()))
    }

    #[test]
    fn test_rating_dots() {
        assert_eq!(rating_dots(3), "●●●○○");
        assert_eq!(rating_dots(5), "●●●●●");
        assert_eq!(rating_dots(1), "●○○○○");
    }

    #[test]
    fn test_rating_split_caps_at_scale() {
        assert_eq!(rating_split(0), (0, 5));
        assert_eq!(rating_split(4), (4, 1));
        assert_eq!(rating_split(9), (5, 0));
    }

    #[test]
    fn test_format_badge() {
        assert_eq!(format_badge(14.0 / 3.0), "4.7 / 5");
        assert_eq!(format_badge(2.25), "2.3 / 5");
    }

    #[test]
    fn test_format_questionnaire_defaults() {
        let mut answers = AnswerSheet::new();
        answers.set("finanzas-1", 5);
        let result = format_questionnaire(&Catalog::builtin(), &answers, false);

        assert!(result.contains("Finanzas"));
        assert!(result.contains("Control de ingresos, gastos y rentabilidad."));

        let answered = result.lines().find(|l| l.contains("finanzas-1")).unwrap();
        assert!(answered.contains("●●●●● 5"));
        assert!(!answered.contains("sin responder"));

        let unanswered = result.lines().find(|l| l.contains("finanzas-0")).unwrap();
        assert!(unanswered.contains("●●●○○ 3"));
        assert!(unanswered.contains("(sin responder)"));
    }

    #[test]
    fn test_format_results_insufficient() {
        let result = format_results(&Overall::Insufficient, false);
        assert_eq!(
            result,
            "Responde al menos algunas preguntas para ver tu diagnóstico."
        );
    }

    #[test]
    fn test_format_results_weakest_first() {
        let result = format_results(&sample_overall(), false);
        let lines: Vec<&str> = result.lines().collect();

        assert!(lines[0].ends_with("(Promedio general: 3.0 / 5)"));
        assert!(lines[2].starts_with("Sistemas y Tecnología"));
        assert!(lines[2].contains("1.0 / 5"));
        assert!(lines[2].contains("Área crítica"));
        assert!(lines[3].starts_with("Marketing y Ventas"));
        assert!(lines[3].contains("5.0 / 5"));
        assert!(lines[3].contains("Fortaleza actual"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_format_results_tsv() {
        assert_eq!(format_results_tsv(&Overall::Insufficient), "");

        let tsv = format_results_tsv(&sample_overall());
        assert_eq!(
            tsv,
            "sistemas\tSistemas y Tecnología\t1.0\tweak\nmarketing\tMarketing y Ventas\t5.0\tstrong"
        );
    }

    #[test]
    fn test_format_timestamp() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let ts = offset.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "09/03/2024, 14:05");
    }

    #[test]
    fn test_format_last_saved_never() {
        assert_eq!(format_last_saved(None), NEVER_SAVED_MESSAGE);
    }

    #[test]
    fn test_format_last_saved_some() {
        let result = format_last_saved(Some(Utc::now()));
        assert!(result.starts_with("Última actualización: "));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Short", 20), "Short");
        assert_eq!(truncate_text("This is a very long prompt", 15), "This is a ve...");
        assert_eq!(truncate_text("Hello world", 3), "Hel");
    }
}
