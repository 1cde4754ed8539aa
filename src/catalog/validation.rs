use std::collections::HashSet;

use super::types::Category;

/// Validate a catalog before it is used.
/// Returns all validation errors at once (not just the first).
pub fn validate_catalog(categories: &[Category]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if categories.is_empty() {
        errors.push("categories: at least one category is required".to_string());
    }

    let mut seen_ids = HashSet::new();
    for (i, category) in categories.iter().enumerate() {
        if category.id.trim().is_empty() {
            errors.push(format!("categories[{}].id: must not be empty", i));
        } else if !seen_ids.insert(category.id.as_str()) {
            errors.push(format!(
                "categories[{}].id: duplicate id '{}'",
                i, category.id
            ));
        }

        if category.name.trim().is_empty() {
            errors.push(format!("categories[{}].name: must not be empty", i));
        }

        if category.questions.is_empty() {
            errors.push(format!(
                "categories[{}].questions: at least one question is required",
                i
            ));
        }

        for (j, prompt) in category.questions.iter().enumerate() {
            if prompt.trim().is_empty() {
                errors.push(format!(
                    "categories[{}].questions[{}]: must not be empty",
                    i, j
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_categories;

    fn category(id: &str, name: &str, questions: &[&str]) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            questions: questions.iter().map(|q| q.to_string()).collect(),
        }
    }

    #[test]
    fn test_builtin_is_valid() {
        assert!(validate_catalog(&builtin_categories()).is_ok());
    }

    #[test]
    fn test_single_question_category_is_valid() {
        let categories = vec![category("x", "X", &["one"])];
        assert!(validate_catalog(&categories).is_ok());
    }

    #[test]
    fn test_empty_catalog() {
        let errors = validate_catalog(&[]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at least one category"));
    }

    #[test]
    fn test_duplicate_id() {
        let categories = vec![category("x", "X", &["q"]), category("x", "Y", &["q"])];
        let errors = validate_catalog(&categories).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("categories[1].id"));
        assert!(errors[0].contains("duplicate"));
    }

    #[test]
    fn test_collects_all_errors() {
        let categories = vec![
            category("", "", &[]),       // id, name, questions
            category("ok", "Ok", &[" "]), // blank prompt
        ];
        let errors = validate_catalog(&categories).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[3].contains("categories[1].questions[0]"));
    }
}
