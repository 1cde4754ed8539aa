use serde::{Deserialize, Serialize};

/// One business dimension with its ordered question prompts.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<String>,
}

impl Category {
    /// Identifier of the question at `index` within this category
    pub fn question_id(&self, index: usize) -> String {
        question_id(&self.id, index)
    }

    /// All question identifiers of this category, in prompt order
    pub fn question_ids(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.questions.len()).map(move |i| self.question_id(i))
    }
}

/// Build the answer key for a question: `{category_id}-{index}` (zero-based)
pub fn question_id(category_id: &str, index: usize) -> String {
    format!("{}-{}", category_id, index)
}

/// A question as seen while walking the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRef<'a> {
    pub category: &'a Category,
    pub index: usize,
    pub id: String,
    pub prompt: &'a str,
}

/// Ordered, read-only set of categories.
///
/// Built once at startup (either the built-in catalog or one taken from the
/// config file) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The five-area business catalog shipped with the tool
    pub fn builtin() -> Self {
        Self::new(super::builtin_categories())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    /// Walk every question in catalog order
    pub fn questions(&self) -> impl Iterator<Item = QuestionRef<'_>> {
        self.categories.iter().flat_map(|category| {
            category
                .questions
                .iter()
                .enumerate()
                .map(move |(index, prompt)| QuestionRef {
                    category,
                    index,
                    id: category.question_id(index),
                    prompt: prompt.as_str(),
                })
        })
    }

    /// Resolve a question identifier back to its question
    pub fn find_question(&self, id: &str) -> Option<QuestionRef<'_>> {
        self.questions().find(|q| q.id == id)
    }

    pub fn contains_question(&self, id: &str) -> bool {
        self.find_question(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            Category {
                id: "a".to_string(),
                name: "Area A".to_string(),
                description: String::new(),
                questions: vec!["q1".to_string(), "q2".to_string()],
            },
            Category {
                id: "b".to_string(),
                name: "Area B".to_string(),
                description: String::new(),
                questions: vec!["only".to_string()],
            },
        ])
    }

    #[test]
    fn test_question_id_format() {
        assert_eq!(question_id("finanzas", 0), "finanzas-0");
        assert_eq!(question_id("finanzas", 2), "finanzas-2");
    }

    #[test]
    fn test_questions_in_catalog_order() {
        let catalog = small_catalog();
        let ids: Vec<String> = catalog.questions().map(|q| q.id).collect();
        assert_eq!(ids, vec!["a-0", "a-1", "b-0"]);
        assert_eq!(catalog.question_count(), 3);
    }

    #[test]
    fn test_find_question() {
        let catalog = small_catalog();
        let q = catalog.find_question("a-1").unwrap();
        assert_eq!(q.prompt, "q2");
        assert_eq!(q.category.id, "a");
        assert_eq!(q.index, 1);

        assert!(catalog.find_question("a-2").is_none());
        assert!(catalog.find_question("c-0").is_none());
    }

    #[test]
    fn test_builtin_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.categories().iter().all(|c| c.questions.len() == 3));
        assert!(catalog.contains_question("liderazgo-2"));
    }
}
