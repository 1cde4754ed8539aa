use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::answers::{AnswerRepository, AnswerSheet, KeyValueStore};
use crate::catalog::Catalog;
use crate::scoring::{compute_category_scores, compute_overall, CategoryScore, Overall};

/// A question id that is not in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownQuestion(pub String);

impl fmt::Display for UnknownQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown question '{}'", self.0)
    }
}

impl std::error::Error for UnknownQuestion {}

/// The questionnaire's single owned state.
///
/// Holds the catalog, the in-memory answers and the repository they are
/// persisted through. Every mutation goes through here and is saved before
/// the method returns.
pub struct Session<S> {
    catalog: Catalog,
    answers: AnswerSheet,
    repository: AnswerRepository<S>,
}

impl<S: KeyValueStore> Session<S> {
    /// Open a session, loading whatever answers the store holds
    pub fn open(catalog: Catalog, store: S) -> Self {
        let repository = AnswerRepository::new(store);
        let answers = repository.load();
        Self {
            catalog,
            answers,
            repository,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn into_store(self) -> S {
        self.repository.into_store()
    }

    /// Rating to display for a question (default when unanswered)
    pub fn rating(&self, question_id: &str) -> u8 {
        self.answers.rating_or_default(question_id)
    }

    /// How many catalog questions have an answer
    pub fn answered_count(&self) -> usize {
        self.catalog
            .questions()
            .filter(|q| self.answers.is_answered(&q.id))
            .count()
    }

    /// Stored rating, `None` when unanswered
    pub fn answer(&self, question_id: &str) -> Option<u8> {
        self.answers.get(question_id)
    }

    /// Record a rating and persist the whole sheet.
    ///
    /// The rating is clamped into range; the stored value is returned. An id
    /// outside the catalog fails with [`UnknownQuestion`].
    pub fn rate(&mut self, question_id: &str, rating: u8) -> Result<u8> {
        if !self.catalog.contains_question(question_id) {
            return Err(UnknownQuestion(question_id.to_string()).into());
        }

        // Only commit in memory what made it to the store
        let mut next = self.answers.clone();
        let stored = next.set(question_id, rating);
        self.repository.save(&next)?;
        self.answers = next;
        crate::detail!("Saved {} = {}", question_id, stored);
        Ok(stored)
    }

    /// Per-category scores and the overall diagnostic, computed fresh
    pub fn results(&self) -> (Vec<CategoryScore>, Overall) {
        let scores = compute_category_scores(&self.answers, &self.catalog);
        let overall = compute_overall(&scores);
        (scores, overall)
    }

    /// Wipe every answer after `confirm` agrees.
    ///
    /// Returns `Ok(false)` without touching anything when confirmation is
    /// declined.
    pub fn reset<F>(&mut self, confirm: F) -> Result<bool>
    where
        F: FnOnce() -> Result<bool>,
    {
        if !confirm()? {
            return Ok(false);
        }

        self.repository.clear()?;
        self.answers.clear();
        Ok(true)
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.repository.last_saved()
    }
}
