use std::time::Instant;

use crate::answers::{KeyValueStore, MAX_RATING, MIN_RATING};
use crate::scoring::{CategoryScore, Overall};
use crate::session::Session;
use crate::tui::theme::ThemeColors;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Questions,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    ConfirmReset,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

pub struct App<S> {
    pub session: Session<S>,
    pub table_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub results: Option<(Vec<CategoryScore>, Overall)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
    question_ids: Vec<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: Session<S>) -> Self {
        let question_ids: Vec<String> = session.catalog().questions().map(|q| q.id).collect();

        let mut table_state = ratatui::widgets::TableState::default();
        if !question_ids.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            session,
            table_state,
            current_view: View::Questions,
            input_mode: InputMode::Normal,
            flash_message: None,
            results: None,
            should_quit: false,
            theme: ThemeColors::dark(),
            question_ids,
        }
    }

    pub fn question_count(&self) -> usize {
        self.question_ids.len()
    }

    pub fn next_row(&mut self) {
        if self.current_view != View::Questions || self.question_ids.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < self.question_ids.len() => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.current_view != View::Questions || self.question_ids.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => self.question_ids.len() - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_question_id(&self) -> Option<&str> {
        if self.current_view != View::Questions {
            return None;
        }
        self.table_state
            .selected()
            .and_then(|i| self.question_ids.get(i))
            .map(|id| id.as_str())
    }

    /// Rate the selected question and persist it right away
    pub fn set_selected_rating(&mut self, rating: u8) {
        let id = match self.selected_question_id() {
            Some(id) => id.to_string(),
            None => return,
        };

        match self.session.rate(&id, rating) {
            Ok(stored) => self.show_flash(format!("Guardado: {} = {}", id, stored), FlashKind::Success),
            Err(e) => self.show_flash(format!("Error al guardar: {:#}", e), FlashKind::Error),
        }
    }

    /// Rating shown for the selected question and whether it was answered
    fn selected_rating(&self) -> Option<(u8, bool)> {
        self.selected_question_id()
            .map(|id| (self.session.rating(id), self.session.answer(id).is_some()))
    }

    pub fn increase_rating(&mut self) {
        if let Some((current, answered)) = self.selected_rating() {
            if current < MAX_RATING || !answered {
                self.set_selected_rating((current + 1).min(MAX_RATING));
            }
        }
    }

    pub fn decrease_rating(&mut self) {
        if let Some((current, answered)) = self.selected_rating() {
            if current > MIN_RATING || !answered {
                self.set_selected_rating(current.saturating_sub(1).max(MIN_RATING));
            }
        }
    }

    /// Record the rating currently shown, answering with the default if needed
    pub fn confirm_selected_rating(&mut self) {
        if let Some((current, _)) = self.selected_rating() {
            self.set_selected_rating(current);
        }
    }

    /// Compute results and switch to the results view
    pub fn compute_results(&mut self) {
        self.results = Some(self.session.results());
        self.current_view = View::Results;
    }

    pub fn toggle_view(&mut self) {
        match self.current_view {
            View::Questions => self.compute_results(),
            View::Results => self.current_view = View::Questions,
        }
    }

    pub fn start_reset(&mut self) {
        self.input_mode = InputMode::ConfirmReset;
    }

    pub fn cancel_reset(&mut self) {
        self.input_mode = InputMode::Normal;
        self.show_flash("Reseteo cancelado".to_string(), FlashKind::Info);
    }

    /// The popup itself was the confirmation step
    pub fn confirm_reset(&mut self) {
        self.input_mode = InputMode::Normal;
        match self.session.reset(|| Ok(true)) {
            Ok(_) => {
                self.results = None;
                self.current_view = View::Questions;
                if !self.question_ids.is_empty() {
                    self.table_state.select(Some(0));
                }
                self.show_flash("Respuestas reseteadas".to_string(), FlashKind::Success);
            }
            Err(e) => self.show_flash(format!("Error al resetear: {:#}", e), FlashKind::Error),
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }
}
