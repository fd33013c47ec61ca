//! Filtering controller.
//!
//! Owns the list preferences ([`ViewState`]) and the inputs the question
//! list is derived from, and keeps the derived [`FilteredView`] in sync.
//!
//! Every preference change goes through [`FilteringController::dispatch`]:
//! reduce, recompute, clamp the cursor, then persist the durable subset if it
//! changed. Persistence failures are logged and otherwise ignored.

use crate::ports::preference_store::PreferenceStore;
use qgen_domain::{
    AppMode, FilterContext, GenerationConfig, PersistedPreferences, Question, StatusCounts,
    ViewAction, ViewState, context_filtered_questions, filtered_questions, reduce, sort_questions,
    unique_questions,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Lists derived from the current inputs and preferences
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    /// Everything except the status filter (tab counts come from here)
    pub context: Vec<Question>,
    pub counts: StatusCounts,
    /// Context list after the status tab
    pub filtered: Vec<Question>,
    /// One entry per logical question, sorted for display
    pub unique: Vec<Question>,
}

/// Orchestrates filtering, dedupe and preference persistence
pub struct FilteringController {
    store: Arc<dyn PreferenceStore>,
    state: ViewState,
    questions: Vec<Question>,
    historical: Vec<Question>,
    config: GenerationConfig,
    app_mode: AppMode,
    view: FilteredView,
}

impl FilteringController {
    /// Restore persisted preferences and compute the initial view
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        questions: Vec<Question>,
        historical: Vec<Question>,
        config: GenerationConfig,
        app_mode: AppMode,
    ) -> Self {
        let restored = store.load().unwrap_or_else(|e| {
            warn!("Failed to load view preferences, using defaults: {}", e);
            PersistedPreferences::default()
        });
        let state = reduce(&ViewState::default(), ViewAction::Restore(restored));

        let mut controller = Self {
            store,
            state,
            questions,
            historical,
            config,
            app_mode,
            view: FilteredView::default(),
        };
        controller.recompute();
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn app_mode(&self) -> AppMode {
        self.app_mode
    }

    /// Question under the review cursor
    pub fn current_question(&self) -> Option<&Question> {
        self.view.unique.get(self.state.review_cursor)
    }

    /// Apply a preference change
    pub fn dispatch(&mut self, action: ViewAction) {
        let before = self.state.persisted();
        self.state = reduce(&self.state, action);
        self.recompute();

        let after = self.state.persisted();
        if after != before {
            if let Err(e) = self.store.save(&after) {
                warn!("Failed to persist view preferences: {}", e);
            }
        }
    }

    pub fn set_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.recompute();
    }

    pub fn set_historical(&mut self, historical: Vec<Question>) {
        self.historical = historical;
        self.recompute();
    }

    /// Replace the generation config; a new discipline, difficulty or
    /// language resets the review cursor
    pub fn set_config(&mut self, config: GenerationConfig) {
        let context_changed = self.config.context_differs(&config);
        self.config = config;
        if context_changed {
            self.dispatch(ViewAction::ContextChanged);
        } else {
            self.recompute();
        }
    }

    pub fn set_app_mode(&mut self, app_mode: AppMode) {
        if app_mode == self.app_mode {
            return;
        }
        self.app_mode = app_mode;
        self.dispatch(ViewAction::ContextChanged);
    }

    fn recompute(&mut self) {
        let include_history = self.state.show_history || self.app_mode.forces_history();
        let difficulty = self
            .app_mode
            .filters_difficulty()
            .then_some(self.config.difficulty);

        let ctx = FilterContext {
            questions: &self.questions,
            historical: &self.historical,
            include_history,
            filter_by_creator: self.state.filter_by_creator,
            search_term: &self.state.search_term,
            creator_name: &self.config.creator_name,
            discipline: &self.config.discipline,
            difficulty,
            language: &self.config.language,
            tags: &self.state.filter_tags,
        };

        let context = context_filtered_questions(&ctx);
        let counts = StatusCounts::from_questions(&context);
        let filtered = filtered_questions(&context, self.state.filter_mode);
        let mut unique = unique_questions(&filtered, &self.config.language);
        sort_questions(&mut unique, self.state.sort_by);

        self.state.clamp_cursor(unique.len());
        debug!(
            "View recomputed: {} in context, {} after status, {} unique",
            context.len(),
            filtered.len(),
            unique.len()
        );

        self.view = FilteredView {
            context,
            counts,
            filtered,
            unique,
        };
    }
}
