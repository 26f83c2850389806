use std::fmt;
use std::sync::Arc;

use strum_macros::Display;
use tracing::{debug, info};

use crate::filter::{self, CategoryFilter, DifficultyFilter, Filters};
use crate::question::Question;
use crate::store::QuestionStore;
use crate::util::{ratio, rounded_percentage};

/// Tag describing which of the three session states is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    InProgress,
    Completed,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    InProgress {
        position: usize,
        selected: Option<String>,
        submitted: bool,
    },
    Completed {
        score: usize,
        total: usize,
    },
    /// No question matches the current filters
    Empty,
}

/// Final tally of a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    pub fn percentage(&self) -> u32 {
        rounded_percentage(self.score, self.total).unwrap_or(0)
    }

    pub fn message(&self) -> ResultMessage {
        ResultMessage::from_percentage(self.percentage())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMessage {
    Perfect,
    Excellent,
    Good,
    KeepPracticing,
}

impl ResultMessage {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 100 {
            ResultMessage::Perfect
        } else if percentage >= 80 {
            ResultMessage::Excellent
        } else if percentage >= 60 {
            ResultMessage::Good
        } else {
            ResultMessage::KeepPracticing
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            ResultMessage::Perfect => "perfect",
            ResultMessage::Excellent => "excellent",
            ResultMessage::Good => "good, room to improve",
            ResultMessage::KeepPracticing => "keep practicing",
        }
    }
}

impl fmt::Display for ResultMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ResultMessage::Perfect => "Perfect! You are a grammar master!",
            ResultMessage::Excellent => "Excellent work, a great performance!",
            ResultMessage::Good => "Not bad, there is still room to improve.",
            ResultMessage::KeepPracticing => "Keep practicing!",
        };
        f.write_str(text)
    }
}

/// Everything the presentation layer needs after a transition
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub question: Option<&'a Question>,
    pub selected_answer: Option<&'a str>,
    pub submitted: bool,
    pub is_correct: bool,
    pub score: usize,
    pub position: usize,
    pub total: usize,
}

/// One learner's pass through a filtered working set.
///
/// Invalid intents (submitting without a selection, advancing before
/// submitting, selecting after submitting) are ignored and leave the state
/// untouched.
#[derive(Debug, Clone)]
pub struct QuizSession {
    store: Arc<QuestionStore>,
    filters: Filters,
    working_set: Vec<Question>,
    state: SessionState,
    score: usize,
}

impl QuizSession {
    pub fn new(store: Arc<QuestionStore>, filters: Filters) -> Self {
        let working_set = working_set(&store, filters);
        let state = fresh_state(&working_set);
        debug!(
            category = %filters.category,
            difficulty = %filters.difficulty,
            total = working_set.len(),
            "session created"
        );
        Self {
            store,
            filters,
            working_set,
            state,
            score: 0,
        }
    }

    pub fn select_option(&mut self, option: &str) {
        let allowed = self
            .current_question()
            .is_some_and(|q| q.has_option(option));

        if let SessionState::InProgress {
            selected,
            submitted: false,
            ..
        } = &mut self.state
        {
            if allowed {
                *selected = Some(option.to_string());
            }
        }
    }

    /// Select the option at `index` of the current question
    pub fn select_index(&mut self, index: usize) {
        let option = self
            .current_question()
            .and_then(|q| q.options.get(index))
            .cloned();
        if let Some(option) = option {
            self.select_option(&option);
        }
    }

    /// Move the selection one option down, wrapping; selects the first option if none is picked
    pub fn select_next(&mut self) {
        self.step_selection(1);
    }

    /// Move the selection one option up, wrapping; selects the last option if none is picked
    pub fn select_prev(&mut self) {
        self.step_selection(-1);
    }

    fn step_selection(&mut self, delta: isize) {
        let Some(question) = self.current_question() else {
            return;
        };
        let len = question.options.len() as isize;
        let next = match self.selected_index() {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta > 0 => 0,
            None => len - 1,
        };
        self.select_index(next as usize);
    }

    pub fn submit(&mut self) {
        let SessionState::InProgress {
            position,
            selected: Some(answer),
            submitted,
        } = &mut self.state
        else {
            return;
        };
        if *submitted {
            return;
        }

        *submitted = true;
        let correct = self.working_set[*position].is_correct(answer);
        if correct {
            self.score += 1;
        }
        debug!(position = *position, correct, score = self.score, "answer submitted");
    }

    pub fn advance(&mut self) {
        let SessionState::InProgress {
            position,
            submitted: true,
            ..
        } = self.state
        else {
            return;
        };

        if position + 1 < self.working_set.len() {
            self.state = SessionState::InProgress {
                position: position + 1,
                selected: None,
                submitted: false,
            };
            debug!(position = position + 1, "advanced");
        } else {
            self.state = SessionState::Completed {
                score: self.score,
                total: self.working_set.len(),
            };
            info!(score = self.score, total = self.working_set.len(), "session completed");
        }
    }

    pub fn reset(&mut self) {
        self.state = fresh_state(&self.working_set);
        self.score = 0;
        debug!(phase = %self.phase(), "session reset");
    }

    pub fn change_filter(&mut self, category: CategoryFilter, difficulty: DifficultyFilter) {
        // Rebuilt rather than patched so no position or score leaks across working sets
        *self = Self::new(Arc::clone(&self.store), Filters::new(category, difficulty));
        info!(
            category = %category,
            difficulty = %difficulty,
            total = self.working_set.len(),
            "filters changed"
        );
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::InProgress { .. } => Phase::InProgress,
            SessionState::Completed { .. } => Phase::Completed,
            SessionState::Empty => Phase::Empty,
        }
    }

    pub fn filters(&self) -> Filters {
        self.filters
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    pub fn working_set(&self) -> &[Question] {
        &self.working_set
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::InProgress { position, .. } => self.working_set.get(position),
            _ => None,
        }
    }

    pub fn selected_answer(&self) -> Option<&str> {
        match &self.state {
            SessionState::InProgress { selected, .. } => selected.as_deref(),
            _ => None,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected_answer()?;
        self.current_question()?
            .options
            .iter()
            .position(|o| o == selected)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(
            self.state,
            SessionState::InProgress {
                submitted: true,
                ..
            }
        )
    }

    pub fn is_correct(&self) -> bool {
        self.is_submitted()
            && match (self.current_question(), self.selected_answer()) {
                (Some(q), Some(answer)) => q.is_correct(answer),
                _ => false,
            }
    }

    pub fn is_last_question(&self) -> bool {
        match self.state {
            SessionState::InProgress { position, .. } => position + 1 == self.working_set.len(),
            _ => false,
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Index into the working set; `total()` once completed and 0 when empty
    pub fn position(&self) -> usize {
        match self.state {
            SessionState::InProgress { position, .. } => position,
            SessionState::Completed { total, .. } => total,
            SessionState::Empty => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.working_set.len()
    }

    /// `(position + 1) / total` while in progress
    pub fn progress_fraction(&self) -> Option<f64> {
        match self.state {
            SessionState::InProgress { position, .. } => ratio(position + 1, self.total()),
            SessionState::Completed { .. } => Some(1.0),
            SessionState::Empty => None,
        }
    }

    pub fn result(&self) -> Option<QuizResult> {
        match self.state {
            SessionState::Completed { score, total } => Some(QuizResult { score, total }),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase(),
            question: self.current_question(),
            selected_answer: self.selected_answer(),
            submitted: self.is_submitted(),
            is_correct: self.is_correct(),
            score: self.score,
            position: self.position(),
            total: self.total(),
        }
    }
}

fn working_set(store: &QuestionStore, filters: Filters) -> Vec<Question> {
    filter::filter(store, filters.category, filters.difficulty)
        .into_iter()
        .cloned()
        .collect()
}

fn fresh_state(working_set: &[Question]) -> SessionState {
    if working_set.is_empty() {
        SessionState::Empty
    } else {
        SessionState::InProgress {
            position: 0,
            selected: None,
            submitted: false,
        }
    }
}
