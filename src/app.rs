use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::celebration::Celebration;
use crate::filter::Filters;
use crate::session::{Phase, QuizSession};
use crate::store::QuestionStore;

pub const TICK_RATE_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Runtime state behind the terminal UI: the quiz session plus presentation-only bits
#[derive(Debug)]
pub struct App {
    pub session: QuizSession,
    pub celebration: Celebration,
    /// Last drawn terminal size, used to place the celebration
    pub viewport: (u16, u16),
}

impl App {
    pub fn new(store: Arc<QuestionStore>, filters: Filters) -> Self {
        Self {
            session: QuizSession::new(store, filters),
            celebration: Celebration::new(),
            viewport: (80, 24),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Char('c') => {
                self.change_filters(|f| Filters { category: f.category.next(), ..f })
            }
            KeyCode::Char('C') => {
                self.change_filters(|f| Filters { category: f.category.prev(), ..f })
            }
            KeyCode::Char('d') => {
                self.change_filters(|f| Filters { difficulty: f.difficulty.next(), ..f })
            }
            KeyCode::Char('D') => {
                self.change_filters(|f| Filters { difficulty: f.difficulty.prev(), ..f })
            }
            KeyCode::Char('x') => self.change_filters(|_| Filters::default()),
            KeyCode::Char('r') => self.restart(),
            _ => match self.session.phase() {
                Phase::InProgress => self.on_quiz_key(key.code),
                Phase::Completed => {
                    if key.code == KeyCode::Enter {
                        self.restart();
                    }
                }
                Phase::Empty => {}
            },
        }

        KeyOutcome::Continue
    }

    fn on_quiz_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.session.select_index(index);
            }
            KeyCode::Up | KeyCode::Char('k') => self.session.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.session.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.submit_or_advance(),
            KeyCode::Right | KeyCode::Char('n') => self.advance(),
            _ => {}
        }
    }

    /// The primary action: submit a pending pick, or move on once submitted
    pub fn submit_or_advance(&mut self) {
        if self.session.is_submitted() {
            self.advance();
        } else {
            self.session.submit();
        }
    }

    pub fn advance(&mut self) {
        self.session.advance();
        if let Some(result) = self.session.result() {
            if result.percentage() == 100 {
                let (width, height) = self.viewport;
                self.celebration.start(width, height);
            }
        }
    }

    pub fn restart(&mut self) {
        self.celebration.stop();
        self.session.reset();
    }

    fn change_filters(&mut self, update: impl FnOnce(Filters) -> Filters) {
        let filters = update(self.session.filters());
        self.celebration.stop();
        self.session.change_filter(filters.category, filters.difficulty);
    }

    /// Advance animations; returns true when a redraw is needed
    pub fn on_tick(&mut self) -> bool {
        if !self.celebration.is_active {
            return false;
        }
        self.celebration.update(TICK_RATE_MS as f64 / 1000.0);
        true
    }
}
