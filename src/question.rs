use clap::ValueEnum;
use serde::Deserialize;
use strum_macros::Display;

/// Marker standing in for the missing word in a question sentence
pub const BLANK: &str = "______";

/// Grammar topic a question exercises
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, ValueEnum, Display,
)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum Category {
    #[strum(serialize = "Non-finite verbs")]
    NonFinite,
    #[strum(serialize = "Relative clauses")]
    RelativeClause,
    #[strum(serialize = "Adverbial clauses")]
    AdverbialClause,
    #[strum(serialize = "Noun clauses")]
    NounClause,
    #[strum(serialize = "Conjunctions")]
    Conjunction,
    #[strum(serialize = "Tenses")]
    Tense,
    #[strum(serialize = "Voice")]
    Voice,
}

/// How hard a question is. Only used for filtering and display, never for scoring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, ValueEnum, Display,
)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Revealed once the learner has submitted an answer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Explanation {
    pub rule: String,
    pub example: String,
    pub common_mistake: String,
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: String,
    pub sentence: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub explanation: Explanation,
}

impl Question {
    /// Text before and after the blank.
    ///
    /// Store validation guarantees exactly one blank, so this only returns
    /// `None` for questions built by hand outside a [`crate::store::QuestionStore`].
    pub fn blank_parts(&self) -> Option<(&str, &str)> {
        self.sentence.split_once(BLANK)
    }

    pub fn blank_count(&self) -> usize {
        self.sentence.matches(BLANK).count()
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    pub fn has_option(&self, answer: &str) -> bool {
        self.options.iter().any(|o| o == answer)
    }
}
