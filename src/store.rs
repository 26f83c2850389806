use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use crate::question::{Question, BLANK};

static QUESTION_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/questions");

#[derive(Deserialize)]
struct QuestionFile {
    questions: Vec<Question>,
}

/// Rule a malformed question broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    EmptyId,
    DuplicateId,
    BlankMarkers(usize),
    NoOptions,
    DuplicateOption(String),
    AnswerNotAnOption(String),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::EmptyId => write!(f, "id is empty"),
            Problem::DuplicateId => write!(f, "id is used by an earlier question"),
            Problem::BlankMarkers(n) => {
                write!(f, "sentence must contain exactly one {BLANK} marker, found {n}")
            }
            Problem::NoOptions => write!(f, "options are empty"),
            Problem::DuplicateOption(o) => write!(f, "option {o:?} is listed twice"),
            Problem::AnswerNotAnOption(a) => {
                write!(f, "correct answer {a:?} is not one of the options")
            }
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// A bundled question file is not valid UTF-8
    NotUtf8 { file: String },
    /// A bundled question file does not match the question schema
    Parse {
        file: String,
        error: serde_json::Error,
    },
    /// A question failed load-time validation
    Invalid { id: String, problem: Problem },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotUtf8 { file } => write!(f, "{file}: not valid UTF-8"),
            StoreError::Parse { file, error } => write!(f, "{file}: {error}"),
            StoreError::Invalid { id, problem } => write!(f, "question {id:?}: {problem}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Parse { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Immutable, validated, ordered collection of questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionStore {
    questions: Vec<Question>,
}

impl QuestionStore {
    /// Load every bundled `*.json` question file, ordered by file name.
    pub fn load() -> Result<Self, StoreError> {
        let mut files: Vec<_> = QUESTION_DIR
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort_by(|a, b| a.path().cmp(b.path()));

        let mut questions = Vec::new();
        for file in files {
            let name = file.path().display().to_string();
            let contents = file
                .contents_utf8()
                .ok_or_else(|| StoreError::NotUtf8 { file: name.clone() })?;
            questions.extend(parse_file(&name, contents)?);
        }

        let store = Self::from_questions(questions)?;
        tracing::info!(questions = store.len(), "question store loaded");
        Ok(store)
    }

    /// Parse and validate a single question file
    pub fn from_json(name: &str, contents: &str) -> Result<Self, StoreError> {
        Self::from_questions(parse_file(name, contents)?)
    }

    pub fn from_questions(questions: Vec<Question>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for q in &questions {
            validate(q)?;
            if !seen.insert(q.id.as_str()) {
                return Err(invalid(q, Problem::DuplicateId));
            }
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn parse_file(name: &str, contents: &str) -> Result<Vec<Question>, StoreError> {
    serde_json::from_str::<QuestionFile>(contents)
        .map(|file| file.questions)
        .map_err(|error| StoreError::Parse {
            file: name.to_string(),
            error,
        })
}

fn invalid(q: &Question, problem: Problem) -> StoreError {
    StoreError::Invalid {
        id: q.id.clone(),
        problem,
    }
}

fn validate(q: &Question) -> Result<(), StoreError> {
    if q.id.trim().is_empty() {
        return Err(invalid(q, Problem::EmptyId));
    }

    let blanks = q.blank_count();
    if blanks != 1 {
        return Err(invalid(q, Problem::BlankMarkers(blanks)));
    }

    if q.options.is_empty() {
        return Err(invalid(q, Problem::NoOptions));
    }

    let mut options = HashSet::new();
    for option in &q.options {
        if !options.insert(option.as_str()) {
            return Err(invalid(q, Problem::DuplicateOption(option.clone())));
        }
    }

    if !q.has_option(&q.correct_answer) {
        return Err(invalid(
            q,
            Problem::AnswerNotAnOption(q.correct_answer.clone()),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::fixtures::{question, sample};
    use crate::question::{Category, Difficulty};
    use assert_matches::assert_matches;

    fn with(sentence: &str, options: &[&str], correct: &str) -> Question {
        question(
            "bad",
            sentence,
            options,
            correct,
            Category::Voice,
            Difficulty::Advanced,
        )
    }

    #[test]
    fn test_bundled_store_loads() {
        let store = QuestionStore::load().expect("bundled questions must validate");
        assert!(!store.is_empty());
        assert_eq!(store.questions()[0].id, "1");
    }

    #[test]
    fn test_bundled_store_keeps_file_order() {
        let store = QuestionStore::load().unwrap();
        let ids: Vec<&str> = store.questions().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(&ids[..3], &["1", "2", "3"]);
    }

    #[test]
    fn test_valid_questions_accepted() {
        let store = QuestionStore::from_questions(sample()).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_empty_store_is_valid() {
        let store = QuestionStore::from_questions(vec![]).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_rejects_missing_blank() {
        let err = QuestionStore::from_questions(vec![with("No blank.", &["a"], "a")]).unwrap_err();
        assert_matches!(
            err,
            StoreError::Invalid {
                problem: Problem::BlankMarkers(0),
                ..
            }
        );
    }

    #[test]
    fn test_rejects_two_blanks() {
        let err = QuestionStore::from_questions(vec![with("______ and ______", &["a"], "a")])
            .unwrap_err();
        assert_matches!(
            err,
            StoreError::Invalid {
                problem: Problem::BlankMarkers(2),
                ..
            }
        );
    }

    #[test]
    fn test_rejects_empty_options() {
        let err = QuestionStore::from_questions(vec![with("I ______.", &[], "a")]).unwrap_err();
        assert_matches!(
            err,
            StoreError::Invalid {
                problem: Problem::NoOptions,
                ..
            }
        );
    }

    #[test]
    fn test_rejects_answer_outside_options() {
        let err =
            QuestionStore::from_questions(vec![with("I ______.", &["a", "b"], "c")]).unwrap_err();
        assert_matches!(
            err,
            StoreError::Invalid {
                problem: Problem::AnswerNotAnOption(ref a),
                ..
            } if a == "c"
        );
    }

    #[test]
    fn test_rejects_duplicate_option() {
        let err =
            QuestionStore::from_questions(vec![with("I ______.", &["a", "a"], "a")]).unwrap_err();
        assert_matches!(
            err,
            StoreError::Invalid {
                problem: Problem::DuplicateOption(_),
                ..
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut questions = sample();
        questions[2].id = "1".to_string();
        let err = QuestionStore::from_questions(questions).unwrap_err();
        assert_matches!(err, StoreError::Invalid { ref id, problem: Problem::DuplicateId } if id == "1");
    }

    #[test]
    fn test_rejects_blank_id() {
        let mut q = with("I ______.", &["a"], "a");
        q.id = "  ".to_string();
        let err = QuestionStore::from_questions(vec![q]).unwrap_err();
        assert_matches!(
            err,
            StoreError::Invalid {
                problem: Problem::EmptyId,
                ..
            }
        );
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = QuestionStore::from_json("broken.json", "{ not json").unwrap_err();
        assert_matches!(err, StoreError::Parse { .. });
        assert!(err.to_string().starts_with("broken.json:"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_error_message_is_descriptive() {
        let err = QuestionStore::from_questions(vec![with("No blank.", &["a"], "a")]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("\"bad\""));
        assert!(msg.contains("exactly one"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{ "questions": [{
            "id": "x",
            "sentence": "They ______ the match.",
            "options": ["won", "win"],
            "correct_answer": "won",
            "category": "tense",
            "difficulty": "beginner",
            "explanation": {
                "rule": "r", "example": "e", "common_mistake": "m", "translation": "t"
            }
        }] }"#;
        let store = QuestionStore::from_json("inline.json", json).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.questions()[0].correct_answer, "won");
    }
}
