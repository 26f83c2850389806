use std::fmt;
use std::str::FromStr;

use clap::builder::{PossibleValue, PossibleValuesParser, TypedValueParser};
use clap::ValueEnum;

use crate::question::{Category, Difficulty, Question};
use crate::store::QuestionStore;

/// Either every value or one specific value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter<T> {
    All,
    Only(T),
}

pub type CategoryFilter = Filter<Category>;
pub type DifficultyFilter = Filter<Difficulty>;

const ALL: &str = "all";

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

/// Command line name of a variant, e.g. `relative-clause`
pub fn slug<T: ValueEnum>(value: &T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

impl<T: ValueEnum + Copy + PartialEq + fmt::Display> Filter<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(v) => *v == value,
        }
    }

    /// All, then every variant in order, then back to All
    pub fn next(self) -> Self {
        let variants = T::value_variants();
        match self {
            Filter::All => variants.first().map_or(Filter::All, |v| Filter::Only(*v)),
            Filter::Only(v) => match variants.iter().position(|c| *c == v) {
                Some(i) if i + 1 < variants.len() => Filter::Only(variants[i + 1]),
                _ => Filter::All,
            },
        }
    }

    pub fn prev(self) -> Self {
        let variants = T::value_variants();
        match self {
            Filter::All => variants.last().map_or(Filter::All, |v| Filter::Only(*v)),
            Filter::Only(v) => match variants.iter().position(|c| *c == v) {
                Some(i) if i > 0 => Filter::Only(variants[i - 1]),
                _ => Filter::All,
            },
        }
    }

    pub fn slug(self) -> String {
        match self {
            Filter::All => ALL.to_string(),
            Filter::Only(v) => slug(&v),
        }
    }

    /// Human readable name for the UI
    pub fn label(self) -> String {
        match self {
            Filter::All => "All".to_string(),
            Filter::Only(v) => v.to_string(),
        }
    }
}

impl<T: ValueEnum + Copy + PartialEq + fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug())
    }
}

impl<T: ValueEnum> FromStr for Filter<T> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(Filter::All);
        }
        T::from_str(s.trim(), true).map(Filter::Only)
    }
}

/// clap parser accepting `all` or any variant of `T`, listing them all in `--help`
pub fn value_parser<T>() -> impl TypedValueParser<Value = Filter<T>>
where
    T: ValueEnum + Clone + Send + Sync + 'static,
{
    let names = std::iter::once(PossibleValue::new(ALL))
        .chain(T::value_variants().iter().filter_map(|v| v.to_possible_value()))
        .collect::<Vec<_>>();
    PossibleValuesParser::new(names).try_map(|s| s.parse::<Filter<T>>())
}

/// The pair of filters that scopes a quiz session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filters {
    pub category: CategoryFilter,
    pub difficulty: DifficultyFilter,
}

impl Filters {
    pub fn new(category: CategoryFilter, difficulty: DifficultyFilter) -> Self {
        Self {
            category,
            difficulty,
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        self.category.matches(question.category) && self.difficulty.matches(question.difficulty)
    }

    pub fn is_all(&self) -> bool {
        self.category == Filter::All && self.difficulty == Filter::All
    }
}

/// Questions matching both filters, in store order
pub fn filter(
    store: &QuestionStore,
    category: CategoryFilter,
    difficulty: DifficultyFilter,
) -> Vec<&Question> {
    let filters = Filters::new(category, difficulty);
    store
        .questions()
        .iter()
        .filter(|q| filters.matches(q))
        .collect()
}
