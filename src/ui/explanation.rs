use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::question::Question;

/// Title and colour of the explanation panel once an answer is in
pub fn verdict(is_correct: bool) -> (&'static str, Color) {
    if is_correct {
        ("✔ Correct!", Color::Green)
    } else {
        ("✘ Incorrect", Color::Red)
    }
}

pub fn explanation_lines(question: &Question) -> Vec<Line<'_>> {
    let heading = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD);
    let explanation = &question.explanation;

    vec![
        Line::from(Span::styled("Rule", heading)),
        Line::from(explanation.rule.as_str()),
        Line::default(),
        Line::from(Span::styled("Example", heading)),
        Line::from(Span::styled(
            format!("\"{}\"", explanation.example),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled("Common mistake", heading)),
        Line::from(Span::styled(
            explanation.common_mistake.as_str(),
            Style::default().fg(Color::LightRed),
        )),
        Line::default(),
        Line::from(Span::styled("Translation", heading)),
        Line::from(Span::styled(
            explanation.translation.as_str(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]
}

/// Shown in place of the explanation until the learner submits
pub fn waiting_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Waiting for your answer",
            Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
        )),
        Line::from(Span::styled(
            "Submit to see the grammar rule, an example, the common mistake and a translation.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]
}
