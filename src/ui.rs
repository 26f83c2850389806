pub mod explanation;
pub mod progress;
pub mod results;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    filter::Filters,
    question::{Difficulty, Question, BLANK},
    session::{Phase, QuizSession},
};

const HORIZONTAL_MARGIN: u16 = 3;
const VERTICAL_MARGIN: u16 = 1;
const PLACEHOLDER: &str = "......";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.session.phase() {
            Phase::InProgress => render_quiz(&self.session, area, buf),
            Phase::Completed => {
                if let Some(result) = self.session.result() {
                    results::render_results(result, area, buf);
                }
                if self.celebration.is_active {
                    results::render_sparks(&self.celebration, area, buf);
                }
            }
            Phase::Empty => render_empty(self.session.filters(), area, buf),
        }
    }
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Beginner => Color::Green,
        Difficulty::Intermediate => Color::Yellow,
        Difficulty::Advanced => Color::Red,
    }
}

fn filter_bar(filters: Filters) -> Line<'static> {
    let label = Style::default().add_modifier(Modifier::DIM);
    let value = Style::default().add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("Category: ", label),
        Span::styled(filters.category.label(), value),
        Span::styled(" (c)   Difficulty: ", label),
        Span::styled(filters.difficulty.label(), value),
        Span::styled(" (d)", label),
    ])
}

fn sentence_line<'a>(session: &'a QuizSession, question: &'a Question) -> Line<'a> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let (prefix, suffix) = question
        .blank_parts()
        .unwrap_or((question.sentence.as_str(), ""));

    let blank_style = match (session.selected_answer(), session.is_submitted()) {
        (None, _) => bold_style.add_modifier(Modifier::DIM),
        (Some(_), false) => bold_style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        (Some(_), true) if session.is_correct() => bold_style.fg(Color::Green),
        (Some(_), true) => bold_style.fg(Color::Red),
    };
    let fill = session.selected_answer().unwrap_or(PLACEHOLDER);

    Line::from(vec![
        Span::styled(prefix, bold_style),
        Span::styled(format!(" {fill} "), blank_style),
        Span::styled(suffix, bold_style),
    ])
}

fn option_lines<'a>(session: &'a QuizSession, question: &'a Question) -> Vec<Line<'a>> {
    let selected = session.selected_answer();
    let submitted = session.is_submitted();

    question
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let is_selected = selected == Some(option.as_str());
            let is_answer = question.is_correct(option);

            let style = match (submitted, is_selected, is_answer) {
                (false, true, _) => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                (false, false, _) => Style::default(),
                (true, _, true) => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                (true, true, false) => Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD | Modifier::CROSSED_OUT),
                (true, false, false) => Style::default().add_modifier(Modifier::DIM),
            };
            let marker = if is_selected { "›" } else { " " };

            Line::from(vec![
                Span::raw(format!("{marker} ")),
                Span::styled(format!("{}. {option}", idx + 1), style),
            ])
        })
        .collect()
}

fn legend(session: &QuizSession) -> &'static str {
    if !session.is_submitted() {
        "(1-9) choose / (↑↓) move / (enter) submit / (c)ategory / (d)ifficulty / (r)estart / (esc)ape"
    } else if session.is_last_question() {
        "(enter) see results / (c)ategory / (d)ifficulty / (r)estart / (esc)ape"
    } else {
        "(enter) next question / (c)ategory / (d)ifficulty / (r)estart / (esc)ape"
    }
}

fn render_quiz(session: &QuizSession, area: Rect, buf: &mut Buffer) {
    let Some(question) = session.current_question() else {
        return;
    };
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let fill = session.selected_answer().unwrap_or(PLACEHOLDER);
    let sentence_width =
        question.sentence.width().saturating_sub(BLANK.width()) + fill.width() + 2;
    let sentence_lines = progress::occupied_lines(sentence_width, max_chars_per_line);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(1), // progress gauge
            Constraint::Length(1), // filters
            Constraint::Length(1), // padding
            Constraint::Length(1), // badges
            Constraint::Length(1), // padding
            Constraint::Length(sentence_lines),
            Constraint::Length(1), // padding
            Constraint::Length(question.options.len() as u16),
            Constraint::Length(1), // padding
            Constraint::Min(4),    // explanation
            Constraint::Length(1), // legend
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled("GapFill", bold_style.fg(Color::Magenta)),
        Span::raw("   question "),
        Span::styled(
            progress::progress_label(session.position(), session.total()),
            bold_style,
        ),
        Span::raw("   score "),
        Span::styled(session.score().to_string(), bold_style),
    ]);
    Paragraph::new(header).render(chunks[0], buf);

    LineGauge::default()
        .filled_style(Style::default().fg(Color::Magenta))
        .line_set(symbols::line::THICK)
        .label("")
        .ratio(progress::gauge_ratio(session.progress_fraction()))
        .render(chunks[1], buf);

    Paragraph::new(filter_bar(session.filters())).render(chunks[2], buf);

    let badges = Line::from(vec![
        Span::styled(
            format!(" {} ", question.category),
            Style::default().fg(Color::Black).bg(Color::Magenta),
        ),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", question.difficulty),
            Style::default()
                .fg(Color::Black)
                .bg(difficulty_color(question.difficulty)),
        ),
    ]);
    Paragraph::new(badges).render(chunks[4], buf);

    Paragraph::new(sentence_line(session, question))
        .alignment(if sentence_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[6], buf);

    Paragraph::new(option_lines(session, question)).render(chunks[8], buf);

    let panel = if session.is_submitted() {
        let (title, color) = explanation::verdict(session.is_correct());
        Paragraph::new(explanation::explanation_lines(question)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(title, bold_style.fg(color))),
        )
    } else {
        Paragraph::new(explanation::waiting_lines())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().add_modifier(Modifier::DIM)),
            )
    };
    panel.wrap(Wrap { trim: true }).render(chunks[10], buf);

    Paragraph::new(Span::styled(legend(session), italic_style))
        .wrap(Wrap { trim: true })
        .render(chunks[11], buf);
}

fn render_empty(filters: Filters, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(5) / 2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    // with both filters at All, only an empty question bank ends up here
    let (message, hint) = if filters.is_all() {
        (
            "The question bank is empty.",
            "(c)ategory / (d)ifficulty / (esc)ape",
        )
    } else {
        (
            "No questions match the current filters.",
            "(x) reset filters / (c)ategory / (d)ifficulty / (esc)ape",
        )
    };

    Paragraph::new(Span::styled(
        message,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(filter_bar(filters))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        hint,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::question::fixtures::{question, sample};
    use crate::question::Category;
    use crate::store::QuestionStore;
    use std::sync::Arc;

    fn app() -> App {
        let store = Arc::new(QuestionStore::from_questions(sample()).unwrap());
        App::new(store, Filters::default())
    }

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_quiz_view_shows_question_and_options() {
        let app = app();
        let text = render(&app);
        assert!(text.contains("The book"));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("1. who"));
        assert!(text.contains("4. whose"));
        assert!(text.contains("1 / 3"));
        assert!(text.contains("Relative clauses"));
        assert!(text.contains("Waiting for your answer"));
    }

    #[test]
    fn test_selection_fills_blank() {
        let mut app = app();
        app.session.select_option("where");
        let text = render(&app);
        assert!(text.contains(" where "));
        assert!(!text.contains(PLACEHOLDER));
    }

    #[test]
    fn test_explanation_after_submit() {
        let mut app = app();
        app.session.select_option("which");
        app.session.submit();
        let text = render(&app);
        assert!(text.contains("Correct!"));
        assert!(text.contains("rule for 1"));
        assert!(text.contains("next question"));
    }

    #[test]
    fn test_wrong_answer_shows_incorrect() {
        let mut app = app();
        app.session.select_option("who");
        app.session.submit();
        let text = render(&app);
        assert!(text.contains("Incorrect"));
    }

    #[test]
    fn test_wrong_pick_and_right_answer_are_colored() {
        let mut app = app();
        app.session.select_option("who");
        app.session.submit();

        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);

        let find_fg = |needle: &str| {
            for y in 0..area.height {
                let row: String = (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect();
                if let Some(byte) = row.find(needle) {
                    let col = row[..byte].chars().count() as u16;
                    return Some(buf[(col, y)].fg);
                }
            }
            None
        };
        assert_eq!(find_fg("2. which"), Some(Color::Green));
        assert_eq!(find_fg("1. who"), Some(Color::Red));
    }

    #[test]
    fn test_empty_view() {
        let mut app = app();
        app.session
            .change_filter(Filter::All, Filter::Only(Difficulty::Advanced));
        let text = render(&app);
        assert!(text.contains("No questions match"));
        assert!(text.contains("(x) reset filters"));
        assert!(text.contains("Advanced"));
    }

    #[test]
    fn test_empty_bank_view_has_no_reset_hint() {
        let store = Arc::new(QuestionStore::from_questions(vec![]).unwrap());
        let app = App::new(store, Filters::default());
        let text = render(&app);
        assert!(text.contains("The question bank is empty."));
        assert!(!text.contains("(x) reset filters"));
    }

    #[test]
    fn test_long_answer_keeps_whole_sentence_visible() {
        let store = Arc::new(
            QuestionStore::from_questions(vec![question(
                "14",
                "The problem ______ at the meeting now.",
                &["is discussing", "is being discussed", "discussed", "has discussed"],
                "is being discussed",
                Category::Voice,
                Difficulty::Advanced,
            )])
            .unwrap(),
        );
        let mut app = App::new(store, Filters::default());
        app.session.select_option("is being discussed");

        let area = Rect::new(0, 0, 52, 40);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);
        let text: String = buf.content.iter().map(|c| c.symbol()).collect();

        assert!(text.contains("is being discussed"));
        assert!(text.contains("meeting now."));
    }

    #[test]
    fn test_results_view() {
        let mut app = app();
        for option in ["which", "Felt", "whose"] {
            app.session.select_option(option);
            app.session.submit();
            app.session.advance();
        }
        let text = render(&app);
        assert!(text.contains("2 / 3"));
        assert!(text.contains("67%"));
        assert!(text.contains("Not bad"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let mut app = app();
        app.session.select_option("which");
        app.session.submit();
        let area = Rect::new(0, 0, 12, 6);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);
    }
}
