use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::celebration::{Celebration, PALETTE_SIZE};
use crate::session::{QuizResult, ResultMessage};

const SPARK_COLORS: [Color; PALETTE_SIZE] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

fn message_color(message: ResultMessage) -> Color {
    match message {
        ResultMessage::Perfect => Color::Yellow,
        ResultMessage::Excellent => Color::Green,
        ResultMessage::Good => Color::Cyan,
        ResultMessage::KeepPracticing => Color::Magenta,
    }
}

pub fn render_results(result: QuizResult, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let message = result.message();

    let height = 9.min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            "🏆 Practice complete",
            bold_style.fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(message_color(message))
                .add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(vec![
            Span::raw("Score  "),
            Span::styled(format!("{} / {}", result.score, result.total), bold_style),
            Span::raw("     Accuracy  "),
            Span::styled(format!("{}%", result.percentage()), bold_style),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "(r)estart / (c)ategory / (d)ifficulty / (esc)ape",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

/// Draw celebration sparks on top of whatever is already in `buf`
pub fn render_sparks(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    for spark in &celebration.sparks {
        if spark.x < 0.0 || spark.y < 0.0 {
            continue;
        }
        let x = spark.x as u16;
        let y = spark.y as u16;
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = SPARK_COLORS[spark.color_index % SPARK_COLORS.len()];
        let style = if spark.brightness() > 0.5 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_char(spark.symbol).set_style(style);
        }
    }
}
