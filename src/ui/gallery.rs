use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::atomic::Ordering;

use glimmer::typewriter::{Phase, Typewriter};

use super::{chrome, footer, header};
use crate::{App, Example};

const HELP: &str = "s start · p pause · r reset (manual) · R reset all · Tab placement · Esc quit";
const EXAMPLE_HEIGHT: u16 = 4;

fn phase_style(phase: Phase) -> Style {
    match phase {
        Phase::Idle => Style::default().fg(Color::DarkGray),
        Phase::PendingDelay => Style::default().fg(Color::Yellow),
        Phase::Typing => Style::default().fg(Color::Green),
        Phase::Paused => Style::default().fg(Color::Magenta),
        Phase::Complete => Style::default().fg(Color::Cyan),
    }
}

fn status_line(tw: &Typewriter) -> Line<'static> {
    Line::from(vec![
        Span::styled(tw.phase().to_string(), phase_style(tw.phase())),
        Span::raw(format!(
            "  {}/{}  typing: {}  complete: {}",
            tw.cursor_index(),
            tw.len(),
            tw.is_typing(),
            tw.is_complete()
        )),
    ])
}

fn example_widget<'a>(example: &'a Example, extra: Option<String>) -> Paragraph<'a> {
    let tw = &example.typewriter;
    let mut status = status_line(tw);
    if let Some(extra) = extra {
        status.spans.push(Span::raw(extra));
    }

    let title = format!("{} ({})", example.title, example.caption);
    Paragraph::new(vec![
        Line::from(Span::styled(
            tw.text(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        status,
    ])
    .block(Block::default().borders(Borders::ALL).title(title))
    .wrap(Wrap { trim: false })
}

pub fn render(app: &mut App, f: &mut Frame) {
    let [head, body, foot] = chrome(f.area());
    header(f, head, "Typewriter");
    footer(f, foot, HELP);

    let mut constraints = vec![Constraint::Length(EXAMPLE_HEIGHT); app.examples.len()];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .constraints(constraints)
        .split(body);

    let last = app.examples.len().saturating_sub(1);
    let completions = app.completions.load(Ordering::Relaxed);
    for (idx, example) in app.examples.iter().enumerate() {
        let extra = (idx == last).then(|| format!("  on_complete calls: {completions}"));
        f.render_widget(example_widget(example, extra), rows[idx]);
    }
}
