pub mod gallery;
pub mod stage;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{App, Screen};

pub use stage::stage_area;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

/// Header, body, footer. Both screens share it so hosts can measure the
/// body without drawing.
pub(crate) fn chrome(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub(crate) fn header(f: &mut Frame, area: Rect, title: &str) {
    let widget = Paragraph::new(title.to_string())
        .block(Block::default().borders(Borders::ALL).title("glimmer"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

pub(crate) fn footer(f: &mut Frame, area: Rect, help: &str) {
    let widget = Paragraph::new(help.to_string())
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

pub fn ui(app: &mut App, f: &mut Frame) {
    match app.screen {
        Screen::Typewriter => gallery::render(app, f),
        Screen::Placement => stage::render(app, f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_reserves_header_and_footer() {
        let [head, body, foot] = chrome(Rect::new(0, 0, 80, 24));
        assert_eq!(head.height, HEADER_HEIGHT);
        assert_eq!(foot.height, FOOTER_HEIGHT);
        assert_eq!(body, Rect::new(0, 3, 80, 18));
    }
}
