use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use glimmer::position::Rect as ElementRect;

use super::{chrome, footer, header};
use crate::App;

const HELP: &str =
    "1-4 side · a align · +/- offset · arrows move target · PgUp/PgDn scroll · Tab typewriter · Esc quit";

/// Area the placement page is drawn into for a given terminal size.
pub fn stage_area(area: Rect) -> Rect {
    chrome(area)[1]
}

/// Snap a viewport rect to terminal cells, clipped to `clip`.
pub fn to_cells(rect: &ElementRect, clip: Rect) -> Option<Rect> {
    let left = rect.left.round() as i64;
    let top = rect.top.round() as i64;
    let right = left + rect.width.round() as i64;
    let bottom = top + rect.height.round() as i64;

    let x0 = left.max(clip.x as i64);
    let y0 = top.max(clip.y as i64);
    let x1 = right.min(clip.right() as i64);
    let y1 = bottom.min(clip.bottom() as i64);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(
        x0 as u16,
        y0 as u16,
        (x1 - x0) as u16,
        (y1 - y0) as u16,
    ))
}

pub fn render(app: &mut App, f: &mut Frame) {
    let area = f.area();
    let [head, body, foot] = chrome(area);
    let demo = &app.placement;

    let coordinate = demo
        .positioner
        .coordinate()
        .map(|c| format!("top {} left {}", c.top, c.left))
        .unwrap_or_else(|| "not measured".to_string());
    header(f, head, &format!("Placement {} · {}", demo.label(), coordinate));
    footer(f, foot, HELP);

    let stage = Block::default()
        .borders(Borders::ALL)
        .title(format!("page (scroll {})", demo.scroll));
    let inner = stage.inner(body);
    f.render_widget(stage, body);

    if let Some(cells) = demo.anchor_rect().and_then(|r| to_cells(&r, inner)) {
        let anchor = Block::default()
            .borders(Borders::ALL)
            .title("target")
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(anchor, cells);
    }

    // the label is positioned against the whole viewport, not the page
    let label_cells = demo
        .positioner
        .coordinate()
        .zip(demo.label_rect())
        .and_then(|(c, size)| {
            to_cells(&ElementRect::new(c.top, c.left, size.width, size.height), area)
        });
    if let Some(cells) = label_cells {
        let label = Paragraph::new(demo.label())
            .block(Block::default().borders(Borders::ALL))
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(Clear, cells);
        f.render_widget(label, cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_cells_rounds_and_clips() {
        let clip = Rect::new(0, 0, 20, 10);
        assert_eq!(
            to_cells(&ElementRect::new(1.4, 2.6, 5.0, 3.0), clip),
            Some(Rect::new(3, 1, 5, 3))
        );
        assert_eq!(
            to_cells(&ElementRect::new(-1.0, 18.0, 5.0, 3.0), clip),
            Some(Rect::new(18, 0, 2, 2))
        );
        assert_eq!(to_cells(&ElementRect::new(12.0, 0.0, 5.0, 3.0), clip), None);
    }

    #[test]
    fn stage_sits_between_header_and_footer() {
        assert_eq!(stage_area(Rect::new(0, 0, 80, 24)), Rect::new(0, 3, 80, 18));
    }
}
