// Rendering - pure projection of widget state onto the terminal
//
// The renderer interprets the VisualState contract produced by the
// transition engine: which slide is settled on top depends on the
// strategy (strip offset walk, stacking for fade/cards, visibility for
// blackout). It never runs transition logic of its own and never mutates
// widget state.

use super::UNITS_PER_CELL;
use crate::controls::{Chrome, ControlStyle, PREVIEW_WIDTH};
use crate::transition::{TransitionKind, VisualState};
use crate::widget::Slideshow;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Mutex;

/// Where the widget was last drawn; the mouse handler reads this to
/// classify pointer positions as inside/outside
static WIDGET_AREA: Mutex<Option<Rect>> = Mutex::new(None);

pub fn last_widget_area() -> Option<Rect> {
    *WIDGET_AREA.lock().unwrap()
}

/// Slide background palette, cycled by index
const SLIDE_COLORS: [Color; 6] = [
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Yellow,
];

/// Draw the whole widget
pub fn draw(f: &mut Frame, widget: &Slideshow) {
    let full = f.area();

    // Configured height caps the widget vertically; the pointer handler
    // treats anything below it as outside
    let height_cells = (widget.options().height / UNITS_PER_CELL).saturating_add(3);
    let area = Rect {
        height: full.height.min(height_cells),
        ..full
    };
    *WIDGET_AREA.lock().unwrap() = Some(area);

    let controls = widget.controls();
    let controls = controls.lock().unwrap();
    let chrome_rows = if widget.options().show_controls && controls.chrome() != Chrome::Hidden {
        3
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(chrome_rows)])
        .split(area);

    draw_slide(f, chunks[0], widget);

    if widget.options().show_counter {
        draw_counter(f, chunks[0], widget);
    }

    if chrome_rows > 0 {
        match controls.style() {
            ControlStyle::Preview => draw_preview_strip(f, chunks[1], widget, &controls),
            style => draw_dots(f, chunks[1], widget, style),
        }
    }
}

/// Index of the slide a static frame should show, per strategy
fn settled_slide(kind: TransitionKind, visual: &VisualState, slide_width: u16) -> usize {
    match kind {
        // Walk the strip until the accumulated width reaches the offset
        TransitionKind::Strip => {
            let target = -visual.strip_offset;
            let mut acc: i32 = 0;
            for i in 0..visual.slides.len() {
                if acc >= target {
                    return i;
                }
                acc += i32::from(slide_width);
            }
            visual.slides.len().saturating_sub(1)
        }
        // Fade settles on the incoming slide beneath the fading one
        TransitionKind::Fade => visual
            .slides
            .iter()
            .position(|s| s.stack == 0)
            .unwrap_or(0),
        // Blackout and cards settle on the top visible slide
        TransitionKind::Blackout | TransitionKind::Cards => visual.stacked_top().unwrap_or(0),
    }
}

fn draw_slide(f: &mut Frame, area: Rect, widget: &Slideshow) {
    let slides = widget.slides();
    if slides.is_empty() {
        let empty = Paragraph::new("no slides")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" diorama "));
        f.render_widget(empty, area);
        return;
    }

    let index = settled_slide(
        widget.options().transition,
        widget.visual(),
        widget.options().width,
    );
    let name = slides.get(index).unwrap_or("?");
    let color = SLIDE_COLORS[index % SLIDE_COLORS.len()];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {name} "));

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("slide {}", index + 1),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);

    f.render_widget(body, area);
}

/// Position counter in the top-right corner of the viewport
fn draw_counter(f: &mut Frame, area: Rect, widget: &Slideshow) {
    let text = widget.counter();
    let width = text.len() as u16 + 2;
    if area.width <= width + 2 || area.height < 2 {
        return;
    }

    let counter_area = Rect::new(area.right().saturating_sub(width + 1), area.y + 1, width, 1);
    let counter = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(counter, counter_area);
}

/// Round/slim/square styles render as a dot row under the viewport
fn draw_dots(
    f: &mut Frame,
    area: Rect,
    widget: &Slideshow,
    style: ControlStyle,
) {
    let (on, off) = match style {
        ControlStyle::Slim => ("▬", "─"),
        ControlStyle::Square => ("■", "□"),
        _ => ("●", "○"),
    };

    let current = widget.current();
    let spans: Vec<Span> = (0..widget.slides().len())
        .flat_map(|i| {
            let dot = if i == current {
                Span::styled(on, Style::default().add_modifier(Modifier::BOLD))
            } else {
                Span::styled(off, Style::default().fg(Color::DarkGray))
            };
            [dot, Span::raw(" ")]
        })
        .collect();

    let dots = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(dots, area);
}

/// Preview-thumbnail controls: scrollable strip, nav buttons, indicator
fn draw_preview_strip(
    f: &mut Frame,
    area: Rect,
    widget: &Slideshow,
    controls: &crate::controls::ControlsSurface,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    if controls.show_nav_buttons() {
        let before_style = if controls.before_enabled() {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let next_style = if controls.next_enabled() {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        f.render_widget(
            Paragraph::new("◀").alignment(Alignment::Center).style(before_style),
            chunks[0],
        );
        f.render_widget(
            Paragraph::new("▶").alignment(Alignment::Center).style(next_style),
            chunks[2],
        );
    }

    let strip_area = chunks[1];
    let active = controls.active_preview();
    let preview_cells = PREVIEW_WIDTH / UNITS_PER_CELL;
    let first_visible = (controls.scroll_offset() / PREVIEW_WIDTH) as usize;

    let mut labels: Vec<Span> = Vec::new();
    let mut used: u16 = 0;
    for i in first_visible..controls.preview_count() {
        if used + preview_cells > strip_area.width {
            break;
        }
        let label = format!("[{:^width$}]", i + 1, width = preview_cells as usize - 2);
        let style = if i == active {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        labels.push(Span::styled(label, style));
        used += preview_cells;
    }

    // Indicator travel under the previews, offset-relative
    let travel_cells = controls
        .indicator_travel()
        .saturating_sub(controls.scroll_offset())
        / UNITS_PER_CELL;
    let indicator = format!(
        "{}{}",
        " ".repeat(travel_cells as usize),
        "▔".repeat(preview_cells as usize)
    );

    let strip = Paragraph::new(vec![
        Line::from(labels),
        Line::from(indicator),
    ])
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(strip, strip_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FixedGeometry;
    use crate::geometry::GeometryProvider;

    fn visual(kind: TransitionKind, from: usize, to: usize, count: usize) -> VisualState {
        let geom = FixedGeometry::new(vec![200; count], 200);
        assert_eq!(geom.slide_count(), count);
        kind.apply(from, to, &geom)
    }

    #[test]
    fn test_settled_slide_strip_walk() {
        let state = visual(TransitionKind::Strip, 0, 3, 5);
        assert_eq!(settled_slide(TransitionKind::Strip, &state, 200), 3);

        let origin = VisualState::initial(5);
        assert_eq!(settled_slide(TransitionKind::Strip, &origin, 200), 0);
    }

    #[test]
    fn test_settled_slide_fade_is_the_incoming() {
        let state = visual(TransitionKind::Fade, 1, 4, 5);
        assert_eq!(settled_slide(TransitionKind::Fade, &state, 200), 4);
    }

    #[test]
    fn test_settled_slide_blackout_and_cards() {
        let state = visual(TransitionKind::Blackout, 0, 2, 5);
        assert_eq!(settled_slide(TransitionKind::Blackout, &state, 200), 2);

        let state = visual(TransitionKind::Cards, 4, 1, 5);
        assert_eq!(settled_slide(TransitionKind::Cards, &state, 200), 1);
    }
}
