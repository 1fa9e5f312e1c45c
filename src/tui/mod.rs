// TUI module - terminal surface for the slide widget
//
// This module manages the terminal using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard/mouse input, timer events, redraw ticks)
// - Mapping terminal signals onto the widget's interface: arrow keys and
//   digits become navigation intents, mouse position becomes the
//   pointer-enter/leave auto-hide signal, Resize becomes the viewport
//   resize signal

pub mod ui;

use crate::events::{NavIntent, ScrollDirection, WidgetEvent};
use crate::widget::Slideshow;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Layout units represented by one terminal cell; the widget thinks in
/// units, the renderer in cells
pub const UNITS_PER_CELL: u16 = 10;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and cleans up when done.
/// The widget's timer tasks deliver through `event_rx`; keyboard and
/// mouse input comes from crossterm.
pub async fn run_tui(
    mut widget: Slideshow,
    mut event_rx: mpsc::Receiver<WidgetEvent>,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Initial viewport measurement before the first render
    if let Ok(size) = terminal.size() {
        widget.on_resize(size.width.saturating_mul(UNITS_PER_CELL));
    }
    widget.mount();

    let result = run_event_loop(&mut terminal, &mut widget, &mut event_rx).await;

    // Teardown invalidates all timer handles before the terminal goes back
    widget.shutdown();

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!: terminal input, widget
/// timer events, and a periodic redraw tick. All widget mutations happen
/// here, one callback at a time - the run-to-completion model the state
/// machine assumes.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    widget: &mut Slideshow,
    event_rx: &mut mpsc::Receiver<WidgetEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));
    let mut should_quit = false;
    let mut pointer_inside = true;

    loop {
        terminal
            .draw(|f| ui::draw(f, widget))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => {
                            should_quit = handle_key_event(widget, key_event);
                        }
                        Ok(Event::Mouse(mouse_event)) => {
                            handle_mouse_event(widget, mouse_event, &mut pointer_inside);
                        }
                        Ok(Event::Resize(width, _)) => {
                            widget.on_resize(width.saturating_mul(UNITS_PER_CELL));
                        }
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {}

            // Timer events from the widget's tasks
            Some(widget_event) = event_rx.recv() => {
                widget.handle_event(widget_event);
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input. Returns true when the app should quit.
fn handle_key_event(widget: &mut Slideshow, key_event: KeyEvent) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,

        // Preview keyboard navigation routes through the coordinator
        key @ (KeyCode::Left | KeyCode::Right) => {
            let intent = widget.controls().lock().unwrap().handle_key(key);
            if let Some(intent) = intent {
                widget.handle_intent(intent);
            }
        }

        // Direct jump to slide 1-9
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            widget.handle_intent(NavIntent::GoTo(index));
        }

        // Preview strip scrolling
        KeyCode::Char('[') => {
            widget.handle_intent(NavIntent::ScrollPreviews(ScrollDirection::Before));
        }
        KeyCode::Char(']') => {
            widget.handle_intent(NavIntent::ScrollPreviews(ScrollDirection::Next));
        }

        _ => {}
    }
    false
}

/// Handle mouse input: position inside/outside the widget drives the
/// chrome auto-hide signal.
fn handle_mouse_event(widget: &mut Slideshow, mouse_event: MouseEvent, pointer_inside: &mut bool) {
    if let MouseEventKind::Moved = mouse_event.kind {
        let inside = ui::last_widget_area()
            .map(|area| {
                mouse_event.column >= area.x
                    && mouse_event.column < area.x + area.width
                    && mouse_event.row >= area.y
                    && mouse_event.row < area.y + area.height
            })
            .unwrap_or(true);

        // Only edge transitions matter; repeated moves inside are noise
        if inside != *pointer_inside {
            *pointer_inside = inside;
            widget.pointer(inside);
        }
    }
}
