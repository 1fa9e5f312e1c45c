// Diorama - slide carousel widget for the terminal
//
// Given an ordered list of slide references, the widget shows one slide
// at a time, moves between them with one of four transition strategies,
// optionally autoplays, and keeps a controls chrome (previews, nav
// buttons, counter, auto-hide) in sync with the current slide.
//
// Architecture:
// - Registry: bounded, ordered slide list
// - Transition engine: pure strategies producing a VisualState
// - Navigation coordinator: the only mutator of the current index
// - Playback scheduler: self-rescheduling autoplay timer task
// - Controls surface: chrome state, driven by published slide changes
// - TUI (ratatui): event loop and rendering; mpsc channels connect the
//   timer tasks to the widget

mod cli;
mod config;
mod controls;
mod coordinator;
mod demo;
mod events;
mod geometry;
mod logging;
mod registry;
mod scheduler;
mod transition;
mod tui;
mod widget;

use anyhow::Result;
use clap::Parser;
use config::Options;
use registry::SlideSet;
use tokio::sync::mpsc;
use tracing::info;
use widget::Slideshow;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    if cli::handle_cli(&cli) {
        return Ok(());
    }

    let options = Options::resolve(&cli);
    let _log_guard = logging::init(&options.log_dir)?;

    // The slide source is external; without one the demo set stands in
    let slide_input = if cli.slides.is_empty() {
        demo::placeholder_slides()
    } else {
        cli.slides.clone()
    };
    let slides = SlideSet::load(Some(&slide_input), options.slide_limit);
    info!(
        slides = slides.len(),
        transition = options.transition.name(),
        "starting slideshow"
    );

    let (tx, rx) = mpsc::channel(32);
    let mut show = Slideshow::new(options, slides, tx);

    // Outbound current-index notifications for the embedding side
    show.subscribe(|change| {
        info!(index = change.index, total = change.total, "slide changed");
    });

    tui::run_tui(show, rx).await
}
