//! Widget configuration
//!
//! Options are resolved once per widget instance, in order of precedence:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables (DIORAMA_*)
//! 3. Config file (~/.config/diorama/config.toml)
//! 4. Built-in defaults (lowest priority)
//!
//! Malformed values never fail the widget: unknown transition names fall
//! back to strip, out-of-range controls selectors to round, dimensions
//! below the floor to the floor. A broken config file is reported and
//! ignored.

use crate::cli::Cli;
use crate::controls::ControlStyle;
use crate::registry::DEFAULT_SLIDE_LIMIT;
use crate::scheduler::PlaybackConfig;
use crate::transition::TransitionKind;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum (and default) widget dimension, in layout units
pub const MIN_DIMENSION: u16 = 200;

/// Resolved widget options, immutable after initialization
#[derive(Debug, Clone)]
pub struct Options {
    /// Widget width in layout units
    pub width: u16,
    /// Widget height in layout units
    pub height: u16,
    /// Transition strategy for slide changes
    pub transition: TransitionKind,
    /// Show the "current/total" position counter
    pub show_counter: bool,
    /// Render the controls chrome at all
    pub show_controls: bool,
    /// Controls style (round/slim/square/preview)
    pub controls_type: ControlStyle,
    /// Hide the chrome after pointer inactivity
    pub autohide_controls: bool,
    /// Autoplay settings
    pub autoplay: PlaybackConfig,
    /// Maximum number of slides to display
    pub slide_limit: usize,
    /// Directory for log files
    pub log_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: MIN_DIMENSION,
            height: MIN_DIMENSION,
            transition: TransitionKind::default(),
            show_counter: true,
            show_controls: true,
            controls_type: ControlStyle::default(),
            autohide_controls: false,
            autoplay: PlaybackConfig::off(),
            slide_limit: DEFAULT_SLIDE_LIMIT,
            log_dir: PathBuf::from("./logs"),
        }
    }
}

/// Autoplay as it appears in the config file: either a plain flag or an
/// explicit interval table
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum FileAutoplay {
    Flag(bool),
    Timed { interval_ms: u64 },
}

impl FileAutoplay {
    fn into_config(self) -> PlaybackConfig {
        match self {
            FileAutoplay::Flag(true) => PlaybackConfig::on(),
            FileAutoplay::Flag(false) => PlaybackConfig::off(),
            FileAutoplay::Timed { interval_ms } => {
                PlaybackConfig::every(Duration::from_millis(interval_ms))
            }
        }
    }
}

/// Config file structure (subset of Options that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileOptions {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub transition: Option<String>,
    pub show_counter: Option<bool>,
    pub show_controls: Option<bool>,
    pub controls_type: Option<u8>,
    pub autohide_controls: Option<bool>,
    pub autoplay: Option<FileAutoplay>,
    pub slide_limit: Option<usize>,
    pub log_dir: Option<String>,
}

impl Options {
    /// Get the config file path: ~/.config/diorama/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("diorama").join("config.toml"))
    }

    /// Load file options if the file exists and parses.
    ///
    /// Per the error handling policy, a malformed file degrades to
    /// defaults with a message rather than failing the widget.
    fn load_file_options() -> FileOptions {
        let Some(path) = Self::config_path() else {
            return FileOptions::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("ignoring malformed config {}: {}", path.display(), e);
                    FileOptions::default()
                }
            },
            Err(_) => FileOptions::default(),
        }
    }

    /// Resolve options: CLI > env > file > defaults
    pub fn resolve(cli: &Cli) -> Self {
        let file = Self::load_file_options();
        Self::resolve_with(cli, file)
    }

    fn resolve_with(cli: &Cli, file: FileOptions) -> Self {
        let width = cli
            .width
            .or_else(|| env_u16("DIORAMA_WIDTH"))
            .or(file.width)
            .unwrap_or(MIN_DIMENSION);

        let height = cli
            .height
            .or_else(|| env_u16("DIORAMA_HEIGHT"))
            .or(file.height)
            .unwrap_or(MIN_DIMENSION);

        let transition = cli
            .transition
            .clone()
            .or_else(|| std::env::var("DIORAMA_TRANSITION").ok())
            .or(file.transition)
            .map(|name| TransitionKind::parse_or_default(&name))
            .unwrap_or_default();

        // --no-counter / --no-controls flags override everything
        let show_counter = if cli.no_counter {
            false
        } else {
            file.show_counter.unwrap_or(true)
        };
        let show_controls = if cli.no_controls {
            false
        } else {
            file.show_controls.unwrap_or(true)
        };

        let controls_type = cli
            .controls_type
            .or(file.controls_type)
            .map(ControlStyle::from_selector)
            .unwrap_or_default();

        let autohide_controls = cli.autohide_controls || file.autohide_controls.unwrap_or(false);

        // An explicit interval implies autoplay; a bare flag gets the
        // default interval; otherwise defer to the file
        let autoplay = if let Some(ms) = cli.interval_ms {
            PlaybackConfig::every(Duration::from_millis(ms))
        } else if cli.autoplay {
            PlaybackConfig::on()
        } else {
            file.autoplay
                .map(FileAutoplay::into_config)
                .unwrap_or_else(PlaybackConfig::off)
        };

        let slide_limit = file.slide_limit.unwrap_or(DEFAULT_SLIDE_LIMIT);

        let log_dir = std::env::var("DIORAMA_LOG_DIR")
            .ok()
            .or(file.log_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./logs"));

        Self {
            // Dimension floor: anything below the minimum (or unset)
            // becomes the minimum
            width: width.max(MIN_DIMENSION),
            height: height.max(MIN_DIMENSION),
            transition,
            show_counter,
            show_controls,
            controls_type,
            autohide_controls,
            autoplay,
            slide_limit,
            log_dir,
        }
    }
}

fn env_u16(name: &str) -> Option<u16> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("diorama").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = Options::resolve_with(&cli(&[]), FileOptions::default());

        assert_eq!(options.width, 200);
        assert_eq!(options.height, 200);
        assert_eq!(options.transition, TransitionKind::Strip);
        assert!(options.show_counter);
        assert!(options.show_controls);
        assert_eq!(options.controls_type, ControlStyle::Round);
        assert!(!options.autohide_controls);
        assert!(!options.autoplay.enabled);
        assert_eq!(options.slide_limit, 25);
    }

    #[test]
    fn test_dimension_floor() {
        let options = Options::resolve_with(&cli(&["--width", "80"]), FileOptions::default());
        assert_eq!(options.width, 200);

        let options = Options::resolve_with(&cli(&["--width", "640"]), FileOptions::default());
        assert_eq!(options.width, 640);
    }

    #[test]
    fn test_unknown_transition_normalizes_to_strip() {
        let options =
            Options::resolve_with(&cli(&["--transition", "spiral"]), FileOptions::default());
        assert_eq!(options.transition, TransitionKind::Strip);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file: FileOptions = toml::from_str(
            r#"
            width = 800
            transition = "fade"
            controls_type = 4
            "#,
        )
        .unwrap();
        let options = Options::resolve_with(&cli(&["--transition", "cards"]), file);

        assert_eq!(options.width, 800);
        assert_eq!(options.transition, TransitionKind::Cards);
        assert_eq!(options.controls_type, ControlStyle::Preview);
    }

    #[test]
    fn test_autoplay_flag_gets_default_interval() {
        let file: FileOptions = toml::from_str("autoplay = true").unwrap();
        let options = Options::resolve_with(&cli(&[]), file);

        assert!(options.autoplay.enabled);
        assert_eq!(options.autoplay.interval, Duration::from_millis(3000));
    }

    #[test]
    fn test_autoplay_interval_table() {
        let file: FileOptions = toml::from_str("autoplay = { interval_ms = 1500 }").unwrap();
        let options = Options::resolve_with(&cli(&[]), file);

        assert!(options.autoplay.enabled);
        assert_eq!(options.autoplay.interval, Duration::from_millis(1500));
    }

    #[test]
    fn test_cli_interval_implies_autoplay() {
        let options =
            Options::resolve_with(&cli(&["--interval-ms", "500"]), FileOptions::default());

        assert!(options.autoplay.enabled);
        assert_eq!(options.autoplay.interval, Duration::from_millis(500));
    }

    #[test]
    fn test_disable_flags() {
        let file: FileOptions = toml::from_str("show_counter = true").unwrap();
        let options = Options::resolve_with(&cli(&["--no-counter", "--no-controls"]), file);

        assert!(!options.show_counter);
        assert!(!options.show_controls);
    }
}
