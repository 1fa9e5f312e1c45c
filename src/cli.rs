// CLI module - command-line argument parsing and handlers
//
// The positional arguments are the slide references; every configuration
// surface option has a flag override. A small `config` subcommand mirrors
// the file layer for discoverability.

use crate::config::{Options, VERSION};
use clap::{Parser, Subcommand};

/// Diorama - slide carousel for the terminal
#[derive(Parser)]
#[command(name = "diorama")]
#[command(version = VERSION)]
#[command(about = "Slide carousel widget for the terminal", long_about = None)]
pub struct Cli {
    /// Slide references (image paths or URLs); demo slides when omitted
    pub slides: Vec<String>,

    /// Widget width in layout units (floor 200)
    #[arg(long)]
    pub width: Option<u16>,

    /// Widget height in layout units (floor 200)
    #[arg(long)]
    pub height: Option<u16>,

    /// Transition: strip, fade, blackout or cards
    #[arg(long)]
    pub transition: Option<String>,

    /// Hide the position counter
    #[arg(long)]
    pub no_counter: bool,

    /// Hide the controls chrome entirely
    #[arg(long)]
    pub no_controls: bool,

    /// Controls style: 1 round, 2 slim, 3 square, 4 preview thumbnails
    #[arg(long)]
    pub controls_type: Option<u8>,

    /// Auto-hide the controls chrome after pointer inactivity
    #[arg(long)]
    pub autohide_controls: bool,

    /// Advance slides automatically (3s interval)
    #[arg(long)]
    pub autoplay: bool,

    /// Autoplay interval in milliseconds (implies --autoplay)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI subcommands. Returns true if a command was handled (exit after).
pub fn handle_cli(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Config { show, path }) => {
            if *path {
                match Options::config_path() {
                    Some(p) => println!("{}", p.display()),
                    None => println!("no home directory; config file unavailable"),
                }
            } else if *show {
                println!("{:#?}", Options::resolve(cli));
            } else {
                println!("usage: diorama config --show | --path");
            }
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slides_are_positional() {
        let cli = Cli::try_parse_from(["diorama", "a.png", "b.png", "--autoplay"]).unwrap();
        assert_eq!(cli.slides, vec!["a.png", "b.png"]);
        assert!(cli.autoplay);
    }

    #[test]
    fn test_no_subcommand_is_not_handled() {
        let cli = Cli::try_parse_from(["diorama"]).unwrap();
        assert!(!handle_cli(&cli));
    }
}
