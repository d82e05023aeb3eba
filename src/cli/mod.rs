pub mod config;
pub mod enter;
pub mod simulate;

use clap::{Parser, Subcommand};
use otpbox::settings::Settings;

/// Container and sink ids of the single-row form the CLI builds.
pub(crate) const CONTAINER_ID: &str = "otp";
pub(crate) const SINK_ID: &str = "code";

/// Merge command-line overrides into saved settings.
pub(crate) fn with_overrides(
    mut settings: Settings,
    cells: Option<usize>,
    empty_char: Option<char>,
    strict: bool,
) -> Settings {
    if let Some(n) = cells {
        settings.cells = n;
    }
    if let Some(c) = empty_char {
        settings.empty_char = c;
    }
    if strict {
        settings.strict = true;
    }
    settings
}

#[derive(Parser)]
#[command(name = "otpbox", about = "Multi-box one-time-passcode input.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enter a code interactively in the terminal.
    Enter {
        /// Number of boxes (default from settings, initially 6)
        #[arg(long)]
        cells: Option<usize>,
        /// Character shown for empty boxes in the value
        #[arg(long = "empty-char")]
        empty_char: Option<char>,
        /// Restore-only mode
        #[arg(long)]
        strict: bool,
        /// Mask digits as they are typed
        #[arg(long)]
        mask: bool,
    },
    /// Apply a sequence of steps without a terminal and print the result.
    ///
    /// Steps: digits/characters are typed one key at a time; `paste:TEXT`,
    /// `set:VALUE`, `focus:I`, `caret:S`, `<bs>`, `<del>`, `<left>`, `<right>`.
    Simulate {
        #[arg(long)]
        cells: Option<usize>,
        #[arg(long = "empty-char")]
        empty_char: Option<char>,
        #[arg(long)]
        strict: bool,
        /// Print a table of cell states
        #[arg(long)]
        table: bool,
        /// Steps to apply, in order
        steps: Vec<String>,
    },
    /// Show or change saved defaults.
    Config {
        #[arg(long)]
        cells: Option<usize>,
        #[arg(long = "empty-char")]
        empty_char: Option<char>,
        #[arg(long, conflicts_with = "no_strict")]
        strict: bool,
        #[arg(long = "no-strict")]
        no_strict: bool,
        #[arg(long, conflicts_with = "no_mask")]
        mask: bool,
        #[arg(long = "no-mask")]
        no_mask: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_settings() {
        let s = with_overrides(Settings::default(), Some(4), Some('_'), true);
        assert_eq!(s.cells, 4);
        assert_eq!(s.empty_char, '_');
        assert!(s.strict);
    }

    #[test]
    fn missing_overrides_keep_settings() {
        let base = Settings {
            cells: 8,
            strict: true,
            ..Settings::default()
        };
        let s = with_overrides(base.clone(), None, None, false);
        assert_eq!(s, base);
    }

    #[test]
    fn cli_parses_simulate_steps() {
        let cli = Cli::try_parse_from(["otpbox", "simulate", "--cells", "4", "12", "<bs>"]).unwrap();
        match cli.command {
            Commands::Simulate { cells, steps, .. } => {
                assert_eq!(cells, Some(4));
                assert_eq!(steps, vec!["12", "<bs>"]);
            }
            _ => panic!("expected simulate"),
        }
    }
}
