//! Command-line interface for tictactoe_rollup.

use clap::Parser;
use std::path::PathBuf;

/// Tic-tac-toe rollup request handler
#[derive(Parser, Debug)]
#[command(name = "tictactoe_rollup")]
#[command(about = "Authoritative tic-tac-toe logic for a rollup node", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rollup HTTP server URL (overrides config and ROLLUP_HTTP_SERVER_URL)
    #[arg(long)]
    pub rollup_url: Option<String>,

    /// Side length of the board
    #[arg(long)]
    pub board_size: Option<usize>,

    /// Seed for game id generation
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_overrides() {
        let cli = Cli::parse_from([
            "tictactoe_rollup",
            "--rollup-url",
            "http://127.0.0.1:5004",
            "--seed",
            "9",
        ]);
        assert_eq!(cli.rollup_url.as_deref(), Some("http://127.0.0.1:5004"));
        assert_eq!(cli.seed, Some(9));
        assert!(cli.config.is_none());
    }
}
