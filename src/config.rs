use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::render::Theme;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Parser, Debug)]
#[command(
    name = "gh-analyzer",
    about = "Show a GitHub user's public repositories and daily push commits"
)]
pub struct Cli {
    /// GitHub username to analyze. When omitted, usernames are read from stdin, one per line.
    pub username: Option<String>,
    /// REST API root
    #[arg(long, env = "GH_ANALYZER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// Directory the SVG cards are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Which SVG themes to write
    #[arg(long, value_enum, default_value_t = ThemeChoice::Both)]
    pub theme: ThemeChoice,
    /// Print the final state as JSON instead of the text panel
    #[arg(long)]
    pub json: bool,
    /// Skip writing SVG cards
    #[arg(long)]
    pub no_svg: bool,
    /// HTTP timeout in seconds (default: none)
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    Both,
}

impl ThemeChoice {
    pub fn themes(self) -> Vec<Theme> {
        match self {
            ThemeChoice::Dark => vec![Theme::Dark],
            ThemeChoice::Light => vec![Theme::Light],
            ThemeChoice::Both => vec![Theme::Dark, Theme::Light],
        }
    }
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout: Option<Duration>,
    pub out_dir: PathBuf,
    pub themes: Vec<Theme>,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            out_dir: PathBuf::from("."),
            themes: ThemeChoice::Both.themes(),
            json: false,
        }
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            api_url: cli.api_url.clone(),
            timeout: cli.timeout.map(Duration::from_secs),
            out_dir: cli.out_dir.clone(),
            themes: if cli.no_svg {
                Vec::new()
            } else {
                cli.theme.themes()
            },
            json: cli.json,
        }
    }
}
