use crate::ui::Language;
use clap::Parser;

/// A terminal client for turning GitHub commits into AI-drafted posts on X
#[derive(Parser, Debug)]
#[command(
    name = "commitcast",
    version,
    about = "Generate a post from a repository's latest commit and publish it to X",
    long_about = None
)]
pub struct Cli {
    /// Backend API origin (overrides COMMITCAST_API_URL / COMMITCAST_BACKEND_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Default post language: ja or en
    #[arg(long, value_name = "LANG")]
    pub language: Option<Language>,

    /// Disable all UI colors
    #[arg(long)]
    pub no_colors: bool,
}
