use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "powerreach",
    version,
    about = "Score how measurable the reach of a power system is"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory searched for powerreach.toml
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the selectable systems
    List,
    /// Analyze one system
    Analyze(AnalyzeCommand),
    /// Compare two systems
    Compare(CompareCommand),
    /// Analyze several systems side by side (all when none are given)
    Summary(SummaryCommand),
    /// Walk through privileges, limitations and measurement
    Demo(DemoCommand),
    /// Score a system against thematic keyword sets
    Themes(ThemesCommand),
    /// Ask whether a system permits an action (exit 1 when it does not)
    Check(CheckCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    pub system: String,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct CompareCommand {
    pub first: String,
    pub second: String,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct SummaryCommand {
    pub systems: Vec<String>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct DemoCommand {
    pub system: String,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct ThemesCommand {
    pub system: String,
    /// Restrict the breakdown to one theme
    #[arg(long)]
    pub theme: Option<String>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct CheckCommand {
    pub system: String,
    pub action: String,
}

impl Commands {
    pub fn format(&self) -> Option<ReportFormat> {
        match self {
            Self::List | Self::Check(_) => None,
            Self::Analyze(cmd) => cmd.format,
            Self::Compare(cmd) => cmd.format,
            Self::Summary(cmd) => cmd.format,
            Self::Demo(cmd) => cmd.format,
            Self::Themes(cmd) => cmd.format,
        }
    }
}
