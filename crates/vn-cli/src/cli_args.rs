use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use vn_runtime::ChapterHistoryPolicy;

#[derive(Debug, Parser)]
#[command(name = "vn-cli")]
#[command(about = "Visual-novel script player and agent CLI")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Agent(AgentArgs),
    Play(PlayArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AgentArgs {
    #[command(subcommand)]
    pub(crate) command: AgentCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AgentCommand {
    Start(StartArgs),
    Next(StepArgs),
    Back(StepArgs),
    Chapter(ChapterArgs),
    Chapters(ChaptersArgs),
    Log(LogArgs),
}

/// Text box geometry and transcript policy shared by `agent start` and `play`.
#[derive(Debug, Clone, Args)]
pub(crate) struct BoxArgs {
    #[arg(long = "columns")]
    pub(crate) columns: Option<usize>,
    #[arg(long = "rows")]
    pub(crate) rows: Option<usize>,
    #[arg(long = "chapter-history", value_enum)]
    pub(crate) chapter_history: Option<ChapterHistoryArg>,
}

#[derive(Debug, Args)]
pub(crate) struct StartArgs {
    #[arg(long = "script")]
    pub(crate) script: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
    #[command(flatten)]
    pub(crate) box_args: BoxArgs,
}

#[derive(Debug, Args)]
pub(crate) struct StepArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["index", "title"])))]
pub(crate) struct ChapterArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
    #[arg(long = "index")]
    pub(crate) index: Option<usize>,
    #[arg(long = "title")]
    pub(crate) title: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ChaptersArgs {
    #[arg(long = "script")]
    pub(crate) script: String,
}

#[derive(Debug, Args)]
pub(crate) struct LogArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
}

#[derive(Debug, Args)]
pub(crate) struct PlayArgs {
    #[arg(long = "script")]
    pub(crate) script: String,
    #[arg(long = "state-file")]
    pub(crate) state_file: Option<String>,
    #[command(flatten)]
    pub(crate) box_args: BoxArgs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum ChapterHistoryArg {
    #[default]
    Clear,
    Truncate,
    Keep,
}

impl From<ChapterHistoryArg> for ChapterHistoryPolicy {
    fn from(value: ChapterHistoryArg) -> Self {
        match value {
            ChapterHistoryArg::Clear => ChapterHistoryPolicy::Clear,
            ChapterHistoryArg::Truncate => ChapterHistoryPolicy::TruncateFromTarget,
            ChapterHistoryArg::Keep => ChapterHistoryPolicy::Keep,
        }
    }
}
