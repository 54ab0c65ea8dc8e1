pub mod rank;
pub mod resolve;
pub mod stats;

use std::path::PathBuf;

use clap::Args;

use common::{Contest, TeamProblemStatistics};
use standings::RankOptions;

use crate::config::{BoardConfig, OutputFormat};

/// Flags shared by every command that builds a board.
#[derive(Debug, Args)]
pub struct BoardArgs {
    /// Directory holding config.json, team.json and run.json
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Only rank teams of this group
    #[arg(long)]
    pub group: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl BoardArgs {
    pub fn format(&self, config: &BoardConfig) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            config.output.format
        }
    }

    /// Group from the flag or the config; the time filter stays off unless
    /// `width` is below the full contest.
    pub fn rank_options(&self, width: Option<u32>, config: &BoardConfig, contest: &Contest) -> RankOptions {
        let mut options = RankOptions::new();
        options.set_group(self.group.as_deref().unwrap_or(&config.rank.group));

        let width = width.unwrap_or(config.rank.width);
        if width < 10_000 {
            options.set_width(width, contest);
        }
        options
    }
}

/// Scoreboard cell text: `+1/35` solved at minute 35 after one wrong try,
/// `-2` two wrong tries, `?1` one try awaiting a verdict, empty when untouched.
pub fn format_cell(cell: &TeamProblemStatistics) -> String {
    if cell.is_solved {
        let minute = cell.solved_timestamp_to_minute().unwrap_or_default();
        match cell.failed_count {
            0 => format!("+/{minute}"),
            n => format!("+{n}/{minute}"),
        }
    } else if cell.is_pending() {
        format!("?{}", cell.failed_count + cell.pending_count)
    } else if cell.failed_count > 0 {
        format!("-{}", cell.failed_count)
    } else {
        String::new()
    }
}
