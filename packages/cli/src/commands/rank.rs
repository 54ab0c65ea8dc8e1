use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use standings::Rank;

use super::{BoardArgs, format_cell};
use crate::config::{BoardConfig, OutputFormat};
use crate::data::{ContestData, data_dir};

#[derive(Debug, Args)]
pub struct RankArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Replay only this share of the contest, in hundredths of a percent
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=10_000))]
    pub width: Option<u32>,
}

/// One printed standings line.
#[derive(Debug, Serialize)]
pub struct StandingRow {
    pub rank: usize,
    pub team_id: String,
    pub name: String,
    pub organization: String,
    pub organization_rank: Option<usize>,
    pub solved: usize,
    pub penalty: i64,
    pub cells: Vec<String>,
}

pub fn run(args: &RankArgs, config: &BoardConfig) -> anyhow::Result<()> {
    let data = ContestData::load(&data_dir(args.board.data.as_deref(), config))?;
    let options = args.board.rank_options(args.width, config, &data.contest);

    let mut rank = Rank::new(Arc::clone(&data.contest), &data.teams, &data.submissions)
        .with_options(options);
    rank.build();
    info!(teams = rank.teams().len(), "Standings built");

    match args.board.format(config) {
        OutputFormat::Json => {
            let rows = standing_rows(&rank);
            let json = serde_json::to_string_pretty(&rows).context("Failed to encode standings")?;
            println!("{json}");
        }
        OutputFormat::Table => print!("{}", render_table(&rank)),
    }
    Ok(())
}

pub fn standing_rows(rank: &Rank) -> Vec<StandingRow> {
    rank.teams()
        .iter()
        .map(|t| StandingRow {
            rank: t.rank,
            team_id: t.id.clone(),
            name: t.name.clone(),
            organization: t.organization.clone(),
            organization_rank: t.organization_rank,
            solved: t.solved_problem_num,
            penalty: t.penalty_in_minutes(),
            cells: t.problem_statistics.iter().map(format_cell).collect(),
        })
        .collect()
}

pub fn render_table(rank: &Rank) -> String {
    let mut out = format!(
        "{:>4}  {:<24} {:<20} {:>6} {:>7}",
        "Rank", "Team", "Organization", "Solved", "Penalty"
    );
    for problem in &rank.contest().problems {
        out.push_str(&format!(" {:>7}", problem.label));
    }
    out.push('\n');

    for row in standing_rows(rank) {
        out.push_str(&format!(
            "{:>4}  {:<24} {:<20} {:>6} {:>7}",
            row.rank, row.name, row.organization, row.solved, row.penalty
        ));
        for cell in &row.cells {
            out.push_str(&format!(" {cell:>7}"));
        }
        out.push('\n');
    }
    out
}
