use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use standings::{Rank, RankStatistics};

use super::BoardArgs;
use crate::config::{BoardConfig, OutputFormat};
use crate::data::{ContestData, data_dir};

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub board: BoardArgs,
}

/// Per-problem counters next to the problem label.
#[derive(Debug, Serialize)]
pub struct ProblemLine {
    pub label: String,
    pub accepted: u32,
    pub rejected: u32,
    pub pending: u32,
    pub attempted: u32,
    pub first_solved_by: Vec<String>,
}

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    #[serde(flatten)]
    rank_statistics: &'a RankStatistics,
    problems: Vec<ProblemLine>,
}

pub fn run(args: &StatsArgs, config: &BoardConfig) -> anyhow::Result<()> {
    let data = ContestData::load(&data_dir(args.board.data.as_deref(), config))?;
    let options = args.board.rank_options(None, config, &data.contest);

    let mut rank = Rank::new(Arc::clone(&data.contest), &data.teams, &data.submissions)
        .with_options(options);
    rank.build();

    match args.board.format(config) {
        OutputFormat::Json => {
            let report = StatsReport {
                rank_statistics: rank.rank_statistics(),
                problems: problem_lines(&rank),
            };
            let json = serde_json::to_string_pretty(&report).context("Failed to encode statistics")?;
            println!("{json}");
        }
        OutputFormat::Table => print!("{}", render(&rank)),
    }
    Ok(())
}

pub fn problem_lines(rank: &Rank) -> Vec<ProblemLine> {
    rank.contest()
        .problems
        .iter()
        .zip(rank.problem_statistics())
        .map(|(problem, stats)| ProblemLine {
            label: problem.label.clone(),
            accepted: stats.accepted_num,
            rejected: stats.rejected_num,
            pending: stats.pending_num,
            attempted: stats.attempted_num,
            first_solved_by: stats
                .first_solve_submissions
                .iter()
                .map(|s| s.team_id.clone())
                .collect(),
        })
        .collect()
}

pub fn render(rank: &Rank) -> String {
    let stats = rank.rank_statistics();
    let mut out = String::from("Solved  Teams\n");
    for (solved, teams) in stats.team_solved_num.iter().enumerate() {
        out.push_str(&format!("{solved:>6}  {teams:>5}\n"));
    }

    out.push_str("\nProblem  Accepted\n");
    for entry in &stats.problem_solved {
        out.push_str(&format!("{:>7}  {:>8}\n", entry.label, entry.solved));
    }

    out.push_str("\nProblem  Accepted  Rejected  Pending  Attempted  First solve\n");
    for line in problem_lines(rank) {
        out.push_str(&format!(
            "{:>7}  {:>8}  {:>8}  {:>7}  {:>9}  {}\n",
            line.label,
            line.accepted,
            line.rejected,
            line.pending,
            line.attempted,
            line.first_solved_by.join(", ")
        ));
    }
    out
}
