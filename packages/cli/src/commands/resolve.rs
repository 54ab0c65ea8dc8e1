use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use standings::Resolver;

use super::{BoardArgs, format_cell};
use crate::config::{BoardConfig, OutputFormat};
use crate::data::{ContestData, data_dir};

#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub board: BoardArgs,
}

/// One reveal step as printed.
#[derive(Debug, Serialize)]
pub struct RevealLine {
    pub id: usize,
    pub team_id: String,
    pub team_name: String,
    pub problem: String,
    pub before: String,
    pub after: String,
    pub solved: bool,
}

pub fn run(args: &ResolveArgs, config: &BoardConfig) -> anyhow::Result<()> {
    let data = ContestData::load(&data_dir(args.board.data.as_deref(), config))?;
    let options = args.board.rank_options(None, config, &data.contest);

    let mut resolver = Resolver::new(Arc::clone(&data.contest), &data.teams, &data.submissions)
        .with_options(options);
    resolver.build();
    info!(
        frozen = resolver.after_freeze_submissions().len(),
        operations = resolver.operations().len(),
        "Resolver built"
    );

    match args.board.format(config) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reveal_lines(&resolver))
                .context("Failed to encode resolver operations")?;
            println!("{json}");
        }
        OutputFormat::Table => print!("{}", render(&resolver)),
    }
    Ok(())
}

pub fn reveal_lines(resolver: &Resolver) -> Vec<RevealLine> {
    let board = resolver.final_rank();
    resolver
        .operations()
        .iter()
        .map(|op| RevealLine {
            id: op.id,
            team_id: op.team_id.clone(),
            team_name: board
                .team(&op.team_id)
                .map(|t| t.name.clone())
                .unwrap_or_default(),
            problem: board
                .contest()
                .problems
                .get(op.problem_ix)
                .map(|p| p.label.clone())
                .unwrap_or_default(),
            before: format_cell(&op.before_team_problem_statistics),
            after: format_cell(&op.after_team_problem_statistics),
            solved: op.after_team_problem_statistics.is_solved,
        })
        .collect()
}

pub fn render(resolver: &Resolver) -> String {
    let mut out = String::new();
    for line in reveal_lines(resolver) {
        out.push_str(&format!(
            "{:>4}  {:<24} {:>3}  {:>7} -> {:<7}\n",
            line.id, line.team_name, line.problem, line.before, line.after
        ));
    }

    out.push_str("\nFinal standings\n");
    for team in resolver.resolved_teams() {
        out.push_str(&format!(
            "{:<24} {:>3} {:>6}\n",
            team.name,
            team.solved_problem_num,
            team.penalty_in_minutes()
        ));
    }
    out
}
