use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use common::{Contest, Submission, Team, parse_submissions, parse_teams};

use crate::config::BoardConfig;

pub const CONTEST_FILE: &str = "config.json";
pub const TEAM_FILE: &str = "team.json";
pub const RUN_FILE: &str = "run.json";

/// Everything a board is built from.
#[derive(Debug)]
pub struct ContestData {
    pub contest: Arc<Contest>,
    pub teams: Vec<Team>,
    pub submissions: Vec<Submission>,
}

impl ContestData {
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let contest = Contest::from_json(&read(dir, CONTEST_FILE)?)
            .with_context(|| format!("Failed to parse {CONTEST_FILE}"))?;
        let teams =
            parse_teams(&read(dir, TEAM_FILE)?).with_context(|| format!("Failed to parse {TEAM_FILE}"))?;
        let submissions = parse_submissions(&read(dir, RUN_FILE)?)
            .with_context(|| format!("Failed to parse {RUN_FILE}"))?;

        info!(
            contest = %contest.name,
            problems = contest.problems.len(),
            teams = teams.len(),
            submissions = submissions.len(),
            "Contest data loaded"
        );

        Ok(Self {
            contest: Arc::new(contest),
            teams,
            submissions,
        })
    }
}

/// The `--data` flag wins over the configured directory.
pub fn data_dir(flag: Option<&Path>, config: &BoardConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| config.data_dir.clone())
}

fn read(dir: &Path, name: &str) -> anyhow::Result<String> {
    let path = dir.join(name);
    fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}
