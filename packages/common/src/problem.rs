use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::submission::Submission;
use crate::value::id_from_value;

/// Cosmetic balloon color of a problem.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalloonColor {
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub color: String,
}

/// A contest problem column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub id: String,
    /// Display label, e.g. "A".
    pub label: String,
    pub balloon_color: Option<BalloonColor>,
}

/// Explicit problem entry of a contest document.
#[derive(Clone, Debug, Deserialize)]
pub struct ProblemDocument {
    pub id: Value,
    pub label: Option<String>,
    pub balloon_color: Option<BalloonColor>,
}

impl ProblemDocument {
    pub(crate) fn into_problem(self) -> Result<Problem> {
        let id = id_from_value("problems.id", &self.id)?;
        Ok(Problem {
            label: self.label.unwrap_or_else(|| id.clone()),
            id,
            balloon_color: self.balloon_color,
        })
    }
}

/// Build problems from a bare list of labels. Each problem's id is its
/// zero-based position, which is how submission feeds refer to it.
pub fn problems_from_labels(labels: &[String], colors: Option<&[BalloonColor]>) -> Vec<Problem> {
    labels
        .iter()
        .enumerate()
        .map(|(ix, label)| Problem {
            id: ix.to_string(),
            label: label.clone(),
            balloon_color: colors.and_then(|c| c.get(ix)).cloned(),
        })
        .collect()
}

/// Contest-wide counters for one problem, rebuilt on every standings build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProblemStatistics {
    pub problem_id: String,
    pub submitted_num: u32,
    pub accepted_num: u32,
    pub rejected_num: u32,
    pub pending_num: u32,
    pub ignore_num: u32,
    /// Attempts (wrong ones included) spent by teams up to their first solve.
    pub attempted_num: u32,
    /// First accepted submissions; more than one when solves tie on timestamp.
    pub first_solve_submissions: Vec<Submission>,
    pub last_solve_submissions: Vec<Submission>,
}

impl ProblemStatistics {
    pub fn new(problem_id: impl Into<String>) -> Self {
        Self {
            problem_id: problem_id.into(),
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.problem_id));
    }
}

/// One scoreboard cell: a team's history on one problem.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TeamProblemStatistics {
    pub problem_id: String,
    pub submissions: Vec<Submission>,
    pub is_submitted: bool,
    pub is_solved: bool,
    pub is_first_solved: bool,
    pub failed_count: u32,
    pub pending_count: u32,
    pub ignore_count: u32,
    pub total_count: u32,
    pub solved_timestamp: Option<i64>,
    pub last_submit_timestamp: Option<i64>,
    /// Seconds charged per failed attempt once solved.
    pub contest_penalty: i64,
}

impl TeamProblemStatistics {
    pub fn new(problem_id: impl Into<String>, contest_penalty: i64) -> Self {
        Self {
            problem_id: problem_id.into(),
            contest_penalty,
            ..Self::default()
        }
    }

    /// Unsolved with at least one submission still awaiting a verdict.
    pub fn is_pending(&self) -> bool {
        !self.is_solved && self.pending_count > 0
    }

    pub fn solved_timestamp_to_minute(&self) -> Option<i64> {
        self.solved_timestamp.map(|ts| ts.div_euclid(60))
    }

    /// Penalty in seconds: wrong attempts plus the solve time rounded down to
    /// the minute. Unsolved cells cost nothing.
    pub fn penalty(&self) -> i64 {
        match self.solved_timestamp_to_minute() {
            Some(minute) if self.is_solved => {
                i64::from(self.failed_count) * self.contest_penalty + minute * 60
            }
            _ => 0,
        }
    }

    pub fn penalty_in_minutes(&self) -> i64 {
        self.penalty().div_euclid(60)
    }
}
