use std::sync::Arc;

use serde_json::json;

use common::{Contest, Submission, SubmissionStatus, Team};

/// Contest of `minutes` length with `frozen_minutes` frozen and one problem per label.
pub fn contest(minutes: i64, frozen_minutes: i64, labels: &[&str]) -> Arc<Contest> {
    let doc = json!({
        "contest_name": "Integration",
        "start_time": "2024-05-01T09:00:00Z",
        "end_time": 1_714_554_000 + minutes * 60,
        "frozen_time": frozen_minutes * 60,
        "penalty": 1200,
        "problem_id": labels,
        "organization": "School",
    });
    Arc::new(Contest::from_json(&doc.to_string()).unwrap())
}

pub fn teams(ids: &[&str]) -> Vec<Team> {
    ids.iter()
        .map(|id| Team::new(*id, format!("Team {id}")).with_organization(format!("Org {id}")))
        .collect()
}

/// Feed builder that assigns feed positions in call order.
#[derive(Default)]
pub struct Feed {
    submissions: Vec<Submission>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, team: &str, problem: usize, minute: i64, status: SubmissionStatus) -> Self {
        let seq = self.submissions.len();
        let mut s = Submission::new(
            format!("s{seq}"),
            team,
            problem.to_string(),
            minute * 60,
            status,
        );
        s.seq = seq;
        self.submissions.push(s);
        self
    }

    pub fn build(self) -> Vec<Submission> {
        self.submissions
    }
}

/// Deterministic pseudo-random feed for property checks.
pub fn scrambled_feed(team_ids: &[&str], problems: usize, count: usize, minutes: i64) -> Vec<Submission> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let statuses = [
        SubmissionStatus::Accepted,
        SubmissionStatus::WrongAnswer,
        SubmissionStatus::TimeLimitExceeded,
        SubmissionStatus::CompilationError,
        SubmissionStatus::Pending,
    ];

    let mut feed = Feed::new();
    for _ in 0..count {
        let team = team_ids[(next() % team_ids.len() as u64) as usize];
        let problem = (next() % problems as u64) as usize;
        let minute = (next() % minutes as u64) as i64;
        let status = statuses[(next() % statuses.len() as u64) as usize];
        feed = feed.push(team, problem, minute, status);
    }
    feed.build()
}
