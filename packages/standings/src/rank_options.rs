use serde::{Deserialize, Serialize};

use common::{ALL_GROUP, Contest, Submission, Team};

/// Filters attached to a single [`Rank`](crate::Rank) instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    pub enable_filter_submissions_by_timestamp: bool,
    /// Share of the contest to replay, in hundredths of a percent (0..=10000).
    pub width: u32,
    /// Cutoff in seconds since start derived from `width`.
    pub timestamp: i64,

    pub enable_filter_teams_by_group: bool,
    pub group: String,
}

impl RankOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay only the first `width / 10000` of the contest.
    pub fn set_width(&mut self, width: u32, contest: &Contest) {
        let width = width.min(10_000);
        self.width = width;
        self.timestamp = (contest.total_duration * i64::from(width) + 5_000).div_euclid(10_000);
        self.enable_filter_submissions_by_timestamp = true;
    }

    pub fn disable_filter_submissions_by_timestamp(&mut self) {
        self.enable_filter_submissions_by_timestamp = false;
    }

    /// Restrict the board to one group. Selecting `all` disables the filter.
    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = group.into();
        self.enable_filter_teams_by_group = !self.group.is_empty() && self.group != ALL_GROUP;
    }

    pub fn disable_filter_teams_by_group(&mut self) {
        self.enable_filter_teams_by_group = false;
    }

    /// True when the team is excluded from the board.
    pub fn is_team_filtered(&self, team: &Team) -> bool {
        self.enable_filter_teams_by_group && !team.belongs_to(&self.group)
    }

    pub fn is_submission_visible(&self, submission: &Submission) -> bool {
        !self.enable_filter_submissions_by_timestamp || submission.timestamp <= self.timestamp
    }
}
