use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use common::{Contest, Submission, Team, TeamProblemStatistics};

use crate::rank::Rank;
use crate::rank_options::RankOptions;

/// One reveal step of the ceremony.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolverOperation {
    /// Position in the reveal sequence.
    pub id: usize,
    pub team_id: String,
    /// Column index into the contest's problems.
    pub problem_ix: usize,
    pub before_team_problem_statistics: TeamProblemStatistics,
    pub after_team_problem_statistics: TeamProblemStatistics,
}

/// Frozen board, final board, and the reveal log leading from one to the
/// other.
#[derive(Clone, Debug)]
pub struct Resolver {
    frozen_rank: Rank,
    final_rank: Rank,
    operations: Vec<ResolverOperation>,
    before_freeze_submissions: Vec<Submission>,
    after_freeze_submissions: Vec<Submission>,
    resolved_teams: Vec<Team>,
}

impl Resolver {
    pub fn new(contest: Arc<Contest>, teams: &[Team], submissions: &[Submission]) -> Self {
        let mut submissions = submissions.to_vec();
        submissions.sort_by(Submission::compare);

        let (before_freeze_submissions, after_freeze_submissions) =
            split_at_freeze(&contest, &submissions);

        Self {
            frozen_rank: Rank::new(Arc::clone(&contest), teams, &before_freeze_submissions),
            final_rank: Rank::new(contest, teams, &submissions),
            operations: Vec::new(),
            before_freeze_submissions,
            after_freeze_submissions,
            resolved_teams: Vec::new(),
        }
    }

    /// Apply the same filters to the frozen and the final board. Submissions
    /// past the time-filter cutoff leave both halves of the split, so the
    /// frozen board never marks an attempt the final board does not replay.
    pub fn with_options(mut self, options: RankOptions) -> Self {
        self.before_freeze_submissions
            .retain(|s| options.is_submission_visible(s));
        self.after_freeze_submissions
            .retain(|s| options.is_submission_visible(s));
        self.final_rank = self.final_rank.with_options(options.clone());
        self.frozen_rank = self.frozen_rank.with_options(options);
        self
    }

    /// The board as the public saw it during the freeze.
    pub fn frozen_rank(&self) -> &Rank {
        &self.frozen_rank
    }

    pub fn final_rank(&self) -> &Rank {
        &self.final_rank
    }

    pub fn operations(&self) -> &[ResolverOperation] {
        &self.operations
    }

    pub fn before_freeze_submissions(&self) -> &[Submission] {
        &self.before_freeze_submissions
    }

    pub fn after_freeze_submissions(&self) -> &[Submission] {
        &self.after_freeze_submissions
    }

    /// Board order after every operation has been applied.
    pub fn resolved_teams(&self) -> &[Team] {
        &self.resolved_teams
    }

    /// Build both boards and derive the reveal sequence.
    pub fn build(&mut self) -> &mut Self {
        self.frozen_rank.build();
        self.final_rank.build();
        self.operations.clear();

        for submission in &self.after_freeze_submissions {
            if !self.frozen_rank.mark_frozen_submission(submission) {
                debug!(
                    submission_id = %submission.id,
                    team_id = %submission.team_id,
                    "Frozen submission for a team or problem not on the board"
                );
            }
        }

        self.reveal();

        debug!(
            operations = self.operations.len(),
            frozen = self.after_freeze_submissions.len(),
            "Resolver built"
        );
        self
    }

    /// Walk the frozen board bottom-up. The team at the cursor reveals its
    /// first pending column, climbs to its new place, and the cursor stays
    /// put until the team sitting there has nothing left to reveal.
    fn reveal(&mut self) {
        let mut teams: Vec<Team> = self.frozen_rank.teams().to_vec();
        let mut revealed: HashSet<(String, usize)> = HashSet::new();
        let mut cursor = teams.len();

        while cursor > 0 {
            let i = cursor - 1;
            let team_id = teams[i].id.clone();

            let next = teams[i]
                .problem_statistics
                .iter()
                .enumerate()
                .position(|(ix, ps)| ps.is_pending() && !revealed.contains(&(team_id.clone(), ix)));

            let mut progressed = false;
            if let Some(problem_ix) = next {
                revealed.insert((team_id.clone(), problem_ix));

                let before = self
                    .frozen_rank
                    .team(&team_id)
                    .and_then(|t| t.problem_statistics.get(problem_ix))
                    .cloned();
                let after = self
                    .final_rank
                    .team(&team_id)
                    .and_then(|t| t.problem_statistics.get(problem_ix))
                    .cloned();

                match (before, after) {
                    (Some(before), Some(after)) => {
                        teams[i].problem_statistics[problem_ix] = after.clone();
                        teams[i].calc_solved_data();

                        self.operations.push(ResolverOperation {
                            id: self.operations.len(),
                            team_id,
                            problem_ix,
                            before_team_problem_statistics: before,
                            after_team_problem_statistics: after,
                        });

                        let mut j = i;
                        while j > 0 && Team::compare(&teams[j], &teams[j - 1]).is_lt() {
                            teams.swap(j, j - 1);
                            j -= 1;
                        }
                    }
                    _ => warn!(%team_id, problem_ix, "Team missing from the final board"),
                }
                progressed = true;
            }

            if !progressed {
                cursor -= 1;
            }
        }

        self.resolved_teams = teams;
    }
}

/// Split a sorted feed at the freeze boundary. A submission exactly on the
/// boundary is frozen; with no freeze the second half is empty.
fn split_at_freeze(
    contest: &Contest,
    submissions: &[Submission],
) -> (Vec<Submission>, Vec<Submission>) {
    if contest.freeze_duration <= 0 {
        return (submissions.to_vec(), Vec::new());
    }

    let boundary = contest.unfrozen_duration;
    let ix = submissions.partition_point(|s| s.timestamp < boundary);
    (submissions[..ix].to_vec(), submissions[ix..].to_vec())
}
