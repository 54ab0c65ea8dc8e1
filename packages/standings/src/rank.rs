use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use common::{Contest, Outcome, PlaceChartPoint, ProblemStatistics, Submission, Team};

use crate::rank_options::RankOptions;
use crate::rank_statistics::RankStatistics;

/// One standings snapshot built by replaying a submission feed.
///
/// The roster and the feed are cloned at construction, so builds never touch
/// the caller's data and separate instances never observe each other.
#[derive(Clone, Debug)]
pub struct Rank {
    contest: Arc<Contest>,
    roster: Vec<Team>,
    /// Ranked board, filled by [`Rank::build`].
    teams: Vec<Team>,
    team_index: HashMap<String, usize>,
    /// Canonical replay order.
    submissions: Vec<Submission>,
    /// Parallel to `contest.problems`.
    problem_statistics: Vec<ProblemStatistics>,
    rank_statistics: RankStatistics,
    options: RankOptions,
}

impl Rank {
    pub fn new(contest: Arc<Contest>, teams: &[Team], submissions: &[Submission]) -> Self {
        let mut seen = HashSet::new();
        let roster: Vec<Team> = teams
            .iter()
            .filter(|t| {
                let fresh = seen.insert(t.id.as_str());
                if !fresh {
                    warn!(team_id = %t.id, "Duplicate team id, keeping the first entry");
                }
                fresh
            })
            .cloned()
            .collect();

        let mut submissions = submissions.to_vec();
        submissions.sort_by(Submission::compare);

        let problem_statistics = contest
            .problems
            .iter()
            .map(|p| ProblemStatistics::new(p.id.clone()))
            .collect();

        Self {
            contest,
            roster,
            teams: Vec::new(),
            team_index: HashMap::new(),
            submissions,
            problem_statistics,
            rank_statistics: RankStatistics::default(),
            options: RankOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RankOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RankOptions {
        &mut self.options
    }

    pub fn contest(&self) -> &Contest {
        &self.contest
    }

    /// Ranked teams of the last build.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.team_index.get(team_id).map(|&ix| &self.teams[ix])
    }

    /// Every submission in canonical order, filters not applied.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn problem_statistics(&self) -> &[ProblemStatistics] {
        &self.problem_statistics
    }

    pub fn problem_statistics_by_id(&self, problem_id: &str) -> Option<&ProblemStatistics> {
        self.contest
            .problem_index(problem_id)
            .map(|ix| &self.problem_statistics[ix])
    }

    pub fn rank_statistics(&self) -> &RankStatistics {
        &self.rank_statistics
    }

    /// The submissions a build replays: everything, or only those at or
    /// before the time-filter cutoff.
    pub fn filtered_submissions(&self) -> Cow<'_, [Submission]> {
        filter_submissions(&self.submissions, &self.options)
    }

    /// Replay the feed from scratch and rank the result.
    pub fn build(&mut self) -> &mut Self {
        let Self {
            contest,
            roster,
            teams,
            team_index,
            submissions,
            problem_statistics,
            rank_statistics,
            options,
        } = self;

        *teams = roster
            .iter()
            .filter(|t| !options.is_team_filtered(t))
            .cloned()
            .collect();
        for team in teams.iter_mut() {
            team.reset(&contest.problems, contest.penalty);
            team.place_chart_points.push(PlaceChartPoint {
                time_point: 0,
                rank: 1,
                last_solved_problem: None,
            });
        }
        *team_index = index_teams(teams);
        problem_statistics.iter_mut().for_each(ProblemStatistics::reset);

        let replay = filter_submissions(submissions, options);
        let mut order: Vec<usize> = (0..teams.len()).collect();
        let mut pre_minute = 0;

        for (ix, submission) in replay.iter().enumerate() {
            apply_submission(contest, teams, team_index, problem_statistics, submission);

            // Ranks only move when the minute advances, like a live board.
            let minute = submission.timestamp_to_minute();
            if minute > pre_minute || ix + 1 == replay.len() {
                refresh_ranks(teams, &mut order);
                for team in teams.iter_mut() {
                    team.place_chart_points.push(PlaceChartPoint {
                        time_point: minute,
                        rank: team.rank,
                        last_solved_problem: team.last_solved_problem.clone(),
                    });
                }
            }
            pre_minute = minute;
        }

        teams
            .iter_mut()
            .for_each(Team::post_process_place_chart_points);

        teams.iter_mut().for_each(Team::calc_solved_data);
        teams.sort_by(Team::compare);
        let identity: Vec<usize> = (0..teams.len()).collect();
        assign_ranks(teams, &identity);
        *team_index = index_teams(teams);

        build_organization_rank(contest, teams);
        rank_statistics.rebuild(teams, &contest.problems, problem_statistics);

        debug!(
            contest = %contest.name,
            teams = teams.len(),
            submissions = replay.len(),
            "Rank built"
        );

        self
    }

    /// Record a submission hidden by the freeze on its team's cell: one more
    /// pending attempt. Returns false when the team or problem is not on the
    /// board.
    pub(crate) fn mark_frozen_submission(&mut self, submission: &Submission) -> bool {
        let (Some(&team_ix), Some(problem_ix)) = (
            self.team_index.get(&submission.team_id),
            self.contest.problem_index(&submission.problem_id),
        ) else {
            return false;
        };

        let cell = &mut self.teams[team_ix].problem_statistics[problem_ix];
        cell.is_submitted = true;
        cell.pending_count += 1;
        cell.total_count += 1;
        if !cell.is_solved {
            cell.last_submit_timestamp = Some(submission.timestamp);
        }
        true
    }
}

fn filter_submissions<'a>(
    submissions: &'a [Submission],
    options: &RankOptions,
) -> Cow<'a, [Submission]> {
    if !options.enable_filter_submissions_by_timestamp {
        return Cow::Borrowed(submissions);
    }
    // a filtered slice of a sorted feed is still sorted
    Cow::Owned(
        submissions
            .iter()
            .filter(|s| options.is_submission_visible(s))
            .cloned()
            .collect(),
    )
}

fn index_teams(teams: &[Team]) -> HashMap<String, usize> {
    teams
        .iter()
        .enumerate()
        .map(|(ix, t)| (t.id.clone(), ix))
        .collect()
}

fn apply_submission(
    contest: &Contest,
    teams: &mut [Team],
    team_index: &HashMap<String, usize>,
    problem_statistics: &mut [ProblemStatistics],
    submission: &Submission,
) {
    let (Some(&team_ix), Some(problem_ix)) = (
        team_index.get(&submission.team_id),
        contest.problem_index(&submission.problem_id),
    ) else {
        debug!(
            submission_id = %submission.id,
            team_id = %submission.team_id,
            problem_id = %submission.problem_id,
            "Skipping submission for a team or problem not on the board"
        );
        return;
    };

    let team = &mut teams[team_ix];
    let problem = &mut problem_statistics[problem_ix];

    team.submissions.push(submission.clone());
    problem.submitted_num += 1;

    let cell = &mut team.problem_statistics[problem_ix];
    cell.submissions.push(submission.clone());

    let outcome = submission.outcome();
    if cell.is_solved || outcome == Outcome::Ignored {
        cell.ignore_count += 1;
        problem.ignore_num += 1;
        return;
    }

    cell.is_submitted = true;
    cell.last_submit_timestamp = Some(submission.timestamp);
    cell.total_count += 1;

    match outcome {
        Outcome::Accepted => {
            cell.is_solved = true;
            cell.solved_timestamp = Some(submission.timestamp);

            problem.accepted_num += 1;
            problem.attempted_num += cell.failed_count + 1;

            let first = problem
                .first_solve_submissions
                .last()
                .is_none_or(|prev| prev.timestamp == submission.timestamp);
            if first {
                cell.is_first_solved = true;
                problem.first_solve_submissions.push(submission.clone());
            }

            problem.last_solve_submissions.clear();
            problem.last_solve_submissions.push(submission.clone());

            team.last_solved_problem = Some(submission.problem_id.clone());
            team.last_solved_problem_timestamp = Some(submission.timestamp);
        }
        Outcome::Rejected => {
            cell.failed_count += 1;
            problem.rejected_num += 1;
        }
        Outcome::Pending => {
            cell.pending_count += 1;
            problem.pending_num += 1;
        }
        Outcome::Ignored => {}
    }
}

fn refresh_ranks(teams: &mut [Team], order: &mut [usize]) {
    teams.iter_mut().for_each(Team::calc_solved_data);
    order.sort_by(|&a, &b| Team::compare(&teams[a], &teams[b]));
    assign_ranks(teams, order);
}

/// Walk `order` (indices into `teams`, best first). Tied teams share the rank
/// of the first team of their run; the next team gets its 1-based position.
fn assign_ranks(teams: &mut [Team], order: &[usize]) {
    let mut prev: Option<usize> = None;
    for (pos, &ix) in order.iter().enumerate() {
        let rank = match prev {
            Some(p) if teams[ix].is_equal_rank(&teams[p]) => teams[p].rank,
            _ => pos + 1,
        };
        teams[ix].rank = rank;
        teams[ix].original_rank = pos + 1;
        prev = Some(ix);
    }
}

/// Rank the best team of each organization; later teams of a seen organization
/// are skipped.
fn build_organization_rank(contest: &Contest, teams: &mut [Team]) {
    if contest.organization.is_none() {
        return;
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut next = 1;
    let mut prev: Option<usize> = None;

    for ix in 0..teams.len() {
        if !seen.insert(teams[ix].organization.clone()) {
            continue;
        }

        let rank = match prev {
            Some(p) if teams[ix].is_equal_rank(&teams[p]) => teams[p].organization_rank,
            _ => Some(next),
        };
        next += 1;
        teams[ix].organization_rank = rank;
        prev = Some(ix);
    }
}
