use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BoardError, Result};
use crate::problem::{Problem, TeamProblemStatistics};
use crate::submission::Submission;
use crate::value::{id_from_value, string_list};

/// One sample of a team's rank over contest time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaceChartPoint {
    /// Minutes since contest start.
    pub time_point: i64,
    pub rank: usize,
    pub last_solved_problem: Option<String>,
}

/// A team and, after a standings build, everything derived for it.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub organization: String,
    pub groups: Vec<String>,
    pub members: Vec<String>,
    pub coach: Option<String>,
    pub location: Option<String>,

    pub rank: usize,
    /// Plain 1-based position, ties not collapsed.
    pub original_rank: usize,
    pub organization_rank: Option<usize>,
    pub solved_problem_num: usize,
    /// Seconds.
    pub penalty: i64,
    pub last_solved_problem: Option<String>,
    pub last_solved_problem_timestamp: Option<i64>,
    pub place_chart_points: Vec<PlaceChartPoint>,
    /// Same order as the contest's problems.
    pub problem_statistics: Vec<TeamProblemStatistics>,
    pub submissions: Vec<Submission>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn belongs_to(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Clear all derived state and allocate one empty cell per problem.
    pub fn reset(&mut self, problems: &[Problem], contest_penalty: i64) {
        self.rank = 0;
        self.original_rank = 0;
        self.organization_rank = None;
        self.solved_problem_num = 0;
        self.penalty = 0;
        self.last_solved_problem = None;
        self.last_solved_problem_timestamp = None;
        self.place_chart_points.clear();
        self.submissions.clear();
        self.problem_statistics = problems
            .iter()
            .map(|p| TeamProblemStatistics::new(p.id.clone(), contest_penalty))
            .collect();
    }

    pub fn problem_statistics_by_id(&self, problem_id: &str) -> Option<&TeamProblemStatistics> {
        self.problem_statistics
            .iter()
            .find(|ps| ps.problem_id == problem_id)
    }

    /// Recompute solved count and penalty from the problem cells.
    pub fn calc_solved_data(&mut self) {
        self.solved_problem_num = 0;
        self.penalty = 0;
        for ps in self.problem_statistics.iter().filter(|ps| ps.is_solved) {
            self.solved_problem_num += 1;
            self.penalty += ps.penalty();
        }
    }

    pub fn penalty_in_minutes(&self) -> i64 {
        self.penalty.div_euclid(60)
    }

    /// Teams that share solved count and penalty share a displayed rank.
    pub fn is_equal_rank(&self, other: &Team) -> bool {
        self.solved_problem_num == other.solved_problem_num && self.penalty == other.penalty
    }

    /// Scoreboard order: more solved first, then less penalty, then team id so
    /// the order is total.
    pub fn compare(lhs: &Team, rhs: &Team) -> Ordering {
        rhs.solved_problem_num
            .cmp(&lhs.solved_problem_num)
            .then_with(|| lhs.penalty.cmp(&rhs.penalty))
            .then_with(|| lhs.id.cmp(&rhs.id))
    }

    /// Drop samples that repeat the previous kept one. The first and the last
    /// sample always survive.
    pub fn post_process_place_chart_points(&mut self) {
        let points = std::mem::take(&mut self.place_chart_points);
        let last_ix = points.len().saturating_sub(1);
        let mut kept: Vec<PlaceChartPoint> = Vec::with_capacity(points.len());

        for (ix, point) in points.into_iter().enumerate() {
            let repeats = kept.last().is_some_and(|prev| {
                prev.rank == point.rank && prev.last_solved_problem == point.last_solved_problem
            });
            if ix == 0 || ix == last_ix || !repeats {
                kept.push(point);
            }
        }

        self.place_chart_points = kept;
    }
}

/// Raw team entry of `team.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct TeamDocument {
    pub team_id: Option<Value>,
    #[serde(alias = "team_name")]
    pub name: Option<String>,
    #[serde(alias = "school")]
    pub organization: Option<String>,
    pub group: Option<Value>,
    pub members: Option<Value>,
    pub coach: Option<Value>,
    pub location: Option<String>,
}

impl TeamDocument {
    fn into_team(self, id: String) -> Team {
        let groups = string_list(self.group.as_ref())
            .into_iter()
            .map(|g| if g == "girls" { "girl".to_string() } else { g })
            .collect();
        let coach = string_list(self.coach.as_ref());

        Team {
            id,
            name: self.name.unwrap_or_default(),
            organization: self.organization.unwrap_or_default(),
            groups,
            members: string_list(self.members.as_ref()),
            coach: (!coach.is_empty()).then(|| coach.join(", ")),
            location: self.location,
            ..Team::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TeamsDocument {
    Map(BTreeMap<String, TeamDocument>),
    List(Vec<TeamDocument>),
}

/// Parse a team document: either `{ "<id>": {...} }` or a list of objects
/// carrying `team_id`.
pub fn parse_teams(json: &str) -> Result<Vec<Team>> {
    match serde_json::from_str::<TeamsDocument>(json)? {
        TeamsDocument::Map(map) => Ok(map
            .into_iter()
            .map(|(id, doc)| doc.into_team(id))
            .collect()),
        TeamsDocument::List(list) => list
            .into_iter()
            .map(|doc| {
                let id = match &doc.team_id {
                    Some(v) => id_from_value("team_id", v)?,
                    None => return Err(BoardError::MissingField("team_id")),
                };
                Ok(doc.into_team(id))
            })
            .collect(),
    }
}
