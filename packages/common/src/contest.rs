use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{BoardError, Result};
use crate::group::{Group, build_groups};
use crate::problem::{BalloonColor, Problem, ProblemDocument, problems_from_labels};
use crate::time::{parse_instant, parse_seconds};

/// Default penalty per wrong attempt: 20 minutes.
pub const DEFAULT_PENALTY: i64 = 20 * 60;

/// Which verdict times the board shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTimeDisplay {
    pub correct: bool,
    pub incorrect: bool,
    pub pending: bool,
}

impl Default for StatusTimeDisplay {
    fn default() -> Self {
        Self {
            correct: true,
            incorrect: true,
            pending: true,
        }
    }
}

/// Logo or banner reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: Option<String>,
    pub base64: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub preset: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContestState {
    Pending,
    Running,
    Frozen,
    Finished,
}

/// Raw `config.json` contest document.
#[derive(Clone, Debug, Deserialize)]
pub struct ContestDocument {
    pub contest_name: Option<String>,
    pub start_time: Option<Value>,
    pub end_time: Option<Value>,
    /// Absolute freeze instant. Wins over `frozen_time`.
    pub freeze_time: Option<Value>,
    /// Frozen duration in seconds.
    pub frozen_time: Option<Value>,
    pub penalty: Option<Value>,
    pub problems: Option<Vec<ProblemDocument>>,
    pub problem_id: Option<Vec<String>>,
    pub balloon_color: Option<Vec<BalloonColor>>,
    pub organization: Option<String>,
    pub status_time_display: Option<HashMap<String, bool>>,
    pub badge: Option<String>,
    pub medal: Option<BTreeMap<String, BTreeMap<String, u32>>>,
    pub group: Option<BTreeMap<String, String>>,
    pub tag: Option<BTreeMap<String, String>>,
    pub logo: Option<Image>,
    pub banner: Option<Image>,
    pub board_link: Option<String>,
    pub version: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Contest {
    pub name: String,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub freeze_time: DateTime<Utc>,

    /// Seconds.
    pub total_duration: i64,
    pub freeze_duration: i64,
    /// Seconds from start until the freeze; `total_duration - freeze_duration`.
    pub unfrozen_duration: i64,

    /// Seconds per wrong attempt.
    pub penalty: i64,

    /// Display order.
    pub problems: Vec<Problem>,
    #[serde(skip)]
    problem_index: HashMap<String, usize>,

    pub status_time_display: StatusTimeDisplay,

    pub badge: Option<String>,
    pub medal: Option<BTreeMap<String, BTreeMap<String, u32>>>,
    /// Label of the organization column; organization ranks are only computed
    /// when set.
    pub organization: Option<String>,

    pub groups: BTreeMap<String, Group>,
    pub tags: BTreeMap<String, String>,

    pub logo: Option<Image>,
    pub banner: Option<Image>,
    pub board_link: Option<String>,
}

impl Contest {
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: ContestDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    pub fn from_document(doc: ContestDocument) -> Result<Self> {
        let start_time = parse_instant(
            "start_time",
            doc.start_time
                .as_ref()
                .ok_or(BoardError::MissingField("start_time"))?,
        )?;
        let end_time = parse_instant(
            "end_time",
            doc.end_time
                .as_ref()
                .ok_or(BoardError::MissingField("end_time"))?,
        )?;
        let total_duration = (end_time - start_time).num_seconds();

        let mut freeze_time = end_time;
        let mut freeze_duration = 0;

        if let Some(v) = doc.frozen_time.as_ref().filter(|v| !v.is_null()) {
            freeze_duration = parse_seconds("frozen_time", v)?;
            freeze_time = end_time - chrono::Duration::seconds(freeze_duration);
        }

        if let Some(v) = doc.freeze_time.as_ref().filter(|v| !v.is_null()) {
            freeze_time = parse_instant("freeze_time", v)?;
            freeze_duration = (end_time - freeze_time).num_seconds();
        }

        if freeze_duration < 0 || freeze_duration > total_duration {
            warn!(
                freeze_duration,
                total_duration, "Freeze window lies outside the contest"
            );
        }

        let penalty = match doc.penalty.as_ref().filter(|v| !v.is_null()) {
            Some(v) => parse_seconds("penalty", v)?,
            None => DEFAULT_PENALTY,
        };

        let problems = match (doc.problems, doc.problem_id) {
            (Some(list), _) => list
                .into_iter()
                .map(ProblemDocument::into_problem)
                .collect::<Result<Vec<_>>>()?,
            (None, Some(labels)) => problems_from_labels(&labels, doc.balloon_color.as_deref()),
            (None, None) => Vec::new(),
        };
        let problem_index = index_problems(&problems);

        let status_time_display = doc
            .status_time_display
            .map(|flags| {
                let flag = |k: &str| flags.get(k).copied().unwrap_or(false);
                StatusTimeDisplay {
                    correct: flag("correct"),
                    incorrect: flag("incorrect"),
                    pending: flag("pending"),
                }
            })
            .unwrap_or_default();

        Ok(Self {
            name: doc.contest_name.unwrap_or_default(),
            start_time,
            end_time,
            freeze_time,
            total_duration,
            freeze_duration,
            unfrozen_duration: total_duration - freeze_duration,
            penalty,
            problems,
            problem_index,
            status_time_display,
            badge: doc.badge,
            medal: doc.medal,
            organization: doc.organization,
            groups: build_groups(&doc.group.unwrap_or_default()),
            tags: doc.tag.unwrap_or_default(),
            logo: doc.logo,
            banner: doc.banner,
            board_link: doc.board_link,
        })
    }

    /// Position of a problem column by id.
    pub fn problem_index(&self, problem_id: &str) -> Option<usize> {
        self.problem_index.get(problem_id).copied()
    }

    pub fn problem(&self, problem_id: &str) -> Option<&Problem> {
        self.problem_index(problem_id).map(|ix| &self.problems[ix])
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> ContestState {
        if now < self.start_time {
            ContestState::Pending
        } else if now >= self.end_time {
            ContestState::Finished
        } else if now >= self.freeze_time {
            ContestState::Frozen
        } else {
            ContestState::Running
        }
    }

    /// Seconds until the start; zero once started.
    pub fn pending_seconds_at(&self, now: DateTime<Utc>) -> i64 {
        (self.start_time - now).num_seconds().max(0)
    }

    pub fn elapsed_seconds_at(&self, now: DateTime<Utc>) -> i64 {
        (self.clamp(now) - self.start_time).num_seconds()
    }

    pub fn remaining_seconds_at(&self, now: DateTime<Utc>) -> i64 {
        (self.end_time - self.clamp(now)).num_seconds()
    }

    /// Percentage of the contest elapsed, 0..=100.
    pub fn progress_ratio_at(&self, now: DateTime<Utc>) -> u32 {
        if now <= self.start_time {
            return 0;
        }
        if now >= self.end_time || self.total_duration <= 0 {
            return 100;
        }
        let pass = (now - self.start_time).num_seconds();
        ((pass * 100) as f64 / self.total_duration as f64).round() as u32
    }

    fn clamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.max(self.start_time).min(self.end_time)
    }
}

fn index_problems(problems: &[Problem]) -> HashMap<String, usize> {
    problems
        .iter()
        .enumerate()
        .map(|(ix, p)| (p.id.clone(), ix))
        .collect()
}
