use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{BoardError, Result};
use crate::submission_status::{Outcome, SubmissionStatus};
use crate::time::parse_seconds;
use crate::value::id_from_value;

/// One judged (or not yet judged) submission from the event feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub id: String,
    /// Position in the feed. Breaks timestamp ties so replays are deterministic.
    pub seq: usize,
    pub team_id: String,
    pub problem_id: String,
    /// Seconds since contest start.
    pub timestamp: i64,
    pub status: SubmissionStatus,
    /// Feed-level override that makes the submission non-scoring.
    pub is_ignore: bool,
    pub language: Option<String>,
}

impl Submission {
    pub fn new(
        id: impl Into<String>,
        team_id: impl Into<String>,
        problem_id: impl Into<String>,
        timestamp: i64,
        status: SubmissionStatus,
    ) -> Self {
        Self {
            id: id.into(),
            seq: 0,
            team_id: team_id.into(),
            problem_id: problem_id.into(),
            timestamp,
            status,
            is_ignore: false,
            language: None,
        }
    }

    /// Minute bucket used for rank refresh batching.
    pub fn timestamp_to_minute(&self) -> i64 {
        self.timestamp.div_euclid(60)
    }

    pub fn outcome(&self) -> Outcome {
        if self.is_ignore {
            Outcome::Ignored
        } else {
            self.status.outcome()
        }
    }

    /// Canonical replay order: timestamp, then feed position.
    pub fn compare(lhs: &Submission, rhs: &Submission) -> Ordering {
        lhs.timestamp
            .cmp(&rhs.timestamp)
            .then_with(|| lhs.seq.cmp(&rhs.seq))
    }
}

/// Raw submission record as found in `run.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct SubmissionDocument {
    pub submission_id: Option<Value>,
    pub team_id: Option<Value>,
    pub problem_id: Option<Value>,
    pub timestamp: Option<Value>,
    pub status: Option<String>,
    pub is_ignore: Option<bool>,
    pub language: Option<String>,
}

impl SubmissionDocument {
    fn into_submission(self, seq: usize) -> Result<Submission> {
        let id = match &self.submission_id {
            Some(v) if !v.is_null() => id_from_value("submission_id", v)?,
            _ => seq.to_string(),
        };
        let team_id = id_from_value("team_id", &self.team_id.unwrap_or(Value::Null))?;
        let problem_id = id_from_value("problem_id", &self.problem_id.unwrap_or(Value::Null))?;
        let timestamp = match &self.timestamp {
            Some(v) => parse_seconds("timestamp", v)?,
            None => return Err(BoardError::MissingField("timestamp")),
        };
        let raw = self.status.ok_or(BoardError::MissingField("status"))?;
        let status = raw.parse::<SubmissionStatus>().unwrap_or_else(|err| {
            warn!(submission_id = %id, %err, "Unrecognised status, scoring as unknown");
            SubmissionStatus::Unknown
        });

        Ok(Submission {
            id,
            seq,
            team_id,
            problem_id,
            timestamp,
            status,
            is_ignore: self.is_ignore.unwrap_or(false),
            language: self.language,
        })
    }
}

/// Parse a submission document. Feed order is kept in `seq`; callers sort with
/// [`Submission::compare`] when they need replay order.
pub fn parse_submissions(json: &str) -> Result<Vec<Submission>> {
    let docs: Vec<SubmissionDocument> = serde_json::from_str(json)?;
    docs.into_iter()
        .enumerate()
        .map(|(seq, doc)| doc.into_submission(seq))
        .collect()
}
