use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verdict attached to a submission in the event feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SubmissionStatus {
    /// Submitted, no verdict yet.
    Pending,
    /// Queued for a judge.
    Waiting,
    /// Being judged right now.
    Judging,
    /// Verdict hidden by the scoreboard freeze.
    Frozen,
    Accepted,
    /// Feed-level alias of `Accepted`.
    Correct,
    /// Feed-level catch-all for a failed attempt.
    Incorrect,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    OutputLimitExceeded,
    RuntimeError,
    PresentationError,
    CompilationError,
    SystemError,
    Canceled,
    Skipped,
    Unknown,
}

/// How a submission affects scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Solves the problem.
    Accepted,
    /// Counts as a wrong attempt against the penalty.
    Rejected,
    /// No verdict yet; may still become either of the above.
    Pending,
    /// Never scored (compile errors, judge failures, cancelled runs).
    Ignored,
}

impl SubmissionStatus {
    /// Scoring outcome of this status.
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Accepted | Self::Correct => Outcome::Accepted,
            Self::Pending | Self::Waiting | Self::Judging | Self::Frozen => Outcome::Pending,
            Self::CompilationError
            | Self::SystemError
            | Self::Canceled
            | Self::Skipped
            | Self::Unknown => Outcome::Ignored,
            Self::Incorrect
            | Self::WrongAnswer
            | Self::TimeLimitExceeded
            | Self::MemoryLimitExceeded
            | Self::OutputLimitExceeded
            | Self::RuntimeError
            | Self::PresentationError => Outcome::Rejected,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome() == Outcome::Accepted
    }

    pub fn is_rejected(&self) -> bool {
        self.outcome() == Outcome::Rejected
    }

    pub fn is_pending(&self) -> bool {
        self.outcome() == Outcome::Pending
    }

    /// Statuses that never count towards the penalty.
    pub fn is_not_calculated_penalty(&self) -> bool {
        self.outcome() == Outcome::Ignored
    }

    /// All possible status values.
    pub const ALL: &'static [SubmissionStatus] = &[
        Self::Pending,
        Self::Waiting,
        Self::Judging,
        Self::Frozen,
        Self::Accepted,
        Self::Correct,
        Self::Incorrect,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::OutputLimitExceeded,
        Self::RuntimeError,
        Self::PresentationError,
        Self::CompilationError,
        Self::SystemError,
        Self::Canceled,
        Self::Skipped,
        Self::Unknown,
    ];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Waiting => "Waiting",
            Self::Judging => "Judging",
            Self::Frozen => "Frozen",
            Self::Accepted => "Accepted",
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
            Self::WrongAnswer => "WrongAnswer",
            Self::TimeLimitExceeded => "TimeLimitExceeded",
            Self::MemoryLimitExceeded => "MemoryLimitExceeded",
            Self::OutputLimitExceeded => "OutputLimitExceeded",
            Self::RuntimeError => "RuntimeError",
            Self::PresentationError => "PresentationError",
            Self::CompilationError => "CompilationError",
            Self::SystemError => "SystemError",
            Self::Canceled => "Canceled",
            Self::Skipped => "Skipped",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            SubmissionStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    /// Feeds spell verdicts many ways ("correct", "WRONG_ANSWER", "Time Limit
    /// Exceeded", "TLE"), so case, spaces, `_` and `-` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "pending" | "queued" => Ok(Self::Pending),
            "waiting" => Ok(Self::Waiting),
            "judging" | "running" | "compiling" => Ok(Self::Judging),
            "frozen" => Ok(Self::Frozen),
            "accepted" | "ac" | "ok" => Ok(Self::Accepted),
            "correct" | "yes" => Ok(Self::Correct),
            "incorrect" | "rejected" | "no" | "nooutput" | "partiallycorrect" | "hacked" => {
                Ok(Self::Incorrect)
            }
            "wronganswer" | "wa" => Ok(Self::WrongAnswer),
            "timelimitexceeded" | "tle" | "idlenesslimitexceeded" => Ok(Self::TimeLimitExceeded),
            "memorylimitexceeded" | "mle" => Ok(Self::MemoryLimitExceeded),
            "outputlimitexceeded" | "ole" => Ok(Self::OutputLimitExceeded),
            "runtimeerror" | "re" | "rte" | "securityviolation" => Ok(Self::RuntimeError),
            "presentationerror" | "pe" => Ok(Self::PresentationError),
            "compilationerror" | "compileerror" | "ce" => Ok(Self::CompilationError),
            "systemerror" | "se" | "judgementfailed" => Ok(Self::SystemError),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            "skipped" => Ok(Self::Skipped),
            "unknown" | "undefined" => Ok(Self::Unknown),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}
