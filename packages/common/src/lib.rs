//! Entity model of a contest scoreboard and parsers for its input documents.

pub mod contest;
pub mod error;
pub mod group;
pub mod problem;
pub mod submission;
pub mod submission_status;
pub mod team;
pub mod time;
pub mod value;

pub use contest::{Contest, ContestState};
pub use error::{BoardError, Result};
pub use group::{ALL_GROUP, Group};
pub use problem::{Problem, ProblemStatistics, TeamProblemStatistics};
pub use submission::{Submission, parse_submissions};
pub use submission_status::{Outcome, SubmissionStatus};
pub use team::{PlaceChartPoint, Team, parse_teams};
