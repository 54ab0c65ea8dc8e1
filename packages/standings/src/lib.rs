//! Standings builder and freeze resolver.
//!
//! A [`Rank`] replays a submission feed against a team roster and produces the
//! ranked board. A [`Resolver`] builds a frozen and a final board and derives
//! the ordered reveal sequence between them.

pub mod rank;
pub mod rank_options;
pub mod rank_statistics;
pub mod resolver;

pub use rank::Rank;
pub use rank_options::RankOptions;
pub use rank_statistics::{ProblemSolvedCount, RankStatistics};
pub use resolver::{Resolver, ResolverOperation};
