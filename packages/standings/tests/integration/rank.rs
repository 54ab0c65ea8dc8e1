use std::sync::Arc;

use common::SubmissionStatus::{Accepted, CompilationError, Pending, WrongAnswer};
use standings::{Rank, RankOptions};

use crate::fixtures::{Feed, contest, scrambled_feed, teams};

const TEAM_IDS: &[&str] = &["t01", "t02", "t03", "t04", "t05", "t06", "t07", "t08"];

fn scrambled_rank() -> Rank {
    let c = contest(300, 60, &["A", "B", "C", "D", "E"]);
    let feed = scrambled_feed(TEAM_IDS, 5, 400, 300);
    let mut rank = Rank::new(c, &teams(TEAM_IDS), &feed);
    rank.build();
    rank
}

mod scoring {
    use super::*;

    #[test]
    fn two_problem_example() {
        let c = contest(180, 0, &["A", "B"]);
        let feed = Feed::new()
            .push("t1", 0, 10, WrongAnswer)
            .push("t1", 0, 15, Accepted)
            .push("t1", 1, 5, Accepted)
            .build();

        let mut rank = Rank::new(c, &teams(&["t1"]), &feed);
        rank.build();

        let t1 = rank.team("t1").unwrap();
        assert_eq!(t1.solved_problem_num, 2);
        assert_eq!(t1.penalty_in_minutes(), 40);
        assert_eq!(t1.rank, 1);
        assert_eq!(rank.problem_statistics_by_id("0").unwrap().accepted_num, 1);
    }

    #[test]
    fn compile_errors_cost_nothing() {
        let c = contest(180, 0, &["A"]);
        let feed = Feed::new()
            .push("a", 0, 1, CompilationError)
            .push("a", 0, 2, Accepted)
            .push("b", 0, 2, Accepted)
            .build();

        let mut rank = Rank::new(c, &teams(&["a", "b"]), &feed);
        rank.build();

        let a = rank.team("a").unwrap();
        let b = rank.team("b").unwrap();
        assert_eq!(a.penalty, b.penalty);
        assert_eq!(a.rank, b.rank);
        assert_eq!(rank.problem_statistics()[0].attempted_num, 2);
    }

    #[test]
    fn pending_cells_stay_unsolved() {
        let c = contest(180, 0, &["A"]);
        let feed = Feed::new().push("a", 0, 30, Pending).build();

        let mut rank = Rank::new(c, &teams(&["a"]), &feed);
        rank.build();

        let cell = &rank.team("a").unwrap().problem_statistics[0];
        assert!(cell.is_pending());
        assert!(cell.is_submitted);
        assert_eq!(cell.last_submit_timestamp, Some(30 * 60));
        assert_eq!(rank.problem_statistics()[0].pending_num, 1);
    }
}

mod properties {
    use super::*;

    #[test]
    fn builds_are_deterministic() {
        let c = contest(300, 60, &["A", "B", "C", "D", "E"]);
        let feed = scrambled_feed(TEAM_IDS, 5, 400, 300);
        let mut first = Rank::new(Arc::clone(&c), &teams(TEAM_IDS), &feed);
        let mut second = Rank::new(c, &teams(TEAM_IDS), &feed);
        first.build();
        second.build();

        let view = |r: &Rank| {
            r.teams()
                .iter()
                .map(|t| (t.id.clone(), t.rank, t.solved_problem_num, t.penalty))
                .collect::<Vec<_>>()
        };
        assert_eq!(view(&first), view(&second));
        assert_eq!(first.problem_statistics(), second.problem_statistics());
        assert_eq!(first.rank_statistics(), second.rank_statistics());
    }

    #[test]
    fn equal_score_means_equal_rank() {
        let rank = scrambled_rank();
        let teams = rank.teams();

        for a in teams {
            for b in teams {
                if a.is_equal_rank(b) {
                    assert_eq!(a.rank, b.rank, "{} vs {}", a.id, b.id);
                }
            }
        }
        for pair in teams.windows(2) {
            let (hi, lo) = (&pair[0], &pair[1]);
            assert!(
                hi.solved_problem_num > lo.solved_problem_num
                    || (hi.solved_problem_num == lo.solved_problem_num && hi.penalty <= lo.penalty)
            );
            if !hi.is_equal_rank(lo) {
                assert_eq!(lo.rank, lo.original_rank);
            }
            assert_eq!(lo.original_rank, hi.original_rank + 1);
        }
    }

    #[test]
    fn counters_are_conserved() {
        let rank = scrambled_rank();
        let total: u32 = rank
            .problem_statistics()
            .iter()
            .map(|p| {
                assert_eq!(
                    p.accepted_num + p.rejected_num + p.pending_num + p.ignore_num,
                    p.submitted_num
                );
                p.submitted_num
            })
            .sum();
        assert_eq!(total as usize, rank.submissions().len());
    }

    #[test]
    fn histogram_counts_every_team() {
        let rank = scrambled_rank();
        let stats = rank.rank_statistics();
        assert_eq!(stats.team_solved_num.len(), 6);
        assert_eq!(stats.team_count(), TEAM_IDS.len());

        let mut options = RankOptions::new();
        options.set_group("nobody");
        let c = contest(300, 60, &["A", "B", "C", "D", "E"]);
        let mut empty = Rank::new(c, &teams(TEAM_IDS), rank.submissions()).with_options(options);
        empty.build();
        assert_eq!(empty.rank_statistics().team_count(), 0);
    }

    #[test]
    fn place_chart_ends_on_final_rank() {
        let rank = scrambled_rank();
        for team in rank.teams() {
            let first = team.place_chart_points.first().unwrap();
            let last = team.place_chart_points.last().unwrap();
            assert_eq!((first.time_point, first.rank), (0, 1));
            assert_eq!(last.rank, team.rank);
        }
    }
}

mod filters {
    use super::*;

    #[test]
    fn scrubbing_to_half_time_matches_a_truncated_feed() {
        let c = contest(300, 60, &["A", "B", "C", "D", "E"]);
        let feed = scrambled_feed(TEAM_IDS, 5, 400, 300);

        let mut options = RankOptions::new();
        options.set_width(5000, &c);
        let mut scrubbed = Rank::new(Arc::clone(&c), &teams(TEAM_IDS), &feed).with_options(options);
        scrubbed.build();

        let truncated: Vec<_> = feed
            .iter()
            .filter(|s| s.timestamp <= 150 * 60)
            .cloned()
            .collect();
        let mut reference = Rank::new(c, &teams(TEAM_IDS), &truncated);
        reference.build();

        let view = |r: &Rank| {
            r.teams()
                .iter()
                .map(|t| (t.id.clone(), t.rank, t.penalty))
                .collect::<Vec<_>>()
        };
        assert_eq!(view(&scrubbed), view(&reference));
        assert_eq!(scrubbed.filtered_submissions().len(), truncated.len());
    }

    #[test]
    fn group_filter_ranks_members_only() {
        let c = contest(180, 0, &["A"]);
        let mut roster = teams(&["a", "b", "c"]);
        roster[0].groups = vec!["official".into()];
        roster[2].groups = vec!["official".into()];
        let feed = Feed::new()
            .push("b", 0, 1, Accepted)
            .push("c", 0, 2, Accepted)
            .build();

        let mut options = RankOptions::new();
        options.set_group("official");
        let mut rank = Rank::new(c, &roster, &feed).with_options(options);
        rank.build();

        let ids: Vec<&str> = rank.teams().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(rank.team("c").unwrap().rank, 1);
        assert_eq!(rank.team("c").unwrap().organization_rank, Some(1));
    }
}
