use common::SubmissionStatus::{Accepted, Pending, WrongAnswer};
use standings::{RankOptions, Resolver};

use crate::fixtures::{Feed, contest, scrambled_feed, teams};

fn ids<'a>(teams: impl IntoIterator<Item = &'a common::Team>) -> Vec<&'a str> {
    teams.into_iter().map(|t| t.id.as_str()).collect()
}

/// Four teams, three problems, the last hour frozen. Every team has
/// something hidden by the freeze.
fn ceremony_feed() -> Vec<common::Submission> {
    Feed::new()
        .push("c", 0, 5, WrongAnswer)
        .push("a", 0, 10, Accepted)
        .push("b", 0, 15, Accepted)
        .push("a", 1, 20, Accepted)
        .push("c", 0, 25, Accepted)
        .push("d", 0, 122, Accepted)
        .push("d", 1, 124, Accepted)
        .push("b", 1, 125, WrongAnswer)
        .push("b", 2, 127, WrongAnswer)
        .push("d", 2, 133, WrongAnswer)
        .push("c", 1, 133, Accepted)
        .push("a", 2, 167, Accepted)
        .build()
}

mod freeze {
    use super::*;

    #[test]
    fn late_submission_is_hidden() {
        let c = contest(180, 30, &["A", "B"]);
        let feed = Feed::new()
            .push("t1", 0, 20, Accepted)
            .push("t2", 0, 170, Accepted)
            .build();

        let mut resolver = Resolver::new(c, &teams(&["t1", "t2"]), &feed);
        resolver.build();

        assert_eq!(resolver.before_freeze_submissions().len(), 1);
        assert_eq!(resolver.after_freeze_submissions().len(), 1);
        assert_eq!(resolver.after_freeze_submissions()[0].team_id, "t2");

        let frozen = resolver.frozen_rank().team("t2").unwrap();
        assert!(frozen.problem_statistics[0].is_pending());
        assert_eq!(frozen.solved_problem_num, 0);

        let ops = resolver.operations();
        assert_eq!(ops.len(), 1);
        assert!(ops[0].after_team_problem_statistics.is_solved);
        assert_eq!(resolver.final_rank().team("t2").unwrap().solved_problem_num, 1);
    }

    #[test]
    fn boundary_minute_belongs_to_the_freeze() {
        let c = contest(180, 30, &["A"]);
        let feed = Feed::new()
            .push("t1", 0, 149, WrongAnswer)
            .push("t1", 0, 150, Accepted)
            .build();

        let mut resolver = Resolver::new(c, &teams(&["t1"]), &feed);
        resolver.build();

        let seqs = |s: &[common::Submission]| s.iter().map(|s| s.seq).collect::<Vec<_>>();
        assert_eq!(seqs(resolver.before_freeze_submissions()), vec![0]);
        assert_eq!(seqs(resolver.after_freeze_submissions()), vec![1]);
        assert_eq!(
            resolver.before_freeze_submissions().len() + resolver.after_freeze_submissions().len(),
            feed.len()
        );
    }

    #[test]
    fn pending_before_the_freeze_stays_pending() {
        let c = contest(180, 30, &["A"]);
        let feed = Feed::new().push("t1", 0, 60, Pending).build();

        let mut resolver = Resolver::new(c, &teams(&["t1"]), &feed);
        resolver.build();

        // the pending verdict never resolves, so the reveal changes nothing
        // but must still terminate
        let ops = resolver.operations();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].before_team_problem_statistics, ops[0].after_team_problem_statistics);
        assert!(ops[0].after_team_problem_statistics.is_pending());
    }
}

mod time_filter {
    use super::*;

    fn late_feed() -> Vec<common::Submission> {
        Feed::new()
            .push("t1", 0, 20, Accepted)
            .push("t2", 0, 130, WrongAnswer)
            .push("t2", 0, 170, Accepted)
            .build()
    }

    #[test]
    fn cutoff_before_the_freeze_hides_nothing_to_reveal() {
        let c = contest(180, 60, &["A"]);
        let mut options = RankOptions::new();
        options.set_width(5000, &c);

        let mut resolver = Resolver::new(c, &teams(&["t1", "t2"]), &late_feed()).with_options(options);
        resolver.build();

        assert!(resolver.after_freeze_submissions().is_empty());
        assert!(resolver.operations().is_empty());
        assert!(!resolver.frozen_rank().team("t2").unwrap().problem_statistics[0].is_submitted);
    }

    #[test]
    fn reveals_stop_at_the_cutoff() {
        let c = contest(180, 60, &["A"]);
        let mut options = RankOptions::new();
        // 144 minutes: the wrong try is frozen, the solve is past the cutoff
        options.set_width(8000, &c);

        let mut resolver = Resolver::new(c, &teams(&["t1", "t2"]), &late_feed()).with_options(options);
        resolver.build();

        assert_eq!(resolver.after_freeze_submissions().len(), 1);
        let ops = resolver.operations();
        assert_eq!(ops.len(), 1);
        assert!(ops[0].before_team_problem_statistics.is_pending());

        let after = &ops[0].after_team_problem_statistics;
        assert!(after.is_submitted);
        assert!(!after.is_solved);
        assert_eq!(after.failed_count, 1);
        assert_eq!(ids(resolver.resolved_teams()), ids(resolver.final_rank().teams()));
    }
}

mod ceremony {
    use super::*;

    #[test]
    fn reveals_bottom_up_and_lands_on_final_order() {
        let c = contest(180, 60, &["A", "B", "C"]);
        let feed = ceremony_feed();

        let mut resolver = Resolver::new(c, &teams(&["a", "b", "c", "d"]), &feed);
        resolver.build();

        assert_eq!(ids(resolver.frozen_rank().teams()), vec!["a", "b", "c", "d"]);

        let sequence: Vec<(&str, usize)> = resolver
            .operations()
            .iter()
            .map(|op| (op.team_id.as_str(), op.problem_ix))
            .collect();
        assert_eq!(
            sequence,
            vec![
                ("d", 0),
                ("d", 1),
                ("c", 1),
                ("b", 1),
                ("b", 2),
                ("d", 2),
                ("a", 2),
            ]
        );
        for (ix, op) in resolver.operations().iter().enumerate() {
            assert_eq!(op.id, ix);
            assert!(op.before_team_problem_statistics.is_pending());
            assert!(!op.after_team_problem_statistics.is_pending());
        }

        assert_eq!(ids(resolver.resolved_teams()), vec!["a", "c", "d", "b"]);
        assert_eq!(ids(resolver.resolved_teams()), ids(resolver.final_rank().teams()));
    }

    #[test]
    fn every_frozen_cell_is_revealed_once() {
        let c = contest(300, 120, &["A", "B", "C", "D", "E"]);
        let roster = ["t01", "t02", "t03", "t04", "t05", "t06"];
        let feed = scrambled_feed(&roster, 5, 300, 300);

        let mut resolver = Resolver::new(c, &teams(&roster), &feed);
        resolver.build();

        let pending_cells: usize = resolver
            .frozen_rank()
            .teams()
            .iter()
            .map(|t| t.problem_statistics.iter().filter(|p| p.is_pending()).count())
            .sum();
        assert_eq!(resolver.operations().len(), pending_cells);

        let mut seen = std::collections::HashSet::new();
        for op in resolver.operations() {
            assert!(seen.insert((op.team_id.clone(), op.problem_ix)));
        }

        let scores = |ts: &[common::Team]| {
            ts.iter()
                .map(|t| (t.id.clone(), t.solved_problem_num, t.penalty))
                .collect::<Vec<_>>()
        };
        let mut resolved = scores(resolver.resolved_teams());
        let mut final_board = scores(resolver.final_rank().teams());
        resolved.sort();
        final_board.sort();
        assert_eq!(resolved, final_board);
    }

    #[test]
    fn log_is_deterministic() {
        let c = contest(180, 60, &["A", "B", "C"]);
        let feed = ceremony_feed();
        let roster = teams(&["a", "b", "c", "d"]);

        let mut first = Resolver::new(std::sync::Arc::clone(&c), &roster, &feed);
        let mut second = Resolver::new(c, &roster, &feed);
        first.build();
        second.build();

        assert_eq!(first.operations(), second.operations());
    }

    #[test]
    fn group_filter_applies_to_both_boards() {
        let c = contest(180, 60, &["A", "B", "C"]);
        let mut roster = teams(&["a", "b", "c", "d"]);
        for team in roster.iter_mut().filter(|t| t.id == "b" || t.id == "d") {
            team.groups = vec!["official".into()];
        }

        let mut options = RankOptions::new();
        options.set_group("official");
        let mut resolver = Resolver::new(c, &roster, &ceremony_feed()).with_options(options);
        resolver.build();

        assert_eq!(ids(resolver.frozen_rank().teams()), vec!["b", "d"]);
        assert!(
            resolver
                .operations()
                .iter()
                .all(|op| op.team_id == "b" || op.team_id == "d")
        );
        assert_eq!(ids(resolver.resolved_teams()), vec!["d", "b"]);
    }
}
