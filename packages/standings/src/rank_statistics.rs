use serde::Serialize;

use common::{Problem, ProblemStatistics, Team};

/// Accepted-team count of one problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProblemSolvedCount {
    pub problem_id: String,
    pub label: String,
    pub solved: u32,
}

/// Aggregates derived from a finished build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RankStatistics {
    /// `team_solved_num[k]` teams solved exactly `k` problems.
    pub team_solved_num: Vec<usize>,
    /// Problems ordered by solve count, most solved first, contest order on ties.
    pub problem_solved: Vec<ProblemSolvedCount>,
}

impl RankStatistics {
    pub fn reset(&mut self) {
        self.team_solved_num.clear();
        self.problem_solved.clear();
    }

    pub fn rebuild(&mut self, teams: &[Team], problems: &[Problem], stats: &[ProblemStatistics]) {
        self.reset();

        self.team_solved_num = vec![0; problems.len() + 1];
        for team in teams {
            // Cells are sized from the same problem list, so this is in range.
            if let Some(slot) = self.team_solved_num.get_mut(team.solved_problem_num) {
                *slot += 1;
            }
        }

        self.problem_solved = problems
            .iter()
            .zip(stats)
            .map(|(p, s)| ProblemSolvedCount {
                problem_id: p.id.clone(),
                label: p.label.clone(),
                solved: s.accepted_num,
            })
            .collect();
        // stable sort keeps contest order among equal counts
        self.problem_solved.sort_by(|a, b| b.solved.cmp(&a.solved));
    }

    pub fn team_count(&self) -> usize {
        self.team_solved_num.iter().sum()
    }
}
