use crate::config::ScoringPolicy;
use crate::models::{PlayerRow, QuizOrder, ScoredPlayers, TrackPartition, TrackQuiz};

pub const TOTAL_SCORE_COLUMN: &str = "Total Score";

/// Splits the quiz order into primary-track quizzes and the rest, keeping
/// first-seen order on both sides.
pub fn categorize(quiz_order: &QuizOrder, policy: &ScoringPolicy) -> TrackPartition {
    let mut partition = TrackPartition::default();
    for (index, name) in quiz_order.names().iter().enumerate() {
        let quiz = TrackQuiz {
            index,
            name: name.clone(),
        };
        if policy.is_primary(name) {
            partition.primary.push(quiz);
        } else {
            partition.other.push(quiz);
        }
    }
    tracing::info!(
        "Categorized quizzes: {} primary, {} other",
        partition.primary.len(),
        partition.other.len()
    );
    partition
}

fn sorted_descending(scores: &[f64]) -> Vec<f64> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
}

/// Sum of all but the `drop_count` lowest scores; plain sum when there are no
/// more than `drop_count` scores.
pub fn drop_worst_total(scores: &[f64], drop_count: usize) -> f64 {
    if scores.len() <= drop_count {
        return scores.iter().sum();
    }
    let keep = scores.len() - drop_count;
    sorted_descending(scores).into_iter().take(keep).sum()
}

pub fn top_n_total(scores: &[f64], n: usize) -> f64 {
    sorted_descending(scores).into_iter().take(n).sum()
}

/// `count(other) - drop_count`. Zero or negative when there are no more other
/// quizzes than drops, which is how the column has always been labelled.
pub fn other_best_count(other_quizzes: usize, drop_count: usize) -> i64 {
    other_quizzes as i64 - drop_count as i64
}

pub fn other_best_column_name(other_quizzes: usize, drop_count: usize) -> String {
    format!("Other - Best {}", other_best_count(other_quizzes, drop_count))
}

pub fn score_player(row: &mut PlayerRow, partition: &TrackPartition, policy: &ScoringPolicy) {
    let combined_scores = row.scores_for(&partition.primary);
    let other_scores = row.scores_for(&partition.other);

    row.best_primary = top_n_total(&combined_scores, policy.primary_top_n);
    row.best_other = drop_worst_total(&other_scores, policy.other_drop_count);
    row.total_score = row.best_primary + row.best_other;
}

pub fn score_players(
    mut rows: Vec<PlayerRow>,
    partition: &TrackPartition,
    policy: &ScoringPolicy,
) -> ScoredPlayers {
    for row in &mut rows {
        score_player(row, partition, policy);
        tracing::trace!(
            "{}: primary {:.2}, other {:.2}, total {:.2}",
            row.player,
            row.best_primary,
            row.best_other,
            row.total_score
        );
    }

    ScoredPlayers {
        rows,
        other_best_column: other_best_column_name(partition.other.len(), policy.other_drop_count),
    }
}
