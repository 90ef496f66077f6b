use std::collections::BTreeMap;

use crate::models::{PlayerRow, QuizOrder, ScoreEntry};

/// Reshapes score entries into one row per player with one value per quiz in
/// `quiz_order`. Missing pairs are 0.
///
/// A player listed twice in the same quiz keeps the first entry: each
/// `(player, quiz)` cell is filled only if it is still empty. Rows come out
/// ordered by player name.
pub fn build_pivot(entries: &[ScoreEntry], quiz_order: &QuizOrder) -> Vec<PlayerRow> {
    let mut cells: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();

    for entry in entries {
        let Some(column) = quiz_order.position(&entry.quiz_name) else {
            tracing::warn!("Quiz '{}' missing from quiz order, entry ignored", entry.quiz_name);
            continue;
        };
        let row = cells
            .entry(entry.player.as_str())
            .or_insert_with(|| vec![None; quiz_order.len()]);

        if row[column].is_none() {
            row[column] = Some(entry.scaled_score);
        } else {
            tracing::debug!(
                "Duplicate entry for {} in '{}', keeping the first",
                entry.player,
                entry.quiz_name
            );
        }
    }

    tracing::info!(
        "Pivoted {} players across {} quizzes",
        cells.len(),
        quiz_order.len()
    );

    cells
        .into_iter()
        .map(|(player, scores)| {
            PlayerRow::new(
                player.to_string(),
                scores.into_iter().map(|score| score.unwrap_or(0.0)).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(player: &str, quiz: &str, scaled: f64) -> ScoreEntry {
        ScoreEntry {
            player: player.to_string(),
            quiz_name: quiz.to_string(),
            raw_score: scaled,
            scaled_score: scaled,
            max_points: 100.0,
        }
    }

    fn order(names: &[&str]) -> QuizOrder {
        let mut order = QuizOrder::default();
        for name in names {
            order.push_if_absent(name);
        }
        order
    }

    #[test]
    fn test_absent_players_get_zero() {
        let rows = build_pivot(
            &[entry("Bob", "A", 100.0), entry("Alice", "B", 50.0)],
            &order(&["A", "B"]),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "Alice");
        assert_eq!(rows[0].scores, vec![0.0, 50.0]);
        assert_eq!(rows[1].player, "Bob");
        assert_eq!(rows[1].scores, vec![100.0, 0.0]);
    }

    #[test]
    fn test_columns_follow_quiz_order() {
        let rows = build_pivot(
            &[entry("Ana", "First", 1.0), entry("Ana", "Second", 2.0)],
            &order(&["Second", "First"]),
        );
        assert_eq!(rows[0].scores, vec![2.0, 1.0]);
    }

    #[test]
    fn test_duplicate_entry_first_wins() {
        let rows = build_pivot(
            &[
                entry("Ana", "A", 30.0),
                entry("Ana", "A", 90.0),
                entry("Ana", "A", 10.0),
            ],
            &order(&["A"]),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].scores, vec![30.0]);
    }

    #[test]
    fn test_quiz_without_entries_is_all_zero() {
        let rows = build_pivot(&[entry("Ana", "A", 30.0)], &order(&["A", "Empty"]));
        assert_eq!(rows[0].scores, vec![30.0, 0.0]);
    }
}
