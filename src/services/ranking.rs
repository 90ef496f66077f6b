use polars::prelude::{DataFrame, NamedFrom, Series};

use crate::error::RankingError;
use crate::models::{QuizOrder, ScoredPlayers, TrackPartition};
use crate::services::scoring::TOTAL_SCORE_COLUMN;

pub const PLAYER_COLUMN: &str = "Player";

/// Final leaderboard: players sorted by total score, columns in presentation
/// order. A player's rank is their 1-based row position.
#[derive(Debug, Clone)]
pub struct RankingTable {
    frame: DataFrame,
}

impl RankingTable {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn ranks(&self) -> impl Iterator<Item = u32> {
        1..=self.len() as u32
    }
}

/// Player, Total Score, primary-track quizzes, other quizzes, then the
/// derived other-track column.
pub fn presentation_columns(partition: &TrackPartition, other_best_column: &str) -> Vec<String> {
    let mut columns = vec![PLAYER_COLUMN.to_string(), TOTAL_SCORE_COLUMN.to_string()];
    columns.extend(partition.primary.iter().map(|quiz| quiz.name.clone()));
    columns.extend(partition.other.iter().map(|quiz| quiz.name.clone()));
    columns.push(other_best_column.to_string());
    columns
}

pub fn rank_players(
    scored: ScoredPlayers,
    quiz_order: &QuizOrder,
    partition: &TrackPartition,
) -> Result<RankingTable, RankingError> {
    let ScoredPlayers {
        mut rows,
        other_best_column,
    } = scored;

    // stable: equal totals keep pivot order
    rows.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    let mut columns = Vec::with_capacity(quiz_order.len() + 3);
    columns.push(Series::new(
        PLAYER_COLUMN,
        rows.iter().map(|row| row.player.clone()).collect::<Vec<String>>(),
    ));
    for (index, quiz) in quiz_order.names().iter().enumerate() {
        let values: Vec<f64> = rows
            .iter()
            .map(|row| row.scores.get(index).copied().unwrap_or(0.0))
            .collect();
        columns.push(Series::new(quiz, values));
    }
    columns.push(Series::new(
        &other_best_column,
        rows.iter().map(|row| row.best_other).collect::<Vec<f64>>(),
    ));
    columns.push(Series::new(
        TOTAL_SCORE_COLUMN,
        rows.iter().map(|row| row.total_score).collect::<Vec<f64>>(),
    ));

    let frame = DataFrame::new(columns).map_err(|e| {
        tracing::error!("Failed to create DataFrame: {}", e);
        RankingError::Table(e)
    })?;

    let order = presentation_columns(partition, &other_best_column);
    let frame = frame.select(order.iter().map(String::as_str))?;

    tracing::info!("Ranked {} players", frame.height());
    Ok(RankingTable { frame })
}
