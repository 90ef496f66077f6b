use crate::config::ScoringPolicy;
use crate::error::RankingError;
use crate::models::{QuizSheet, RankingContext, ScoreEntry};

/// Scales one sheet's raw scores so the best score in the sheet is worth the
/// quiz's max points. Player names are canonicalized on the way.
pub fn normalize_sheet(
    sheet: &QuizSheet,
    policy: &ScoringPolicy,
) -> Result<Vec<ScoreEntry>, RankingError> {
    let quiz = &sheet.record;
    if sheet.scores.is_empty() {
        tracing::warn!("Quiz '{}' has no player rows", quiz.quiz_name);
        return Ok(Vec::new());
    }

    let top_score = sheet
        .scores
        .iter()
        .map(|row| row.score)
        .fold(f64::NEG_INFINITY, f64::max);
    // a non-positive top score would divide by zero or flip signs
    if top_score <= 0.0 {
        return Err(RankingError::DegenerateQuiz {
            quiz: quiz.quiz_name.clone(),
        });
    }

    Ok(sheet
        .scores
        .iter()
        .map(|row| ScoreEntry {
            player: policy.canonical_name(&row.player).to_string(),
            quiz_name: quiz.quiz_name.clone(),
            raw_score: row.score,
            scaled_score: row.score / top_score * quiz.max_points,
            max_points: quiz.max_points,
        })
        .collect())
}

pub fn normalize_all(
    mut ctx: RankingContext,
    policy: &ScoringPolicy,
) -> Result<RankingContext, RankingError> {
    for sheet in &ctx.sheets {
        let entries = normalize_sheet(sheet, policy)?;
        ctx.entries.extend(entries);
    }
    tracing::info!("Normalized {} score entries", ctx.entries.len());
    Ok(ctx)
}
