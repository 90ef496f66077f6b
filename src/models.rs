/// Header of one quiz sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRecord {
    pub quiz_name: String,
    pub max_points: f64,
}

/// One `(player, score)` row exactly as it appears in a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScore {
    pub player: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct QuizSheet {
    pub sheet_name: String,
    pub record: QuizRecord,
    pub scores: Vec<RawScore>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub player: String,
    pub quiz_name: String,
    pub raw_score: f64,
    pub scaled_score: f64,
    pub max_points: f64,
}

/// Quiz names in the order they were first seen across sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizOrder {
    names: Vec<String>,
}

impl QuizOrder {
    /// Returns `false` when the quiz was already known.
    pub fn push_if_absent(&mut self, quiz_name: &str) -> bool {
        if self.names.iter().any(|name| name == quiz_name) {
            return false;
        }
        self.names.push(quiz_name.to_string());
        true
    }

    pub fn position(&self, quiz_name: &str) -> Option<usize> {
        self.names.iter().position(|name| name == quiz_name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A quiz column, by position in [`QuizOrder`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackQuiz {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackPartition {
    pub primary: Vec<TrackQuiz>,
    pub other: Vec<TrackQuiz>,
}

/// One player after pivoting. `scores` is aligned with [`QuizOrder`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    pub player: String,
    pub scores: Vec<f64>,
    pub best_primary: f64,
    pub best_other: f64,
    pub total_score: f64,
}

impl PlayerRow {
    pub fn new(player: String, scores: Vec<f64>) -> Self {
        Self {
            player,
            scores,
            best_primary: 0.0,
            best_other: 0.0,
            total_score: 0.0,
        }
    }

    pub fn scores_for(&self, quizzes: &[TrackQuiz]) -> Vec<f64> {
        quizzes
            .iter()
            .map(|quiz| self.scores.get(quiz.index).copied().unwrap_or(0.0))
            .collect()
    }
}

/// Player rows after scoring, with the name of the derived other-track column.
#[derive(Debug, Clone)]
pub struct ScoredPlayers {
    pub rows: Vec<PlayerRow>,
    pub other_best_column: String,
}

/// State threaded through the pipeline stages of one run.
#[derive(Debug, Clone, Default)]
pub struct RankingContext {
    pub quiz_order: QuizOrder,
    pub sheets: Vec<QuizSheet>,
    pub entries: Vec<ScoreEntry>,
}
