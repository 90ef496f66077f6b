use crate::config::ScoringPolicy;
use crate::error::RankingError;
use crate::models::RankingContext;
use crate::services::excel::{ingest_workbook, SheetSource};
use crate::services::normalizer::normalize_all;
use crate::services::pivot::build_pivot;
use crate::services::ranking::{rank_players, RankingTable};
use crate::services::scoring::{categorize, score_players};

/// Runs ingest, normalize, pivot, score and rank over one workbook. Each
/// stage consumes the complete output of the one before it.
pub struct RankingPipeline<'a> {
    policy: &'a ScoringPolicy,
}

impl<'a> RankingPipeline<'a> {
    pub fn new(policy: &'a ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn run<S: SheetSource>(&self, source: &mut S) -> Result<RankingTable, RankingError> {
        let start = std::time::Instant::now();

        let ctx = ingest_workbook(source, RankingContext::default())?;
        let ctx = normalize_all(ctx, self.policy)?;

        let rows = build_pivot(&ctx.entries, &ctx.quiz_order);
        let partition = categorize(&ctx.quiz_order, self.policy);
        let scored = score_players(rows, &partition, self.policy);
        let table = rank_players(scored, &ctx.quiz_order, &partition)?;

        tracing::info!("Ranking completed in {:?}", start.elapsed());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::excel::MemoryWorkbook;
    use crate::services::export::ranking_records;
    use approx::assert_relative_eq;
    use calamine::Data;

    fn s(value: &str) -> Data {
        Data::String(value.to_string())
    }

    fn quiz(name: &str, max_points: i64, rows: &[(&str, f64)]) -> Vec<Vec<Data>> {
        let mut sheet = vec![vec![s(name), Data::Int(max_points)]];
        sheet.extend(
            rows.iter()
                .map(|(player, score)| vec![s(player), Data::Float(*score)]),
        );
        sheet
    }

    fn column(table: &RankingTable, name: &str) -> Vec<f64> {
        table
            .frame()
            .column(name)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect()
    }

    #[test]
    fn test_two_quiz_scenario() {
        let policy = ScoringPolicy::default();
        let mut workbook = MemoryWorkbook::new()
            .with_sheet("A", quiz("Quiz A", 100, &[("Alice", 50.0), ("Bob", 100.0)]))
            .with_sheet("B", quiz("Quiz B", 50, &[("Alice", 30.0), ("Bob", 10.0)]));

        let table = RankingPipeline::new(&policy).run(&mut workbook).unwrap();

        let records = ranking_records(&table).unwrap();
        assert_eq!(records[0].fields[0].1, "Bob");
        assert_eq!(records[1].fields[0].1, "Alice");
        assert_eq!(column(&table, "Quiz A"), vec![100.0, 50.0]);
        let quiz_b = column(&table, "Quiz B");
        assert_relative_eq!(quiz_b[0], 50.0 / 3.0, epsilon = 1e-9);
        assert_eq!(quiz_b[1], 50.0);
        assert_relative_eq!(column(&table, "Total Score")[0], 100.0 + 50.0 / 3.0, epsilon = 1e-9);
        assert_eq!(column(&table, "Total Score")[1], 100.0);
    }

    #[test]
    fn test_degenerate_quiz_aborts() {
        let policy = ScoringPolicy::default();
        let mut workbook = MemoryWorkbook::new()
            .with_sheet("A", quiz("Quiz A", 100, &[("Alice", 50.0)]))
            .with_sheet("B", quiz("Quiz B", 50, &[("Alice", 0.0), ("Bob", 0.0)]));

        let err = RankingPipeline::new(&policy).run(&mut workbook).unwrap_err();
        assert!(matches!(err, RankingError::DegenerateQuiz { ref quiz } if quiz == "Quiz B"));
    }

    #[test]
    fn test_alias_spellings_merge_into_one_row() {
        let policy = ScoringPolicy::default();
        let mut workbook = MemoryWorkbook::new()
            .with_sheet(
                "1",
                quiz("12x7 #1", 84, &[("Krešimir Sučević Međeral", 84.0), ("Ana", 42.0)]),
            )
            .with_sheet(
                "2",
                quiz("Pub kviz", 50, &[("Krešimir Sučević-Međeral", 20.0), ("Ana", 40.0)]),
            );

        let table = RankingPipeline::new(&policy).run(&mut workbook).unwrap();

        let players: Vec<String> = ranking_records(&table)
            .unwrap()
            .into_iter()
            .map(|record| record.fields[0].1.clone())
            .collect();
        assert_eq!(players, vec!["Krešimir Sučević-Međeral", "Ana"]);
        assert_eq!(column(&table, "12x7 #1"), vec![84.0, 42.0]);
        assert_eq!(column(&table, "Pub kviz"), vec![25.0, 50.0]);
    }

    #[test]
    fn test_primary_columns_precede_other_columns() {
        let policy = ScoringPolicy::default();
        let mut workbook = MemoryWorkbook::new()
            .with_sheet("1", quiz("Pub 1", 50, &[("Ana", 40.0)]))
            .with_sheet("2", quiz("Hrvatskih 100 - proljeće", 100, &[("Ana", 70.0)]))
            .with_sheet("3", quiz("Pub 2", 50, &[("Ivo", 10.0)]))
            .with_sheet("4", quiz("12x7 #1", 84, &[("Ivo", 60.0)]));

        let table = RankingPipeline::new(&policy).run(&mut workbook).unwrap();
        assert_eq!(
            table.column_names(),
            vec![
                "Player",
                "Total Score",
                "Hrvatskih 100 - proljeće",
                "12x7 #1",
                "Pub 1",
                "Pub 2",
                "Other - Best -1",
            ]
        );
    }

    #[test]
    fn test_run_is_idempotent() {
        let policy = ScoringPolicy::default();
        let mut workbook = MemoryWorkbook::new()
            .with_sheet("1", quiz("12x7 #1", 84, &[("Ana", 61.0), ("Ivo", 70.0), ("Eva", 70.0)]))
            .with_sheet("2", quiz("Pub 1", 50, &[("Ana", 40.0), ("Eva", 12.0)]));

        let first = RankingPipeline::new(&policy).run(&mut workbook).unwrap();
        let second = RankingPipeline::new(&policy).run(&mut workbook).unwrap();

        assert!(first.frame().equals(second.frame()));
        assert_eq!(ranking_records(&first).unwrap(), ranking_records(&second).unwrap());
    }
}
