//! Vet report export
//!
//! Supports multiple formats:
//! - JSON: the full report with summary statistics
//! - CSV: health and weight tables for spreadsheets
//!
//! Reports cover the newest `report.max_records` entries of each kind.
//! Weights are shown in the preferred unit.

use crate::error::{AppError, AppResult};
use crate::repositories::RecordRepository;
use chrono::NaiveDate;
use happy_kitty_shared::report::{key_observations, newest, report_file_name, ReportSummary};
use happy_kitty_shared::{Cat, HealthStatus, WeightUnit};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A complete health report for one cat
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatReport {
    pub cat: Cat,
    pub generated_on: NaiveDate,
    pub unit: WeightUnit,
    pub summary: ReportSummary,
    pub health_records: Vec<HealthRow>,
    pub weight_records: Vec<WeightRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthRow {
    pub date: NaiveDate,
    pub score: u32,
    pub percentage: u32,
    pub status: HealthStatus,
    pub observations: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeightRow {
    pub date: NaiveDate,
    pub weight: f64,
    pub unit: WeightUnit,
}

const HEALTH_CSV_HEADER: [&str; 5] = ["date", "score", "percentage", "status", "observations"];
const WEIGHT_CSV_HEADER: [&str; 3] = ["date", "weight", "unit"];

/// CSV export row for health data
#[derive(Debug, Clone, Serialize)]
pub struct HealthCsvRow {
    pub date: String,
    pub score: u32,
    pub percentage: u32,
    pub status: String,
    pub observations: String,
}

/// CSV export row for weight data
#[derive(Debug, Clone, Serialize)]
pub struct WeightCsvRow {
    pub date: String,
    pub weight: f64,
    pub unit: String,
}

/// Files written by [`ExportService::write_files`]
#[derive(Debug, Clone, Serialize)]
pub struct ExportPaths {
    pub report: PathBuf,
    pub health_csv: PathBuf,
    pub weight_csv: PathBuf,
}

/// Data export service
pub struct ExportService;

impl ExportService {
    /// Build the report for a cat from the newest `max_records` entries
    pub fn build_report(
        repo: &dyn RecordRepository,
        cat: Cat,
        generated_on: NaiveDate,
        max_records: usize,
    ) -> AppResult<CatReport> {
        let health = repo.health_records(cat.id).map_err(AppError::Internal)?;
        let weight = repo.weight_records(cat.id).map_err(AppError::Internal)?;
        let unit = repo.preferred_unit().map_err(AppError::Internal)?;

        let summary = ReportSummary::build(&health, &weight, unit, max_records);

        let health_records = newest(&health, |r| r.date, max_records)
            .into_iter()
            .map(|r| HealthRow {
                date: r.date,
                score: r.score,
                percentage: r.percentage,
                status: r.status,
                observations: key_observations(&r.answers),
            })
            .collect();

        let weight_records = newest(&weight, |r| r.date, max_records)
            .into_iter()
            .map(|r| WeightRow {
                date: r.date,
                weight: r.weight_in(unit),
                unit,
            })
            .collect();

        Ok(CatReport {
            cat,
            generated_on,
            unit,
            summary,
            health_records,
            weight_records,
        })
    }

    pub fn to_json(report: &CatReport) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    pub fn health_csv(report: &CatReport) -> AppResult<String> {
        let rows: Vec<HealthCsvRow> = report
            .health_records
            .iter()
            .map(|r| HealthCsvRow {
                date: r.date.format("%Y-%m-%d").to_string(),
                score: r.score,
                percentage: r.percentage,
                status: r.status.label().to_string(),
                observations: r.observations.clone(),
            })
            .collect();

        Self::to_csv(&rows, &HEALTH_CSV_HEADER)
    }

    pub fn weight_csv(report: &CatReport) -> AppResult<String> {
        let rows: Vec<WeightCsvRow> = report
            .weight_records
            .iter()
            .map(|r| WeightCsvRow {
                date: r.date.format("%Y-%m-%d").to_string(),
                weight: r.weight,
                unit: r.unit.abbreviation().to_string(),
            })
            .collect();

        Self::to_csv(&rows, &WEIGHT_CSV_HEADER)
    }

    /// Write the JSON report and both CSV tables into `dir`
    pub fn write_files(report: &CatReport, dir: &Path) -> AppResult<ExportPaths> {
        fs::create_dir_all(dir)?;
        let stem = report_file_name(&report.cat.name, report.generated_on);

        let paths = ExportPaths {
            report: dir.join(format!("{}.json", stem)),
            health_csv: dir.join(format!("{}_health.csv", stem)),
            weight_csv: dir.join(format!("{}_weight.csv", stem)),
        };
        fs::write(&paths.report, Self::to_json(report)?)?;
        fs::write(&paths.health_csv, Self::health_csv(report)?)?;
        fs::write(&paths.weight_csv, Self::weight_csv(report)?)?;

        info!(
            cat_id = %report.cat.id,
            path = %paths.report.display(),
            health_rows = report.health_records.len(),
            weight_rows = report.weight_records.len(),
            "Report exported"
        );
        Ok(paths)
    }

    /// Serialize rows; an empty table still gets its header line
    fn to_csv<T: Serialize>(data: &[T], header: &[&str]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        if data.is_empty() {
            wtr.write_record(header)?;
        }
        for record in data {
            wtr.serialize(record)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryRepository;
    use happy_kitty_shared::{HealthAnswers, HealthRecord, WeightRecord};

    fn answers(eating: &str, vomiting: &str) -> HealthAnswers {
        HealthAnswers {
            eating: eating.into(),
            water: "normal".into(),
            pee: "2-4".into(),
            poop: "normal".into(),
            activity: "normal".into(),
            mood: "normal".into(),
            vomiting: vomiting.into(),
            appetite: "normal".into(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    fn seeded() -> (InMemoryRepository, Cat) {
        let mut repo = InMemoryRepository::new();
        let cat = Cat::new("Sir Fluff", None);
        repo.save_cat(cat.clone()).unwrap();
        repo.save_health_record(HealthRecord::new(cat.id, day(1), answers("2-3", "no")))
            .unwrap();
        repo.save_health_record(HealthRecord::new(cat.id, day(2), answers("1", "more-than-once")))
            .unwrap();
        repo.save_weight_record(WeightRecord {
            date: day(2),
            cat_id: cat.id,
            weight: 4.5,
            unit: WeightUnit::Kg,
        })
        .unwrap();
        repo.set_preferred_unit(WeightUnit::Lbs).unwrap();
        (repo, cat)
    }

    #[test]
    fn test_report_rows_newest_first_in_preferred_unit() {
        let (repo, cat) = seeded();
        let report = ExportService::build_report(&repo, cat, day(3), 30).unwrap();

        assert_eq!(report.health_records.len(), 2);
        assert_eq!(report.health_records[0].date, day(2));
        assert_eq!(report.health_records[0].observations, "Ate once, Vomiting");
        assert_eq!(report.health_records[1].observations, "All normal");

        assert_eq!(report.unit, WeightUnit::Lbs);
        assert_eq!(report.weight_records[0].weight, 9.9);

        let summary = report.summary.health.as_ref().unwrap();
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.latest_percentage, report.health_records[0].percentage);
    }

    #[test]
    fn test_report_respects_max_records() {
        let (repo, cat) = seeded();
        let report = ExportService::build_report(&repo, cat, day(3), 1).unwrap();
        assert_eq!(report.health_records.len(), 1);
        assert_eq!(report.summary.health.unwrap().record_count, 1);
    }

    #[test]
    fn test_csv_tables() {
        let (repo, cat) = seeded();
        let report = ExportService::build_report(&repo, cat, day(3), 30).unwrap();

        let health = ExportService::health_csv(&report).unwrap();
        let mut lines = health.lines();
        assert_eq!(lines.next(), Some("date,score,percentage,status,observations"));
        assert_eq!(lines.next().map(|l| l.starts_with("2024-11-02,")), Some(true));
        assert!(health.contains("\"Ate once, Vomiting\""));

        let weight = ExportService::weight_csv(&report).unwrap();
        assert_eq!(weight, "date,weight,unit\n2024-11-02,9.9,lbs\n");
    }

    #[test]
    fn test_empty_tables_keep_their_header() {
        let mut repo = InMemoryRepository::new();
        let cat = Cat::new("Nova", None);
        repo.save_cat(cat.clone()).unwrap();
        let report = ExportService::build_report(&repo, cat, day(3), 30).unwrap();

        assert_eq!(
            ExportService::health_csv(&report).unwrap(),
            "date,score,percentage,status,observations\n"
        );
        assert_eq!(ExportService::weight_csv(&report).unwrap(), "date,weight,unit\n");
    }

    #[test]
    fn test_write_files() {
        let (repo, cat) = seeded();
        let report = ExportService::build_report(&repo, cat, day(3), 30).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let paths = ExportService::write_files(&report, dir.path()).unwrap();
        assert_eq!(
            paths.report.file_name().and_then(|n| n.to_str()),
            Some("Sir_Fluff_health_report_2024-11-03.json")
        );
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&paths.report).unwrap()).unwrap();
        assert_eq!(json["cat"]["name"], "Sir Fluff");
        assert_eq!(json["generatedOn"], "2024-11-03");
        assert!(paths.health_csv.exists());
        assert!(paths.weight_csv.exists());
    }
}
