//! CLI command definitions and handlers

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use happy_kitty_app::config::AppConfig;
use happy_kitty_app::error::{AppError, AppResult};
use happy_kitty_app::open_repository;
use happy_kitty_app::repositories::RecordRepository;
use happy_kitty_app::services::{
    CatService, CheckInService, ExportService, GoalService, WeightService,
};
use happy_kitty_shared::questionnaire::{question, AnswerSheet, QUESTIONS};
use happy_kitty_shared::scoring::is_known_answer;
use happy_kitty_shared::validation::{GoalInput, LogWeightInput, NewCat};
use happy_kitty_shared::{
    Cat, CatUpdate, HealthCategory, HealthRecord, TipReport, WeightStatus, WeightUnit,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Happy Kitty Score - daily wellness tracking for your cat
///
/// Everything is stored locally. Nothing leaves your machine.
#[derive(Parser, Debug)]
#[command(name = "happy-kitty")]
#[command(
    version,
    about = "Daily wellness score, weight tracking and vet reports for your cat",
    after_help = "\
Examples:
  happy-kitty cat add Luna                     Add a cat (and select it)
  happy-kitty questions                        Show the daily questions and answer codes
  happy-kitty check --eating 2-3 --water normal --pee 2-4 --poop normal \\
      --activity normal --mood playful --vomiting no --appetite normal
  happy-kitty weight log 4.2 --unit kg         Log today's weight
  happy-kitty export --out reports             Write the vet report"
)]
pub struct Cli {
    /// Cat to act on (default: the selected cat)
    #[arg(long, global = true)]
    pub cat: Option<Uuid>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage cat profiles
    #[command(subcommand)]
    Cat(CatCommand),

    /// List the daily questions and their answer codes
    Questions,

    /// Submit the daily check
    Check(CheckArgs),

    /// Today's score, streak and weight status
    Today {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Recent scores, oldest first
    History {
        /// Number of records (default: report.chart_days)
        #[arg(long)]
        days: Option<usize>,
    },

    /// Advice for the worst-scoring answers of a day
    Tips {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Check-in streak
    Streak,

    /// Log and review weight
    #[command(subcommand)]
    Weight(WeightCommand),

    /// Manage the healthy weight range
    #[command(subcommand)]
    Goal(GoalCommand),

    /// Show or set the preferred weight unit
    Unit {
        unit: Option<WeightUnit>,
    },

    /// Export the vet report (JSON plus CSV tables)
    Export {
        /// Output directory
        #[arg(long, short = 'o', default_value = ".")]
        out: PathBuf,
    },

    /// Configuration helpers
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum CatCommand {
    /// Add a cat and select it
    Add {
        name: String,
        #[arg(long)]
        photo: Option<String>,
    },
    /// List all cats
    List,
    /// Edit a cat's name or photo
    Edit {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "remove_photo")]
        photo: Option<String>,
        #[arg(long)]
        remove_photo: bool,
    },
    /// Delete a cat and all of its records
    Delete { id: Uuid },
    /// Make a cat the default for other commands
    Select { id: Uuid },
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(long)]
    pub eating: Option<String>,
    #[arg(long)]
    pub water: Option<String>,
    #[arg(long)]
    pub pee: Option<String>,
    #[arg(long)]
    pub poop: Option<String>,
    #[arg(long)]
    pub activity: Option<String>,
    #[arg(long)]
    pub mood: Option<String>,
    #[arg(long)]
    pub vomiting: Option<String>,
    #[arg(long)]
    pub appetite: Option<String>,
    /// Day the check is for (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl CheckArgs {
    fn sheet(&self) -> AppResult<AnswerSheet> {
        let given = [
            (HealthCategory::Eating, &self.eating),
            (HealthCategory::Water, &self.water),
            (HealthCategory::Pee, &self.pee),
            (HealthCategory::Poop, &self.poop),
            (HealthCategory::Activity, &self.activity),
            (HealthCategory::Mood, &self.mood),
            (HealthCategory::Vomiting, &self.vomiting),
            (HealthCategory::Appetite, &self.appetite),
        ];

        let mut sheet = AnswerSheet::new();
        for (category, code) in given {
            let Some(code) = code else { continue };
            if !is_known_answer(category, code) {
                let options: Vec<&str> = question(category).options.iter().map(|o| o.code).collect();
                return Err(AppError::Validation(format!(
                    "Unknown {} answer '{}'. Must be one of: {}",
                    category,
                    code,
                    options.join(", ")
                )));
            }
            sheet.set(category, code.as_str());
        }
        Ok(sheet)
    }
}

#[derive(Subcommand, Debug)]
pub enum WeightCommand {
    /// Log a weight (replaces any entry for the same day)
    Log {
        weight: f64,
        #[arg(long)]
        unit: Option<WeightUnit>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete the entry for a day
    Delete { date: NaiveDate },
    /// List entries, newest first
    List,
    /// Latest weight against the goal range
    Status,
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    /// Set the healthy range
    Set {
        min: f64,
        max: f64,
        #[arg(long)]
        unit: Option<WeightUnit>,
    },
    Show,
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a config file with the default settings
    Init {
        #[arg(long, default_value = "config/development.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Handlers
// ============================================================================

/// Run a parsed command
pub fn run(cli: Cli, config: &AppConfig) -> AppResult<()> {
    let today = chrono::Local::now().date_naive();

    if let Commands::Config(ConfigCommand::Init { path, force }) = &cli.command {
        return init_config(path, *force);
    }
    if let Commands::Questions = cli.command {
        return print_questions(cli.json);
    }

    let mut repo = open_repository(config).map_err(AppError::Internal)?;
    let repo = repo.as_mut();
    let out = Output { json: cli.json };

    match cli.command {
        Commands::Cat(command) => run_cat(repo, command, out),
        Commands::Check(args) => {
            let cat = CatService::resolve(repo, cli.cat)?;
            let sheet = args.sheet()?;
            let record = CheckInService::submit(repo, cat.id, args.date.unwrap_or(today), &sheet)?;
            out.print(&record, || format_record(&cat, &record))
        }
        Commands::Today { date } => {
            let cat = CatService::resolve(repo, cli.cat)?;
            let overview = CheckInService::overview(repo, cat, date.unwrap_or(today))?;
            out.print(&overview, || {
                let mut lines = vec![match &overview.today {
                    Some(record) => format_record(&overview.cat, record),
                    None => format!("{}: no check-in yet for today", overview.cat.name),
                }];
                lines.push(format_streak(&overview.streak));
                lines.push(format_weight_status(&overview.weight_status));
                lines.join("\n")
            })
        }
        Commands::History { days } => {
            let cat = CatService::resolve(repo, cli.cat)?;
            let days = days.unwrap_or(config.report.chart_days);
            let points = CheckInService::history(repo, cat.id, days)?;
            out.print(&points, || {
                if points.is_empty() {
                    return format!("No health records for {} yet", cat.name);
                }
                points
                    .iter()
                    .map(|p| format!("{}  {:>3}%  {}", p.date, p.percentage, p.status.label()))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Commands::Tips { date } => {
            let cat = CatService::resolve(repo, cli.cat)?;
            let report = CheckInService::tips(repo, cat.id, date.unwrap_or(today))?;
            out.print(&report, || format_tips(&report))
        }
        Commands::Streak => {
            let cat = CatService::resolve(repo, cli.cat)?;
            let streak = CheckInService::streak(repo, cat.id, today)?;
            out.print(&streak, || format_streak(&streak))
        }
        Commands::Weight(command) => {
            let cat = CatService::resolve(repo, cli.cat)?;
            run_weight(repo, &cat, command, today, out)
        }
        Commands::Goal(command) => {
            let cat = CatService::resolve(repo, cli.cat)?;
            run_goal(repo, &cat, command, out)
        }
        Commands::Unit { unit } => {
            if let Some(unit) = unit {
                WeightService::set_preferred_unit(repo, unit)?;
            }
            let unit = WeightService::preferred_unit(repo)?;
            out.print(&unit, || format!("Preferred unit: {}", unit))
        }
        Commands::Export { out: dir } => {
            let cat = CatService::resolve(repo, cli.cat)?;
            let report = ExportService::build_report(repo, cat, today, config.report.max_records)?;
            let paths = ExportService::write_files(&report, &dir)?;
            out.print(&paths, || {
                format!(
                    "Report written to {}\n  {}\n  {}",
                    paths.report.display(),
                    paths.health_csv.display(),
                    paths.weight_csv.display()
                )
            })
        }
        Commands::Questions | Commands::Config(_) => Ok(()),
    }
}

fn run_cat(repo: &mut dyn RecordRepository, command: CatCommand, out: Output) -> AppResult<()> {
    match command {
        CatCommand::Add { name, photo } => {
            let cat = CatService::add(repo, NewCat::new(&name, photo))?;
            out.print(&cat, || format!("Added {} ({})", cat.name, cat.id))
        }
        CatCommand::List => {
            let cats = CatService::list(repo)?;
            let selected = repo.selected_cat().map_err(AppError::Internal)?;
            out.print(&cats, || {
                if cats.is_empty() {
                    return "No cats yet. Add one with `happy-kitty cat add <name>`".to_string();
                }
                cats.iter()
                    .map(|c| {
                        let marker = if Some(c.id) == selected { "*" } else { " " };
                        format!("{} {}  {}", marker, c.id, c.name)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        CatCommand::Edit { id, name, photo, remove_photo } => {
            let photo = if remove_photo { Some(None) } else { photo.map(Some) };
            let cat = CatService::update(repo, id, CatUpdate { name, photo })?;
            out.print(&cat, || format!("Updated {}", cat.name))
        }
        CatCommand::Delete { id } => {
            CatService::delete(repo, id)?;
            out.print(&id, || format!("Deleted cat {} and all of its records", id))
        }
        CatCommand::Select { id } => {
            let cat = CatService::select(repo, id)?;
            out.print(&cat, || format!("Selected {}", cat.name))
        }
    }
}

fn run_weight(
    repo: &mut dyn RecordRepository,
    cat: &Cat,
    command: WeightCommand,
    today: NaiveDate,
    out: Output,
) -> AppResult<()> {
    match command {
        WeightCommand::Log { weight, unit, date } => {
            let unit = match unit {
                Some(unit) => unit,
                None => WeightService::preferred_unit(repo)?,
            };
            let input = LogWeightInput { weight, unit, date: date.unwrap_or(today) };
            let record = WeightService::log_weight(repo, cat.id, input)?;
            out.print(&record, || {
                format!("Logged {} {} for {} on {}", record.weight, record.unit, cat.name, record.date)
            })
        }
        WeightCommand::Delete { date } => {
            WeightService::delete_weight(repo, cat.id, date)?;
            out.print(&date, || format!("Deleted weight for {}", date))
        }
        WeightCommand::List => {
            let records = WeightService::list(repo, cat.id)?;
            let unit = WeightService::preferred_unit(repo)?;
            out.print(&records, || {
                if records.is_empty() {
                    return format!("No weight logged for {} yet", cat.name);
                }
                records
                    .iter()
                    .map(|r| format!("{}  {} {}", r.date, r.weight_in(unit), unit))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        WeightCommand::Status => {
            let status = WeightService::status(repo, cat.id)?;
            let trend = WeightService::trend(repo, cat.id)?;
            #[derive(Serialize)]
            struct StatusView<'a> {
                status: &'a WeightStatus,
                trend: &'a Option<happy_kitty_shared::history::WeightTrend>,
            }
            let view = StatusView { status: &status, trend: &trend };
            out.print(&view, || {
                let mut lines = vec![format_weight_status(&status)];
                if let Some(t) = &trend {
                    lines.push(format!(
                        "Started at {} {}, change {:+} {}, 7-entry average {} {}",
                        t.start, t.unit, t.total_change, t.unit, t.recent_average, t.unit
                    ));
                }
                lines.join("\n")
            })
        }
    }
}

fn run_goal(
    repo: &mut dyn RecordRepository,
    cat: &Cat,
    command: GoalCommand,
    out: Output,
) -> AppResult<()> {
    match command {
        GoalCommand::Set { min, max, unit } => {
            let unit = match unit {
                Some(unit) => unit,
                None => WeightService::preferred_unit(repo)?,
            };
            let input = GoalInput { min_weight: min, max_weight: max, unit };
            let goal = GoalService::set_goal(repo, cat.id, input)?;
            out.print(&goal, || {
                format!("Goal for {}: {} - {} {}", cat.name, goal.min_weight, goal.max_weight, goal.unit)
            })
        }
        GoalCommand::Show => {
            let goal = GoalService::get_goal(repo, cat.id)?;
            out.print(&goal, || match &goal {
                Some(g) => format!("Goal for {}: {} - {} {}", cat.name, g.min_weight, g.max_weight, g.unit),
                None => format!("No weight goal set for {}", cat.name),
            })
        }
        GoalCommand::Clear => {
            GoalService::clear_goal(repo, cat.id)?;
            out.print(&cat.id, || format!("Cleared weight goal for {}", cat.name))
        }
    }
}

fn print_questions(json: bool) -> AppResult<()> {
    Output { json }.print(&QUESTIONS, || {
        QUESTIONS
            .iter()
            .map(|q| {
                let options: Vec<String> = q
                    .options
                    .iter()
                    .map(|o| format!("    {:<16} {}", o.code, o.label))
                    .collect();
                format!("--{}  {}\n{}", q.category, q.prompt, options.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    })
}

fn init_config(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let rendered = AppConfig::default_toml().map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(path, rendered)?;
    println!("Wrote {}", path.display());
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

#[derive(Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn print<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce() -> String) -> AppResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

fn format_record(cat: &Cat, record: &HealthRecord) -> String {
    format!(
        "{} on {}: {}% ({}/80) {}\n{}",
        cat.name,
        record.date,
        record.percentage,
        record.score,
        record.status.label(),
        record.status.message()
    )
}

fn format_streak(streak: &happy_kitty_shared::StreakSummary) -> String {
    let mut line = format!(
        "Streak: {} day(s), best {}",
        streak.current, streak.longest
    );
    if streak.on_fire() {
        line.push_str(" - on fire!");
    }
    if streak.personal_best() {
        line.push_str(" - personal best");
    }
    if streak.needs_check_in() {
        line.push_str(" - check in today to keep it going");
    }
    line
}

fn format_weight_status(status: &WeightStatus) -> String {
    match status {
        WeightStatus::NoGoal => "Weight: no goal set".to_string(),
        WeightStatus::NoWeight { .. } => "Weight: goal set, nothing logged yet".to_string(),
        WeightStatus::InRange { current, unit, goal } => {
            let (min, max) = goal.range_in(*unit);
            format!("Weight: {} {} (in range {} - {} {})", current, unit, min, max, unit)
        }
        WeightStatus::Underweight { current, unit, goal, deviation } => {
            let (min, max) = goal.range_in(*unit);
            format!(
                "Weight: {} {} is {} {} below the goal range {} - {} {}",
                current, unit, deviation, unit, min, max, unit
            )
        }
        WeightStatus::Overweight { current, unit, goal, deviation } => {
            let (min, max) = goal.range_in(*unit);
            format!(
                "Weight: {} {} is {} {} above the goal range {} - {} {}",
                current, unit, deviation, unit, min, max, unit
            )
        }
    }
}

fn format_tips(report: &TipReport) -> String {
    match report {
        TipReport::Pending => "Complete today's check to get tips".to_string(),
        TipReport::AllClear => "All answers look great. No tips today!".to_string(),
        TipReport::Advice(tips) => tips
            .iter()
            .map(|tip| {
                let suggestions: Vec<String> =
                    tip.tips.iter().map(|s| format!("  - {}", s)).collect();
                format!("[{}] {}\n{}", tip.urgency, tip.title, suggestions.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_args_build_sheet() {
        let cli = Cli::parse_from([
            "happy-kitty", "check", "--eating", "2-3", "--water", "normal", "--poop", "soft",
        ]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        let sheet = args.sheet().unwrap();
        assert_eq!(sheet.answered_count(), 3);
        assert_eq!(sheet.get(HealthCategory::Poop), Some("soft"));
        assert!(sheet.finalize().is_err());
    }

    #[test]
    fn test_check_args_reject_unknown_code() {
        let cli = Cli::parse_from(["happy-kitty", "check", "--poop", "sparkly"]);
        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        let err = args.sheet().unwrap_err();
        assert!(err.to_string().contains("normal, soft, diarrhea, no-poop"));
    }

    #[test]
    fn test_global_cat_flag_and_unit_parsing() {
        let id = Uuid::new_v4();
        let id_arg = id.to_string();
        let cli = Cli::parse_from([
            "happy-kitty", "weight", "log", "9.4", "--unit", "lbs", "--cat", id_arg.as_str(),
        ]);
        assert_eq!(cli.cat, Some(id));
        match cli.command {
            Commands::Weight(WeightCommand::Log { weight, unit, date }) => {
                assert_eq!(weight, 9.4);
                assert_eq!(unit, Some(WeightUnit::Lbs));
                assert!(date.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_weight_status_text() {
        let goal = happy_kitty_shared::WeightGoal {
            cat_id: Uuid::nil(),
            min_weight: 3.5,
            max_weight: 5.5,
            unit: WeightUnit::Kg,
        };
        let status = WeightStatus::Underweight {
            current: 3.0,
            unit: WeightUnit::Kg,
            goal,
            deviation: 0.5,
        };
        assert_eq!(
            format_weight_status(&status),
            "Weight: 3 kg is 0.5 kg below the goal range 3.5 - 5.5 kg"
        );
    }
}
