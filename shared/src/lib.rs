//! Happy Kitty Score Shared Library
//!
//! The scoring and health-state engine: turns a day's questionnaire answers
//! into a wellness score, evaluates weight against a goal range, and derives
//! streaks, tips and report figures. Everything here is pure and synchronous;
//! persistence lives in the app crate and the browser binding in the wasm crate.

pub mod errors;
pub mod history;
pub mod models;
pub mod questionnaire;
pub mod report;
pub mod scoring;
pub mod streak;
pub mod tips;
pub mod units;
pub mod validation;
pub mod weight_status;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use scoring::{calculate_health, HealthScore, MAX_SCORE};
pub use streak::{calculate_streak, StreakSummary};
pub use tips::{select_tips, HealthTip, TipReport, Urgency};
pub use units::*;
pub use weight_status::{evaluate_weight, WeightStatus};
