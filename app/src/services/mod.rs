//! Business logic services
//!
//! Services encapsulate business logic and coordinate between the core
//! engine and the record repository.

pub mod cats;
pub mod checkin;
pub mod export;
pub mod goals;
pub mod weight;

pub use cats::CatService;
pub use checkin::{CatOverview, CheckInService};
pub use export::{CatReport, ExportService};
pub use goals::GoalService;
pub use weight::WeightService;
