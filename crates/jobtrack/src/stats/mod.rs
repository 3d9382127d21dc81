//! Aggregates over the full record collection.

pub mod goal;
pub mod kpi;

pub use goal::{
    count_in_period, window, GoalPeriod, GoalProgress, GoalSpec, GoalState, GoalTargets,
    GoalTrigger,
};
pub use kpi::Kpis;
