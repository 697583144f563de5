pub mod stats_task;

pub use stats_task::StatsTask;
