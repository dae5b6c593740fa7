pub mod event;
pub mod schedule;
pub mod settings;
pub mod stats;
pub mod time;
pub mod workload;
