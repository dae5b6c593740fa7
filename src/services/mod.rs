pub mod conflict_detector;
pub mod conflict_resolution;
pub mod schedule_utils;
pub mod settings_service;
pub mod slot_finder;
pub mod timetable_stats;
pub mod workload_analyzer;
pub mod workload_balancer;
