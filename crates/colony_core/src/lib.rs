pub mod bill;
pub mod census;
pub mod config;
pub mod core_api;
pub mod item;
pub mod person;
pub mod record;
pub mod report;
pub mod rules;
pub mod snapshot;
pub mod spatial;
