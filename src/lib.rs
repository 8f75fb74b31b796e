pub mod config;
pub mod engine;
pub mod error;
pub mod mirror;
pub mod models;
pub mod recurrence;
pub mod remote;
pub mod scheduler;
pub mod shutdown;
pub mod source;
pub mod startup;
