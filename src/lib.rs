pub mod config;
pub mod filter;
pub mod report;
pub mod runner;
