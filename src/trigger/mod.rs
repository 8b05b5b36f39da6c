pub mod agent;
pub mod runner;
