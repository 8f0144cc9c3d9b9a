pub mod report;
pub mod scenarios;
pub mod settings;
