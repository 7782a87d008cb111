pub mod actions;
pub mod analyzer;
pub mod config;
pub mod hook;
pub mod parser;
pub mod report;
pub mod scanner;
