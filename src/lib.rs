pub mod analyzers;
pub mod config;
pub mod error;
pub mod game;
pub mod output;
pub mod parser;
