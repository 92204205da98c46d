pub mod config;
pub mod llm;
pub mod sql;
pub mod util;
pub mod web;
