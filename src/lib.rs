#![forbid(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod volume;
pub mod web;
