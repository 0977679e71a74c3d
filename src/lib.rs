//! Resume screener library
//!
//! Measures work experience from resume date ranges and matches degree
//! credentials against the requirements stated in a job description.

pub mod analyzer;
pub mod batch;
pub mod cli;
pub mod config;
pub mod document;
pub mod education;
pub mod error;
pub mod experience;
pub mod input;
pub mod output;
pub mod reference;

pub use analyzer::{ExperienceBand, ScreeningReport, Screener};
pub use config::Config;
pub use error::{Result, ScreenerError};
