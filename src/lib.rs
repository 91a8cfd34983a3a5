pub mod cli;
pub mod client;
pub mod commands;
pub mod constants;
pub mod error;
pub mod protocol;
pub mod runner;
pub mod storage;

pub use client::{ServiceCall, SessionState, ThermAppCloud};
pub use commands::*;
pub use error::{CalibrationError, Result};
pub use protocol::{FileDescriptor, RequestBody, decode_created_date};
pub use runner::{Config, Summary, run};
