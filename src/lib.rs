pub use self::error::{Error, ErrorKind, Result};

pub mod error;
pub mod config;
pub mod domain;
pub mod service;
pub mod detector;
pub mod comparator;
pub mod report;
pub mod annotator;
pub mod tools;
