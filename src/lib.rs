// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod logging;
pub mod persistence;
pub mod session;
pub use crate::core::engine::ImeEngine;
pub use crate::core::stores::LexicalStores;
pub use crate::core::types::{output_from_candidate, Candidate, FrequencyEntry};
pub use crate::error::{ImeError, Result};
pub use crate::session::{CompositionSession, HostAdapter, HostCall, KeyEvent, Modifiers};
