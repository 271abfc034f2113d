//! Cleaning stages: column-name normalization, value sanitization and
//! null-flag generation.

mod engine;
mod flags;
mod names;
mod passes;

pub use engine::CleanEngine;
pub use flags::{NULL_FLAG_SUFFIX, add_null_flags};
pub use names::{NameNormalizer, normalize_name};
pub use passes::{CleanConfig, CleanPass, CleanReport, PassChange};
