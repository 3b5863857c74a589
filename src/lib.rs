pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod media;
pub mod parser;
pub mod quality;
pub mod sanitize;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use catalog::Catalog;
pub use error::{CatalogError, ParseError, ReconcileError};
pub use parser::{MergeField, MergePolicy, NameParser, ParseResult};
pub use quality::{Quality, QualityDetector};

/// Embedded naming rule sets
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// Regular TV releases: SxxEyy, NxNN, air dates, season packs (default)
    #[default]
    Standard,
    /// Fansub releases with absolute numbering, then the standard rules
    Anime,
}
