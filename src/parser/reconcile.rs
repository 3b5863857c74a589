//! Merging of the full-path, file-name and directory-name parses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseResult;
use crate::error::ReconcileError;

/// Uniform "nothing known" test used by the merge
pub trait Unset {
    fn is_unset(&self) -> bool;
}

impl Unset for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for Vec<i64> {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for i64 {
    fn is_unset(&self) -> bool {
        *self == 0
    }
}

impl Unset for Option<NaiveDate> {
    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

/// Take `preferred` if set, else `fallback`; an unset choice never overwrites `target`
fn merge_value<T: Unset + Clone>(target: &mut T, preferred: &T, fallback: &T) {
    let chosen = if preferred.is_unset() { fallback } else { preferred };
    if !chosen.is_unset() {
        *target = chosen.clone();
    }
}

/// Fields of a [`ParseResult`] that take part in reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeField {
    AirDate,
    AbsoluteEpisodeNumbers,
    SeasonNumber,
    EpisodeNumbers,
    SeriesName,
    ExtraInfo,
    ReleaseGroup,
    Version,
}

impl MergeField {
    pub const ALL: [MergeField; 8] = [
        MergeField::AirDate,
        MergeField::AbsoluteEpisodeNumbers,
        MergeField::SeasonNumber,
        MergeField::EpisodeNumbers,
        MergeField::SeriesName,
        MergeField::ExtraInfo,
        MergeField::ReleaseGroup,
        MergeField::Version,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MergeField::AirDate => "air_date",
            MergeField::AbsoluteEpisodeNumbers => "absolute_episode_numbers",
            MergeField::SeasonNumber => "season_number",
            MergeField::EpisodeNumbers => "episode_numbers",
            MergeField::SeriesName => "series_name",
            MergeField::ExtraInfo => "extra_info",
            MergeField::ReleaseGroup => "release_group",
            MergeField::Version => "version",
        }
    }

    /// Merge this one field of `preferred`/`fallback` into `target`
    pub fn merge(self, target: &mut ParseResult, preferred: &ParseResult, fallback: &ParseResult) {
        match self {
            MergeField::AirDate => merge_value(&mut target.air_date, &preferred.air_date, &fallback.air_date),
            MergeField::AbsoluteEpisodeNumbers => merge_value(
                &mut target.absolute_episode_numbers,
                &preferred.absolute_episode_numbers,
                &fallback.absolute_episode_numbers,
            ),
            MergeField::SeasonNumber => merge_value(
                &mut target.season_number,
                &preferred.season_number,
                &fallback.season_number,
            ),
            MergeField::EpisodeNumbers => merge_value(
                &mut target.episode_numbers,
                &preferred.episode_numbers,
                &fallback.episode_numbers,
            ),
            MergeField::SeriesName => merge_value(&mut target.series_name, &preferred.series_name, &fallback.series_name),
            MergeField::ExtraInfo => merge_value(&mut target.extra_info, &preferred.extra_info, &fallback.extra_info),
            MergeField::ReleaseGroup => merge_value(
                &mut target.release_group,
                &preferred.release_group,
                &fallback.release_group,
            ),
            MergeField::Version => merge_value(&mut target.version, &preferred.version, &fallback.version),
        }
    }
}

impl FromStr for MergeField {
    type Err = ReconcileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| ReconcileError::InvalidFieldSpecifier(name.to_string()))
    }
}

impl fmt::Display for MergeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which parse wins each field when the full-path parse is combined with the
/// file-name and directory-name parses.
///
/// Fields listed as directory-first take the directory value when it is set,
/// all other fields take the file-name value when it is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePolicy {
    directory_first: Vec<MergeField>,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            directory_first: vec![
                MergeField::SeriesName,
                MergeField::ExtraInfo,
                MergeField::ReleaseGroup,
                MergeField::Version,
            ],
        }
    }
}

impl MergePolicy {
    /// Build a policy from field names, failing on names outside the merge vocabulary
    pub fn prefer_directory<I, S>(names: I) -> Result<Self, ReconcileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut directory_first = Vec::new();
        for name in names {
            let field: MergeField = name.as_ref().parse()?;
            if !directory_first.contains(&field) {
                directory_first.push(field);
            }
        }
        Ok(Self { directory_first })
    }

    pub fn prefers_directory(&self, field: MergeField) -> bool {
        self.directory_first.contains(&field)
    }

    /// Build the final result, seeded from the full-path parse
    pub fn reconcile(&self, full: &ParseResult, file: &ParseResult, dir: &ParseResult) -> ParseResult {
        let mut merged = full.clone();
        for field in MergeField::ALL {
            if self.prefers_directory(field) {
                field.merge(&mut merged, dir, file);
            } else {
                field.merge(&mut merged, file, dir);
            }
        }
        merged
    }
}
