//! Release name parser.
//!
//! Every catalog rule is tried against the input. Each match becomes a scored
//! candidate: the baseline is minus the rule's index, plus one point per
//! identifying field (series name, series number, season, air date, release
//! group). The best scoring candidate wins; equal scores keep catalog order.

mod date;
pub mod reconcile;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::is_separator;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::{CaptureField, Catalog, PatternRule, RuleMatch};
use crate::error::{FieldError, ParseError};
use crate::media::split_extension;
use crate::quality::{Quality, QualityDetector, SceneQualityDetector};
use crate::sanitize::clean_series_name;

pub use reconcile::{MergeField, MergePolicy};

/// Structured information extracted from a release name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub original_name: String,
    pub series_name: String,
    pub season_number: i64,
    pub episode_numbers: Vec<i64>,
    pub extra_info: String,
    pub release_group: String,
    pub air_date: Option<NaiveDate>,
    pub absolute_episode_numbers: Vec<i64>,
    pub score: i64,
    pub quality: Quality,
    pub version: String,
    pub regex_used: String,
}

impl ParseResult {
    /// An empty result that only remembers what was parsed
    pub fn empty(original_name: &str) -> Self {
        Self {
            original_name: original_name.to_string(),
            ..Default::default()
        }
    }

    /// First episode number, falling back to the first absolute number, 0 when neither is known
    pub fn first_episode(&self) -> i64 {
        self.episode_numbers
            .first()
            .or_else(|| self.absolute_episode_numbers.first())
            .copied()
            .unwrap_or(0)
    }

    /// True when no identifying field was extracted
    pub fn is_empty(&self) -> bool {
        self.series_name.is_empty()
            && self.season_number == 0
            && self.episode_numbers.is_empty()
            && self.absolute_episode_numbers.is_empty()
            && self.air_date.is_none()
            && self.extra_info.is_empty()
            && self.release_group.is_empty()
            && self.version.is_empty()
    }
}

/// Parses release names and paths against a rule catalog
pub struct NameParser {
    catalog: Arc<Catalog>,
    quality: Arc<dyn QualityDetector>,
    policy: MergePolicy,
}

impl NameParser {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            quality: Arc::new(SceneQualityDetector),
            policy: MergePolicy::default(),
        }
    }

    pub fn with_quality_detector(mut self, detector: impl QualityDetector + 'static) -> Self {
        self.quality = Arc::new(detector);
        self
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn merge_policy(&self) -> &MergePolicy {
        &self.policy
    }

    /// Parse a bare release name, failing when no rule matches
    pub fn parse(&self, name: &str) -> Result<ParseResult, ParseError> {
        let mut result = self.parse_string(name).inspect_err(|e| warn!("{}", e))?;
        self.annotate_quality(&mut result, name);
        Ok(result)
    }

    /// Parse a bare release name, returning an empty result when no rule matches
    pub fn parse_lossy(&self, name: &str) -> ParseResult {
        let mut result = self
            .parse_string(name)
            .unwrap_or_else(|_| ParseResult::empty(name));
        self.annotate_quality(&mut result, name);
        result
    }

    /// Parse a file path, combining what the full path, the file name and the
    /// parent directory name each reveal
    pub fn parse_file(&self, path: &str) -> ParseResult {
        info!("Parsing '{}' for show information", path);

        let (dir_name, file_name) = match path.rfind(is_separator) {
            Some(i) => (&path[..i], &path[i + 1..]),
            None => ("", path),
        };
        let (file_stem, _) = split_extension(file_name);
        let dir_base = dir_name
            .trim_end_matches(is_separator)
            .rsplit(is_separator)
            .next()
            .unwrap_or_default();

        let slot = |name: &str| self.parse_string(name).unwrap_or_else(|_| ParseResult::empty(name));
        let full = slot(path);
        let file = slot(file_stem);
        let dir = slot(dir_base);

        let mut result = self.policy.reconcile(&full, &file, &dir);
        self.annotate_quality(&mut result, path);
        result
    }

    /// Try every rule and keep the best scoring candidate
    fn parse_string(&self, name: &str) -> Result<ParseResult, ParseError> {
        let mut candidates: Vec<ParseResult> = self
            .catalog
            .rules()
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                let found = rule.captures(name)?;
                debug!("Matched '{}' with rule {}", name, rule.name());
                build_candidate(rule, index, name, &found)
                    .inspect_err(|e| debug!("Skipping rule {} for '{}': {}", rule.name(), name, e))
                    .ok()
            })
            .collect();

        // Stable, so equal scores keep catalog order
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        match candidates.into_iter().next() {
            Some(best) => {
                info!("Chose rule {} with score {} for '{}'", best.regex_used, best.score, name);
                Ok(best)
            }
            None => {
                debug!("Couldn't match '{}' with any rule", name);
                Err(ParseError::NoMatch { input: name.to_string() })
            }
        }
    }

    fn annotate_quality(&self, result: &mut ParseResult, name: &str) {
        let quality = self.quality.detect(name);
        if quality.is_unknown() {
            warn!("Couldn't detect quality from '{}'", name);
        } else {
            debug!("Found quality {} for '{}'", quality, name);
        }
        result.quality = quality;
    }
}

/// Convert a numeric capture after stripping leading zeros. An all-zero
/// capture strips to nothing and fails like any other non-number.
fn parse_number(field: &'static str, raw: &str) -> Result<i64, FieldError> {
    let digits = raw.trim_start_matches('0');

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::Number { field, value: raw.to_string() });
    }
    digits.parse().map_err(|_| FieldError::Number { field, value: raw.to_string() })
}

fn build_candidate(
    rule: &PatternRule,
    index: usize,
    name: &str,
    found: &RuleMatch,
) -> Result<ParseResult, FieldError> {
    let mut result = ParseResult {
        original_name: name.to_string(),
        regex_used: rule.name().to_string(),
        score: -(index as i64),
        ..Default::default()
    };

    if let Some(series) = found.get(CaptureField::SeriesName) {
        result.series_name = clean_series_name(series);
        result.score += 1;
    }

    if found.contains(CaptureField::SeriesNum) {
        result.score += 1;
    }

    if let Some(season) = found.get(CaptureField::SeasonNum) {
        result.season_number = parse_number("season_num", season)?;
        result.score += 1;
    }

    if let Some(episode) = found.get(CaptureField::EpNum) {
        let episode = parse_number("ep_num", episode)?;
        result.episode_numbers = vec![episode];

        if let Some(extra) = found.get(CaptureField::ExtraEpNum) {
            match parse_number("extra_ep_num", extra) {
                Ok(extra) => result.episode_numbers.push(extra),
                Err(e) => debug!("Ignoring second episode for '{}': {}", name, e),
            }
        }
    }

    if let Some(absolute) = found.get(CaptureField::EpAbNum) {
        let absolute = parse_number("ep_ab_num", absolute)?;
        result.absolute_episode_numbers = vec![absolute];

        if let Some(extra) = found.get(CaptureField::ExtraAbEpNum) {
            match parse_number("extra_ab_ep_num", extra) {
                Ok(extra) => result.absolute_episode_numbers.push(extra),
                Err(e) => debug!("Ignoring second absolute episode for '{}': {}", name, e),
            }
        }
    }

    if let Some(air_date) = found.get(CaptureField::AirDate) {
        let date = date::parse_air_date(air_date).ok_or_else(|| FieldError::AirDate(air_date.to_string()))?;
        result.air_date = Some(date);
        result.score += 1;
    }

    if let Some(extra_info) = found.get(CaptureField::ExtraInfo) {
        result.extra_info = extra_info.to_string();
    }

    if let Some(group) = found.get(CaptureField::ReleaseGroup) {
        result.release_group = group.to_string();
        result.score += 1;
    }

    if let Some(version) = found.get(CaptureField::Version) {
        result.version = version.to_string();
    }

    Ok(result)
}
