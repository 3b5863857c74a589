//! Ordered, self-validating naming rules.
//!
//! A rule's position in the catalog is its priority: earlier rules win ties.
//! Every rule carries sample strings that are checked before the rule is
//! accepted, so a broken pattern never reaches the parser.

mod rules;

use fancy_regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::RuleSet;

/// The closed set of capture group names the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureField {
    SeriesName,
    SeasonNum,
    EpNum,
    ExtraEpNum,
    EpAbNum,
    ExtraAbEpNum,
    ExtraInfo,
    ReleaseGroup,
    AirDate,
    SeriesNum,
    Version,
}

impl CaptureField {
    pub const ALL: [CaptureField; 11] = [
        CaptureField::SeriesName,
        CaptureField::SeasonNum,
        CaptureField::EpNum,
        CaptureField::ExtraEpNum,
        CaptureField::EpAbNum,
        CaptureField::ExtraAbEpNum,
        CaptureField::ExtraInfo,
        CaptureField::ReleaseGroup,
        CaptureField::AirDate,
        CaptureField::SeriesNum,
        CaptureField::Version,
    ];

    /// Name of the regex group carrying this field
    pub fn group_name(self) -> &'static str {
        match self {
            CaptureField::SeriesName => "series_name",
            CaptureField::SeasonNum => "season_num",
            CaptureField::EpNum => "ep_num",
            CaptureField::ExtraEpNum => "extra_ep_num",
            CaptureField::EpAbNum => "ep_ab_num",
            CaptureField::ExtraAbEpNum => "extra_ab_ep_num",
            CaptureField::ExtraInfo => "extra_info",
            CaptureField::ReleaseGroup => "release_group",
            CaptureField::AirDate => "air_date",
            CaptureField::SeriesNum => "series_num",
            CaptureField::Version => "version",
        }
    }

    pub fn from_group_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.group_name() == name)
    }
}

/// Serializable description of a rule, as embedded or loaded from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub tests: Vec<RuleTest>,
}

/// A sample string bundled with a rule and what the rule must do with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTest {
    pub input: String,
    pub matches: bool,
    /// Expected captures, keyed by group name
    #[serde(default)]
    pub groups: BTreeMap<String, String>,
}

impl RuleTest {
    pub fn hit(input: &str, groups: &[(&str, &str)]) -> Self {
        Self {
            input: input.to_string(),
            matches: true,
            groups: groups
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn miss(input: &str) -> Self {
        Self {
            input: input.to_string(),
            matches: false,
            groups: BTreeMap::new(),
        }
    }
}

/// Non-empty captures of one successful rule match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMatch {
    fields: HashMap<CaptureField, String>,
}

impl RuleMatch {
    pub fn get(&self, field: CaptureField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: CaptureField) -> bool {
        self.fields.contains_key(&field)
    }
}

/// A compiled naming rule
pub struct PatternRule {
    name: String,
    regex: Regex,
    tests: Vec<RuleTest>,
}

impl fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRule")
            .field("name", &self.name)
            .field("pattern", &self.regex.as_str())
            .field("tests", &self.tests.len())
            .finish()
    }
}

impl PatternRule {
    /// Compile a rule definition. Self-tests are not run here, see [`PatternRule::self_test`].
    pub fn compile(definition: RuleDefinition) -> Result<Self, CatalogError> {
        let regex = Regex::new(&definition.pattern).map_err(|e| CatalogError::InvalidPattern {
            rule: definition.name.clone(),
            source: Box::new(e),
        })?;

        for group in regex.capture_names().flatten() {
            if CaptureField::from_group_name(group).is_none() {
                debug!("Rule '{}' has group '{}' outside the known fields, it will be ignored", definition.name, group);
            }
        }

        Ok(Self {
            name: definition.name,
            regex,
            tests: definition.tests,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn tests(&self) -> &[RuleTest] {
        &self.tests
    }

    /// Match the rule against the input and collect the known, non-empty captures
    pub fn captures(&self, input: &str) -> Option<RuleMatch> {
        let caps = match self.regex.captures(input) {
            Ok(Some(caps)) => caps,
            Ok(None) => return None,
            Err(e) => {
                warn!("Rule '{}' aborted matching '{}': {}", self.name, input, e);
                return None;
            }
        };

        let fields = CaptureField::ALL
            .into_iter()
            .filter_map(|field| {
                caps.name(field.group_name())
                    .map(|m| m.as_str())
                    .filter(|s| !s.is_empty())
                    .map(|s| (field, s.to_string()))
            })
            .collect();

        Some(RuleMatch { fields })
    }

    /// Run every bundled sample against the rule
    pub fn self_test(&self) -> Result<(), CatalogError> {
        for test in &self.tests {
            let fail = |reason: String| CatalogError::SelfTestFailed {
                rule: self.name.clone(),
                input: test.input.clone(),
                reason,
            };

            let Some(found) = self.captures(&test.input) else {
                if test.matches {
                    return Err(fail("expected a match".to_string()));
                }
                continue;
            };

            if !test.matches {
                return Err(fail("matched unexpectedly".to_string()));
            }

            for (group, expected) in &test.groups {
                let field = CaptureField::from_group_name(group)
                    .ok_or_else(|| fail(format!("unknown group '{}'", group)))?;
                let actual = found.get(field).unwrap_or_default();
                if actual != expected {
                    return Err(fail(format!(
                        "group '{}' captured '{}', expected '{}'",
                        group, actual, expected
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A rule that was dropped while loading, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRule {
    pub name: String,
    pub reason: String,
}

/// Outcome of re-running one rule's self-tests
#[derive(Debug, Clone, Serialize)]
pub struct RuleReport {
    pub name: String,
    pub tests: usize,
    pub error: Option<String>,
}

impl RuleReport {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Immutable, ordered list of validated rules
#[derive(Debug)]
pub struct Catalog {
    rules: Vec<PatternRule>,
    rejected: Vec<RejectedRule>,
}

impl Catalog {
    /// Compile and validate rule definitions, keeping their order.
    ///
    /// In strict mode the first broken rule aborts loading. Otherwise broken
    /// rules are left out and reported through [`Catalog::rejected`].
    pub fn load(definitions: Vec<RuleDefinition>, strict: bool) -> Result<Self, CatalogError> {
        let mut rules = Vec::with_capacity(definitions.len());
        let mut rejected = Vec::new();

        for definition in definitions {
            let name = definition.name.clone();
            let checked = PatternRule::compile(definition).and_then(|rule| {
                rule.self_test()?;
                Ok(rule)
            });

            match checked {
                Ok(rule) => rules.push(rule),
                Err(e) if strict => return Err(e),
                Err(e) => {
                    warn!("Rejecting naming rule '{}': {}", name, e);
                    rejected.push(RejectedRule {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if rules.is_empty() {
            return Err(CatalogError::Empty);
        }

        debug!("Loaded {} naming rules ({} rejected)", rules.len(), rejected.len());
        Ok(Self { rules, rejected })
    }

    /// The embedded rule set for regular TV releases
    pub fn standard() -> Result<Self, CatalogError> {
        Self::load(rules::standard(), false)
    }

    /// The embedded anime rule set (absolute numbering first, then the standard rules)
    pub fn anime() -> Result<Self, CatalogError> {
        Self::load(rules::anime(), false)
    }

    pub fn for_rule_set(rule_set: RuleSet, strict: bool) -> Result<Self, CatalogError> {
        let definitions = match rule_set {
            RuleSet::Standard => rules::standard(),
            RuleSet::Anime => rules::anime(),
        };
        Self::load(definitions, strict)
    }

    /// Load a catalog from a JSON array of rule definitions
    pub fn from_json(json: &str, strict: bool) -> Result<Self, CatalogError> {
        let definitions: Vec<RuleDefinition> = serde_json::from_str(json)?;
        Self::load(definitions, strict)
    }

    pub fn from_json_file(path: &Path, strict: bool) -> Result<Self, CatalogError> {
        info!("Loading naming rules from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, strict)
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn rejected(&self) -> &[RejectedRule] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Re-run every rule's self-tests and report per rule
    pub fn verify(&self) -> Vec<RuleReport> {
        self.rules
            .iter()
            .map(|rule| RuleReport {
                name: rule.name().to_string(),
                tests: rule.tests().len(),
                error: rule.self_test().err().map(|e| e.to_string()),
            })
            .collect()
    }
}

/// Definitions of an embedded rule set, for export or customization
pub fn definitions(rule_set: RuleSet) -> Vec<RuleDefinition> {
    match rule_set {
        RuleSet::Standard => rules::standard(),
        RuleSet::Anime => rules::anime(),
    }
}
