use anyhow::Result;
use tracing::{info, warn};

use crate::parser::{NameParser, ParseResult};

/// What the inputs of a parse command are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTarget {
    /// Bare release names
    Name,
    /// File paths, reconciled with their parent directory
    File,
}

/// Outcome of a parse command
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub results: Vec<ParseResult>,
    /// Inputs no rule matched
    pub failures: Vec<String>,
}

/// Command to parse release names or file paths given on the command line
pub struct ParseCommand {
    parser: NameParser,
    inputs: Vec<String>,
    target: ParseTarget,
    json: bool,
}

impl ParseCommand {
    pub fn new(parser: NameParser, inputs: Vec<String>, target: ParseTarget, json: bool) -> Self {
        Self {
            parser,
            inputs,
            target,
            json,
        }
    }

    pub fn execute(&self) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        for input in &self.inputs {
            match self.target {
                ParseTarget::Name => match self.parser.parse(input) {
                    Ok(result) => outcome.results.push(result),
                    Err(e) => {
                        warn!("⚠️ {}", e);
                        outcome.failures.push(input.clone());
                    }
                },
                ParseTarget::File => {
                    let result = self.parser.parse_file(input);
                    if result.is_empty() {
                        warn!("⚠️ Nothing could be read from '{}'", input);
                    }
                    outcome.results.push(result);
                }
            }
        }

        info!(
            "Parsed {} inputs, {} unmatched",
            self.inputs.len(),
            outcome.failures.len()
        );
        outcome
    }

    /// Print the results to stdout, as JSON when requested
    pub fn print_outcome(&self, outcome: &ParseOutcome) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome.results)?);
            return Ok(());
        }

        for result in &outcome.results {
            print_result(result);
        }
        for failure in &outcome.failures {
            println!("\n❌ {}\n   no naming rule matched", failure);
        }
        Ok(())
    }
}

/// Print one result as an aligned field listing, skipping unknown fields
pub fn print_result(result: &ParseResult) {
    println!("\n🎬 {}", result.original_name);

    let join = |numbers: &[i64]| {
        numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut fields: Vec<(&str, String)> = vec![
        ("series", result.series_name.clone()),
        ("episodes", join(&result.episode_numbers)),
        ("absolute", join(&result.absolute_episode_numbers)),
        ("air date", result.air_date.map(|d| d.to_string()).unwrap_or_default()),
        ("extra", result.extra_info.clone()),
        ("group", result.release_group.clone()),
        ("version", result.version.clone()),
        ("rule", result.regex_used.clone()),
    ];
    if result.season_number != 0 {
        fields.insert(1, ("season", result.season_number.to_string()));
    }
    if !result.quality.is_unknown() {
        fields.push(("quality", result.quality.to_string()));
    }

    for (label, value) in fields.into_iter().filter(|(_, value)| !value.is_empty()) {
        println!("   {:<9} {}", format!("{}:", label), value);
    }
}
