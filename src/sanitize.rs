//! Normalization helpers for show names.
//!
//! `clean_series_name` is applied to every series name the parser extracts.
//! The scene-name variants build names suitable for provider search queries
//! and for punctuation-insensitive comparison.

use once_cell::sync::Lazy;
use regex::Regex;

static PATH_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\\/*]").unwrap());
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[:"<>|?]"#).unwrap());
static DOUBLE_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());
static REPEATED_DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
static LOOSE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[. -]+").unwrap());

const SCENE_BAD_CHARS: &[char] = &[',', ':', '(', ')', '!', '?', '\''];

/// Canonicalize a series name extracted from a release name.
///
/// Leading and trailing spaces/periods are trimmed, path-like separators become
/// dashes and characters that are invalid in file names are dropped.
pub fn clean_series_name(name: &str) -> String {
    let name = name.trim_matches(|c| c == ' ' || c == '.');

    let name = PATH_SEPARATORS.replace_all(name, "-");
    let name = DISALLOWED.replace_all(&name, "");

    // Substitution can leave "--" behind when the name already had a dash
    DOUBLE_DASH.replace_all(&name, "-").into_owned()
}

/// Build a dotted scene-style name, e.g. `"Show: Part (2)"` -> `"Show.Part.2"`.
pub fn sanitize_scene_name(name: &str) -> String {
    let mut name: String = name.chars().filter(|c| !SCENE_BAD_CHARS.contains(c)).collect();

    name = name
        .replace("- ", ".")
        .replace(' ', ".")
        .replace('&', "and")
        .replace('/', ".");

    let name = REPEATED_DOTS.replace_all(&name, ".");
    name.strip_suffix('.').unwrap_or(&name).to_string()
}

/// Lower-cased, space separated form of [`sanitize_scene_name`] for loose comparisons.
pub fn full_sanitize_scene_name(name: &str) -> String {
    let name = sanitize_scene_name(name);
    LOOSE_SEPARATORS
        .replace_all(&name, " ")
        .to_lowercase()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_series_name_trims_only_edges() {
        assert_eq!(clean_series_name("  The.Show  "), "The.Show");
        assert_eq!(clean_series_name("..Show Name. "), "Show Name");
    }

    #[test]
    fn test_clean_series_name_separators() {
        assert_eq!(clean_series_name("A/B\\C"), "A-B-C");
        assert_eq!(clean_series_name("Star*Wars"), "Star-Wars");
        assert_eq!(clean_series_name("A -/ B"), "A - B");
        assert_eq!(clean_series_name("A-/B"), "A-B");
    }

    #[test]
    fn test_clean_series_name_strips_disallowed() {
        assert_eq!(clean_series_name("Who? \"Me\": <Yes|No>"), "Who Me YesNo");
    }

    #[test]
    fn test_sanitize_scene_name() {
        assert_eq!(sanitize_scene_name("Show: Part (2)"), "Show.Part.2");
        assert_eq!(sanitize_scene_name("Law & Order"), "Law.and.Order");
        assert_eq!(sanitize_scene_name("Marvel's Agents - S.H.I.E.L.D."), "Marvels.Agents.S.H.I.E.L.D");
        assert_eq!(sanitize_scene_name("AC/DC Live"), "AC.DC.Live");
        assert_eq!(sanitize_scene_name("Hello, World!"), "Hello.World");
    }

    #[test]
    fn test_full_sanitize_scene_name() {
        assert_eq!(full_sanitize_scene_name("Show: Part (2)"), "show part 2");
        assert_eq!(full_sanitize_scene_name("The Office (US)"), "the office us");
        assert_eq!(full_sanitize_scene_name("Grey-s  Anatomy"), "grey s anatomy");
    }
}
