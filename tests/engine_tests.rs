use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use tvname::catalog::{Catalog, RuleReport};
use tvname::media::{is_media_extension, is_media_file};
use tvname::sanitize::{clean_series_name, full_sanitize_scene_name, sanitize_scene_name};
use tvname::{MergePolicy, NameParser, ParseError, ParseResult, Quality, RuleSet};

fn standard() -> NameParser {
    NameParser::new(Arc::new(Catalog::standard().unwrap()))
}

fn anime() -> NameParser {
    NameParser::new(Arc::new(Catalog::anime().unwrap()))
}

fn custom(json: &str) -> NameParser {
    NameParser::new(Arc::new(Catalog::from_json(json, true).unwrap()))
}

#[test]
fn test_embedded_catalogs_verify() {
    for rule_set in [RuleSet::Standard, RuleSet::Anime] {
        let catalog = Catalog::for_rule_set(rule_set, true).unwrap();
        let reports = catalog.verify();
        assert_eq!(reports.len(), catalog.len());
        assert!(reports.iter().all(RuleReport::passed), "{:?}", reports);
    }
}

#[test]
fn test_parse_is_deterministic() {
    let parser = standard();
    let inputs = [
        "Show.Name.S01E02.720p.HDTV.x264-GRP",
        "Show Name - 1x03 - Ep Name",
        "Show.Name.2011.03.09.HDTV",
        "Show Name Part 3",
    ];
    for input in inputs {
        let first = parser.parse(input).unwrap();
        let second = parser.parse(input).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_earlier_rule_wins_equal_bonuses() {
    let parser = custom(
        r#"[
            {"name": "first", "pattern": "^(?P<series_name>[a-z]+)\\.(?P<ep_num>\\d+)$"},
            {"name": "second", "pattern": "^(?P<series_name>[a-z]+)\\.(?P<ep_num>\\d+)$"}
        ]"#,
    );
    let result = parser.parse("show.12").unwrap();
    assert_eq!(result.regex_used, "first");
    assert_eq!(result.score, 1);
}

#[test]
fn test_leading_zeros_are_stripped() {
    let result = standard().parse("Show.Name.S03E07").unwrap();
    assert_eq!(result.season_number, 3);
    assert_eq!(result.episode_numbers, vec![7]);
}

#[test]
fn test_multi_episode_and_degraded_secondary() {
    let parser = custom(r#"[{"name": "pair", "pattern": "^(?P<ep_num>\\w+)\\+(?P<extra_ep_num>\\w+)$"}]"#);
    assert_eq!(parser.parse("05+06").unwrap().episode_numbers, vec![5, 6]);
    assert_eq!(parser.parse("05+six").unwrap().episode_numbers, vec![5]);
    assert!(parser.parse("five+06").is_err());
}

#[test]
fn test_absolute_episode_failure_is_rule_fatal() {
    let parser = custom(
        r#"[
            {"name": "absolute", "pattern": "^(?P<ep_ab_num>[0-9a-z]+)$"},
            {"name": "fallback", "pattern": "^(?P<extra_info>.+)$"}
        ]"#,
    );
    let result = parser.parse("abc").unwrap();
    assert_eq!(result.regex_used, "fallback");
    assert!(result.absolute_episode_numbers.is_empty());

    let result = parser.parse("105").unwrap();
    assert_eq!(result.regex_used, "absolute");
    assert_eq!(result.absolute_episode_numbers, vec![105]);
}

#[test]
fn test_no_match_is_surfaced_by_parse_only() {
    let parser = custom(r#"[{"name": "digits", "pattern": "^(?P<ep_num>\\d+)$"}]"#);
    assert_eq!(
        parser.parse("Show Name"),
        Err(ParseError::NoMatch { input: "Show Name".to_string() })
    );

    let lossy = parser.parse_lossy("Show Name");
    assert!(lossy.is_empty());
    assert_eq!(lossy.original_name, "Show Name");

    let file = parser.parse_file("/tv/Show Name/Show Name.mkv");
    assert!(file.is_empty());
    assert_eq!(file.original_name, "/tv/Show Name/Show Name.mkv");
}

#[test]
fn test_directory_series_name_wins() {
    let result = standard().parse_file("/tv/Show X/S01E02.mkv");
    assert_eq!(result.series_name, "Show X");
    assert_eq!(result.season_number, 1);
    assert_eq!(result.episode_numbers, vec![2]);
}

#[test]
fn test_file_air_date_wins() {
    let result = standard().parse_file("/tv/Daily Show/Daily.Show.2010.11.23.mkv");
    assert_eq!(result.air_date, NaiveDate::from_ymd_opt(2010, 11, 23));
    assert_eq!(result.series_name, "Daily Show");
}

#[test]
fn test_merge_policy_is_configurable() {
    let policy = MergePolicy::prefer_directory(Vec::<String>::new()).unwrap();
    let result = standard()
        .with_merge_policy(policy)
        .parse_file("/tv/Breaking Bad/Breaking.Bad.S01E01.720p.mkv");
    assert_eq!(result.series_name, "Breaking.Bad");
}

#[test]
fn test_end_to_end_breaking_bad() {
    let result = standard().parse_file("/tv/Breaking Bad/Breaking.Bad.S01E01.720p.mkv");
    assert_eq!(result.series_name, "Breaking Bad");
    assert_eq!(result.season_number, 1);
    assert_eq!(result.episode_numbers, vec![1]);
    assert_eq!(result.regex_used, "standard");
    assert_ne!(result.quality, Quality::Unknown);
}

#[test]
fn test_anime_absolute_numbering() {
    let result = anime().parse("[Group] Show Name - 13 [720p]").unwrap();
    assert_eq!(result.regex_used, "anime_standard");
    assert_eq!(result.series_name, "Show Name");
    assert_eq!(result.release_group, "Group");
    assert_eq!(result.absolute_episode_numbers, vec![13]);
    assert_eq!(result.first_episode(), 13);
    assert_eq!(result.quality, Quality::Hdtv);
}

#[test]
fn test_concurrent_parsing_shares_catalog() {
    let parser = &standard();
    let names: Vec<String> = (1..=8).map(|e| format!("Show.Name.S01E{:02}.HDTV-GRP", e)).collect();

    let results: Vec<ParseResult> = std::thread::scope(|scope| {
        let handles: Vec<_> = names
            .iter()
            .map(|name| scope.spawn(move || parser.parse(name).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (index, result) in results.iter().enumerate() {
        assert_eq!(result.episode_numbers, vec![index as i64 + 1]);
    }
}

#[test]
fn test_catalog_from_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rules.json");
    let definitions = tvname::catalog::definitions(RuleSet::Standard);
    fs::write(&path, serde_json::to_string(&definitions).unwrap()).unwrap();

    let catalog = Catalog::from_json_file(&path, true).unwrap();
    assert_eq!(catalog.len(), definitions.len());
}

#[test]
fn test_sanitizer() {
    assert_eq!(clean_series_name("  The.Show  "), "The.Show");
    assert_eq!(clean_series_name("A/B\\C"), "A-B-C");
    assert_eq!(clean_series_name("A -/ B"), "A - B");
    assert_eq!(clean_series_name("A-/B"), "A-B");
    assert_eq!(sanitize_scene_name("Show: Part (2)"), "Show.Part.2");
    assert_eq!(full_sanitize_scene_name("Show: Part (2)"), "show part 2");
}

#[test]
fn test_media_classifier() {
    assert!(!is_media_file("movie-sample.mkv"));
    assert!(is_media_file("show.s01e01.mkv"));
    assert!(!is_media_file("._resource.avi"));
    assert!(!is_media_file("Show.Name.Extras.mkv"));
    assert!(is_media_extension("M2TS"));
}
