//! Embedded rule sets.
//!
//! Patterns are matched case-insensitively against the whole string. Most of
//! them share the same tail: free text followed by an optional `-GROUP`
//! suffix. The look-behinds make sure the dash of a `WEB-DL` style token is not
//! taken for the release group separator.

use super::{RuleDefinition, RuleTest};

fn rule(name: &str, pattern: &str, tests: Vec<RuleTest>) -> RuleDefinition {
    RuleDefinition {
        name: name.to_string(),
        pattern: pattern.to_string(),
        tests,
    }
}

/// Rules for regular TV releases, most specific first
pub(super) fn standard() -> Vec<RuleDefinition> {
    vec![
        // Show.Name.S01E02.S01E03.Source.Quality.Etc-Group
        rule(
            "standard_repeat",
            r"(?i)^(?P<series_name>.+?)[. _-]+s(?P<season_num>\d+)[. _-]*e(?P<ep_num>\d+)(?:[. _-]+s\d+[. _-]*e(?P<extra_ep_num>\d+))+[. _-]*(?:(?P<extra_info>.+?)(?:(?<![. _-])(?<!WEB)-(?P<release_group>[^ -]+))?)?$",
            vec![
                RuleTest::hit(
                    "Show.Name.S01E02.S01E03.Source.Quality.Etc-Group",
                    &[
                        ("series_name", "Show.Name"),
                        ("season_num", "01"),
                        ("ep_num", "02"),
                        ("extra_ep_num", "03"),
                        ("extra_info", "Source.Quality.Etc"),
                        ("release_group", "Group"),
                    ],
                ),
                RuleTest::hit(
                    "Show Name - S01E02 - S01E03 - S01E04 - Ep Name",
                    &[
                        ("series_name", "Show Name"),
                        ("ep_num", "02"),
                        ("extra_ep_num", "04"),
                        ("extra_info", "Ep Name"),
                    ],
                ),
                RuleTest::miss("Show.Name.S01E02.Source.Quality.Etc-Group"),
            ],
        ),
        // Show.Name.1x02.1x03.Source.Quality.Etc-Group
        rule(
            "fov_repeat",
            r"(?i)^(?P<series_name>.+?)[. _-]+(?P<season_num>\d+)x(?P<ep_num>\d+)(?:[. _-]+\d+x(?P<extra_ep_num>\d+))+[. _-]*(?:(?P<extra_info>.+?)(?:(?<![. _-])(?<!WEB)-(?P<release_group>[^ -]+))?)?$",
            vec![
                RuleTest::hit(
                    "Show.Name.1x02.1x03.Source.Quality.Etc-Group",
                    &[
                        ("series_name", "Show.Name"),
                        ("season_num", "1"),
                        ("ep_num", "02"),
                        ("extra_ep_num", "03"),
                        ("extra_info", "Source.Quality.Etc"),
                        ("release_group", "Group"),
                    ],
                ),
                RuleTest::hit(
                    "Show Name - 1x02 - 1x03 - Ep Name",
                    &[("ep_num", "02"), ("extra_ep_num", "03"), ("extra_info", "Ep Name")],
                ),
                RuleTest::miss("Show.Name.1x02.Source.Quality.Etc-Group"),
            ],
        ),
        // Show.Name.S01E02.Source.Quality.Etc-Group, Show.Name.S01E02E03
        rule(
            "standard",
            r"(?i)^(?:(?P<series_name>.+?)[. _-]+)?s(?P<season_num>\d+)[. _-]*e(?P<ep_num>\d+)(?:(?:[. _-]*e|-)(?P<extra_ep_num>(?!(?:1080|720|480)[pi])\d+))*(?:[. _-]+(?P<extra_info>.+?)?(?:(?<![. _-])(?<!WEB)-(?P<release_group>[^ -]+))?)?$",
            vec![
                RuleTest::hit(
                    "Show.Name.S01E02.Source.Quality.Etc-Group",
                    &[
                        ("series_name", "Show.Name"),
                        ("season_num", "01"),
                        ("ep_num", "02"),
                        ("extra_info", "Source.Quality.Etc"),
                        ("release_group", "Group"),
                    ],
                ),
                RuleTest::hit(
                    "Show.Name.S01E02E03.Source.Quality.Etc-Group",
                    &[("ep_num", "02"), ("extra_ep_num", "03"), ("release_group", "Group")],
                ),
                RuleTest::hit(
                    "Show Name - S01E02 - My Ep Name",
                    &[("series_name", "Show Name"), ("extra_info", "My Ep Name")],
                ),
                RuleTest::hit(
                    "S01E02.720p",
                    &[("season_num", "01"), ("ep_num", "02"), ("extra_info", "720p")],
                ),
                RuleTest::miss("Show.Name.1x02.Source.Quality.Etc-Group"),
            ],
        ),
        // Show_Name.1x02.Source_Quality_Etc-Group
        rule(
            "fov",
            r"(?i)^(?:(?P<series_name>.+?)[\[. _-]+)?(?P<season_num>\d+)x(?P<ep_num>\d+)(?:(?:[. _-]*x|-)(?P<extra_ep_num>(?!(?:1080|720|480)[pi]|264)\d+))*\]?(?:[. _-]+(?P<extra_info>.+?)?(?:(?<![. _-])(?<!WEB)-(?P<release_group>[^ -]+))?)?$",
            vec![
                RuleTest::hit(
                    "Show_Name.1x02.Source_Quality_Etc-Group",
                    &[
                        ("series_name", "Show_Name"),
                        ("season_num", "1"),
                        ("ep_num", "02"),
                        ("extra_info", "Source_Quality_Etc"),
                        ("release_group", "Group"),
                    ],
                ),
                RuleTest::hit(
                    "Show Name 1x02x03 x264",
                    &[
                        ("series_name", "Show Name"),
                        ("ep_num", "02"),
                        ("extra_ep_num", "03"),
                        ("extra_info", "x264"),
                    ],
                ),
                RuleTest::miss("Show.Name.S01E02"),
            ],
        ),
        // Show.Name.2010.11.23.Source.Quality.Etc-Group
        rule(
            "scene_date_format",
            r"(?i)^(?:(?P<series_name>.+?)[. _-]+)?(?P<air_date>\d{4}[. _-]\d{2}[. _-]\d{2}|\d{2}[. _-]\d{2}[. _-]\d{4})[. _-]*(?:(?P<extra_info>.+?)(?:(?<![. _-])(?<!WEB)-(?P<release_group>[^ -]+))?)?$",
            vec![
                RuleTest::hit(
                    "Show.Name.2010.11.23.Source.Quality.Etc-Group",
                    &[
                        ("series_name", "Show.Name"),
                        ("air_date", "2010.11.23"),
                        ("extra_info", "Source.Quality.Etc"),
                        ("release_group", "Group"),
                    ],
                ),
                RuleTest::hit(
                    "Show Name - 2010-11-23 - Ep Name",
                    &[("series_name", "Show Name"), ("air_date", "2010-11-23"), ("extra_info", "Ep Name")],
                ),
                RuleTest::hit("Show.Name.11.23.2010.HDTV", &[("air_date", "11.23.2010"), ("extra_info", "HDTV")]),
                RuleTest::miss("Show.Name.S01E02.Source"),
            ],
        ),
        // tpz-abc102
        rule(
            "stupid",
            r"(?i)^(?P<release_group>.+?)-\w+?[. ]?(?!264)(?P<season_num>\d{1,2})(?P<ep_num>\d{2})$",
            vec![
                RuleTest::hit(
                    "tpz-abc102",
                    &[("release_group", "tpz"), ("season_num", "1"), ("ep_num", "02")],
                ),
                RuleTest::miss("Show.Name.S01E02"),
            ],
        ),
        // Season 1, S02 (season folders)
        rule(
            "season_folder",
            r"(?i)^(?:season|series|s)[. _-]*(?P<season_num>\d+)$",
            vec![
                RuleTest::hit("Season 1", &[("season_num", "1")]),
                RuleTest::hit("S02", &[("season_num", "02")]),
                RuleTest::miss("Specials"),
            ],
        ),
        // Show Name Season 1 Episode 2 Ep Name
        rule(
            "verbose",
            r"(?i)^(?P<series_name>.+?)[. _-]+season[. _-]+(?P<season_num>\d+)[. _-]+episode[. _-]+(?P<ep_num>\d+)[. _-]+(?P<extra_info>.+)$",
            vec![
                RuleTest::hit(
                    "Show Name Season 1 Episode 2 Ep Name",
                    &[
                        ("series_name", "Show Name"),
                        ("season_num", "1"),
                        ("ep_num", "2"),
                        ("extra_info", "Ep Name"),
                    ],
                ),
                RuleTest::miss("Show Name Season 1"),
            ],
        ),
        // Show.Name.S01.Source.Quality.Etc-Group
        rule(
            "season_only",
            r"(?i)^(?P<series_name>.+?)[. _-]+s(?:eason[. _-])?(?P<season_num>\d+)[. _-]*(?:(?P<extra_info>.+?)(?:(?<![. _-])(?<!WEB)-(?P<release_group>[^ -]+))?)?$",
            vec![
                RuleTest::hit(
                    "Show.Name.S01.Source.Quality.Etc-Group",
                    &[
                        ("series_name", "Show.Name"),
                        ("season_num", "01"),
                        ("extra_info", "Source.Quality.Etc"),
                        ("release_group", "Group"),
                    ],
                ),
                RuleTest::hit("Show Name Season 2", &[("series_name", "Show Name"), ("season_num", "2")]),
                RuleTest::miss("Show.Name.1x02"),
            ],
        ),
        // Show.Name.E02-03, Show Name Ep 1 & 2
        rule(
            "no_season_multi_ep",
            r"(?i)^(?:(?P<series_name>.+?)[. _-]+)?(?:e(?:p(?:isode)?)?|part|pt)[. _-]?(?P<ep_num>\d+|[ivx]+)[. _-]*[-&][. _-]*(?:e(?:p(?:isode)?)?|part|pt)?[. _-]?(?P<extra_ep_num>\d+)[. _-]*(?:(?P<extra_info>.+?)(?:(?<![. _-])(?<!WEB)-(?P<release_group>[^ -]+))?)?$",
            vec![
                RuleTest::hit(
                    "Show.Name.E02-03",
                    &[("series_name", "Show.Name"), ("ep_num", "02"), ("extra_ep_num", "03")],
                ),
                RuleTest::hit(
                    "Show Name Ep 1 & 2 HDTV",
                    &[
                        ("series_name", "Show Name"),
                        ("ep_num", "1"),
                        ("extra_ep_num", "2"),
                        ("extra_info", "HDTV"),
                    ],
                ),
                RuleTest::miss("Show.Name.E02"),
            ],
        ),
        // Show.Name.E23.Test, Show.Name.Part.3.Source.Quality.Etc-Group
        rule(
            "no_season_general",
            r"(?i)^(?:(?P<series_name>.+?)[. _-]+)?(?:e(?:p(?:isode)?)?|part|pt)[. _-]?(?P<ep_num>\d+|[ivx]+)(?:[. _-]*(?:-|and|&|to)[. _-]*(?:e(?:p(?:isode)?)?|part|pt)?[. _-]?(?P<extra_ep_num>\d+))*[. _-]*(?:(?P<extra_info>.+?)(?:(?<![. _-])(?<!WEB)-(?P<release_group>[^ -]+))?)?$",
            vec![
                RuleTest::hit(
                    "Show.Name.E23.Test",
                    &[("series_name", "Show.Name"), ("ep_num", "23"), ("extra_info", "Test")],
                ),
                RuleTest::hit(
                    "Show.Name.Part.3.Source.Quality.Etc-Group",
                    &[
                        ("series_name", "Show.Name"),
                        ("ep_num", "3"),
                        ("extra_info", "Source.Quality.Etc"),
                        ("release_group", "Group"),
                    ],
                ),
                RuleTest::hit("Show.Name.Part.IV", &[("series_name", "Show.Name"), ("ep_num", "IV")]),
                RuleTest::miss("Show.Name.S01E02"),
            ],
        ),
        // Show.Name.102.Source.Quality.Etc-Group
        rule(
            "bare",
            r"(?i)^(?P<series_name>.+?)[. _-]+(?P<season_num>\d{1,2})(?P<ep_num>\d{2})(?:[. _-]+(?P<extra_info>(?!\d{3}[. _-]+)[^-]+)(?:-(?P<release_group>.+))?)?$",
            vec![
                RuleTest::hit(
                    "Show.Name.102.Source.Quality.Etc-Group",
                    &[
                        ("series_name", "Show.Name"),
                        ("season_num", "1"),
                        ("ep_num", "02"),
                        ("extra_info", "Source.Quality.Etc"),
                        ("release_group", "Group"),
                    ],
                ),
                RuleTest::miss("Show.Name.S01E02"),
            ],
        ),
        // Show Name - 01 - Ep Name
        rule(
            "no_season",
            r"(?i)^(?:(?P<series_name>.+?)[. _-]+)?(?P<ep_num>\d{1,3})(?!\d)(?:-(?P<extra_ep_num>\d{1,3})(?!\d))?(?:[. _-]+(?P<extra_info>.+?)?(?:(?<![. _-])(?<!WEB)-(?P<release_group>[^ -]+))?)?$",
            vec![
                RuleTest::hit(
                    "Show Name - 01 - Ep Name",
                    &[("series_name", "Show Name"), ("ep_num", "01"), ("extra_info", "Ep Name")],
                ),
                RuleTest::hit(
                    "Show.Name.12.Source.Quality.Etc-Group",
                    &[
                        ("series_name", "Show.Name"),
                        ("ep_num", "12"),
                        ("extra_info", "Source.Quality.Etc"),
                        ("release_group", "Group"),
                    ],
                ),
                RuleTest::hit("Show Name - 01-02", &[("ep_num", "01"), ("extra_ep_num", "02")]),
                RuleTest::miss("Show.Name"),
            ],
        ),
        // Breaking Bad (a show folder holding nothing but the name, never a hidden folder)
        rule(
            "series_only",
            r"(?i)^(?P<series_name>[^.\\/][^\\/]*)$",
            vec![
                RuleTest::hit("Breaking Bad", &[("series_name", "Breaking Bad")]),
                RuleTest::hit("Mr. Robot", &[("series_name", "Mr. Robot")]),
                RuleTest::miss("/tv/Breaking Bad"),
                RuleTest::miss(".tmpA1b2C3"),
                RuleTest::miss(".hidden"),
            ],
        ),
    ]
}

/// Anime rules, tried before the standard ones
pub(super) fn anime() -> Vec<RuleDefinition> {
    let mut rules = vec![
        // [Group] Show Name S2 - 05 [720p]
        rule(
            "anime_series_num",
            r"(?i)^\[(?P<release_group>[^\]]+)\][ ._-]*(?P<series_name>.+?)[ ._-]+(?:s|season[ ._-]*)(?P<series_num>\d+)[ ._-]+-[ ._-]+(?P<ep_ab_num>\d{1,3})(?:v(?P<version>\d))?(?:[ ._-]*\[(?P<extra_info>[^\]]+)\])?(?:[ ._-]*\[[0-9a-f]{8}\])?$",
            vec![
                RuleTest::hit(
                    "[Group] Show Name S2 - 05 [720p]",
                    &[
                        ("release_group", "Group"),
                        ("series_name", "Show Name"),
                        ("series_num", "2"),
                        ("ep_ab_num", "05"),
                        ("extra_info", "720p"),
                    ],
                ),
                RuleTest::hit(
                    "[Group] Show Name Season 2 - 13v2 [1080p][A1B2C3D4]",
                    &[("series_num", "2"), ("ep_ab_num", "13"), ("version", "2"), ("extra_info", "1080p")],
                ),
                RuleTest::miss("[Group] Show Name - 05 [720p]"),
            ],
        ),
        // [Group] Show Name - 13 [720p][ABCD1234]
        rule(
            "anime_standard",
            r"(?i)^\[(?P<release_group>[^\]]+)\][ ._-]*(?P<series_name>.+?)[ ._-]+(?P<ep_ab_num>\d{1,3})(?:-(?P<extra_ab_ep_num>\d{1,3}))?(?:v(?P<version>\d))?(?:[ ._-]*[\[(](?P<extra_info>[^\])]+)[\])])?(?:[ ._-]*\[[0-9a-f]{8}\])?$",
            vec![
                RuleTest::hit(
                    "[Group Name] Show Name - 13 [720p]",
                    &[
                        ("release_group", "Group Name"),
                        ("series_name", "Show Name"),
                        ("ep_ab_num", "13"),
                        ("extra_info", "720p"),
                    ],
                ),
                RuleTest::hit(
                    "[Group] Show_Name_-_02v2_[1080p][ABCD1234]",
                    &[
                        ("release_group", "Group"),
                        ("series_name", "Show_Name"),
                        ("ep_ab_num", "02"),
                        ("version", "2"),
                        ("extra_info", "1080p"),
                    ],
                ),
                RuleTest::hit(
                    "[Group] Show Name - 01-02 [480p]",
                    &[("ep_ab_num", "01"), ("extra_ab_ep_num", "02"), ("extra_info", "480p")],
                ),
                RuleTest::miss("Show Name - 13 [720p]"),
            ],
        ),
        // Show.Name.S01E05.105.720p (season numbering with the absolute number alongside)
        rule(
            "anime_sxxexx_absolute",
            r"(?i)^(?:\[(?P<release_group>[^\]]+)\][ ._-]*)?(?P<series_name>.+?)[ ._-]+s(?P<season_num>\d+)[ ._-]*e(?P<ep_num>\d+)[ ._-]+(?P<ep_ab_num>\d{1,3})(?:[ ._-]+(?P<extra_info>.+?))?$",
            vec![
                RuleTest::hit(
                    "Show.Name.S01E05.105.720p",
                    &[
                        ("series_name", "Show.Name"),
                        ("season_num", "01"),
                        ("ep_num", "05"),
                        ("ep_ab_num", "105"),
                        ("extra_info", "720p"),
                    ],
                ),
                RuleTest::miss("Show.Name.S01E05.720p"),
            ],
        ),
        // Show Name - 01 [720p], Show_Name_Ep_12
        rule(
            "anime_bare",
            r"(?i)^(?P<series_name>.+?)[ ._-]+(?:ep?[ ._-]?)?(?P<ep_ab_num>\d{1,3})(?:v(?P<version>\d))?(?:[ ._-]+[\[(]?(?P<extra_info>[^\])]+)[\])]?)?$",
            vec![
                RuleTest::hit(
                    "Show Name - 01 [720p]",
                    &[("series_name", "Show Name"), ("ep_ab_num", "01"), ("extra_info", "720p")],
                ),
                RuleTest::hit("Show_Name_Ep_12", &[("series_name", "Show_Name"), ("ep_ab_num", "12")]),
                RuleTest::miss("Show Name"),
            ],
        ),
    ];

    rules.extend(standard());
    rules
}
