use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse release quality tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Unknown,
    Sdtv,
    Sddvd,
    Hdtv,
    RawHdtv,
    FullHdTv,
    HdWebDl,
    FullHdWebDl,
    HdBluray,
    FullHdBluray,
    UhdTv,
    UhdWebDl,
    UhdBluray,
}

/// Source of quality information for a release name.
///
/// The parser only needs a tier per name, so any implementation (a lookup
/// table, a smarter scorer, a test double) can be plugged in.
pub trait QualityDetector: Send + Sync {
    fn detect(&self, name: &str) -> Quality;
}

/// Default detector working off scene release tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneQualityDetector;

impl QualityDetector for SceneQualityDetector {
    fn detect(&self, name: &str) -> Quality {
        Quality::from_name(name)
    }
}

impl<F> QualityDetector for F
where
    F: Fn(&str) -> Quality + Send + Sync,
{
    fn detect(&self, name: &str) -> Quality {
        self(name)
    }
}

struct Tokens {
    sd_tv: Regex,
    sd_dvd: Regex,
    hd: Regex,
    hd_720: Regex,
    hd_1080p: Regex,
    hd_1080i: Regex,
    uhd: Regex,
    tv: Regex,
    web: Regex,
    bluray: Regex,
    avc: Regex,
    mpeg2: Regex,
}

static TOKENS: Lazy<Tokens> = Lazy::new(|| Tokens {
    sd_tv: Regex::new(r"(?i)(pdtv|hdtv|dsr|tvrip|sdtv)[. _-]?(xvid|x264|h\.?264|divx)").unwrap(),
    sd_dvd: Regex::new(r"(?i)(dvdrip|b[rd]rip|dvd)[. _-]?(xvid|divx|x264|h\.?264)").unwrap(),
    hd: Regex::new(r"(?i)(720p|1080[pi]|2160p|4k|uhd)").unwrap(),
    hd_720: Regex::new(r"(?i)720p").unwrap(),
    hd_1080p: Regex::new(r"(?i)1080p").unwrap(),
    hd_1080i: Regex::new(r"(?i)1080i").unwrap(),
    uhd: Regex::new(r"(?i)(2160p|\b4k\b|\buhd\b)").unwrap(),
    tv: Regex::new(r"(?i)(hdtv|pdtv|dsr|tvrip)").unwrap(),
    web: Regex::new(r"(?i)(web[. _-]?dl|webrip|web[. _-]?rip|\bweb\b)").unwrap(),
    bluray: Regex::new(r"(?i)(blu[. _-]?ray|hddvd|bdrip|brrip|bdremux|remux)").unwrap(),
    avc: Regex::new(r"(?i)(x264|h\.?264|x265|h\.?265|hevc|avc)").unwrap(),
    mpeg2: Regex::new(r"(?i)mpeg[. _-]?2").unwrap(),
});

impl Quality {
    /// Detect the quality tier from a release name, path or file name.
    ///
    /// Specific source and resolution combinations are tried first; a bare
    /// resolution token falls back to the matching TV tier.
    pub fn from_name(name: &str) -> Quality {
        let t = &*TOKENS;

        if !t.hd.is_match(name) {
            if t.sd_tv.is_match(name) {
                return Quality::Sdtv;
            }
            if t.sd_dvd.is_match(name) {
                return Quality::Sddvd;
            }
            return Quality::Unknown;
        }

        let web = t.web.is_match(name);
        let bluray = t.bluray.is_match(name);

        if t.uhd.is_match(name) {
            return if bluray {
                Quality::UhdBluray
            } else if web {
                Quality::UhdWebDl
            } else {
                Quality::UhdTv
            };
        }

        let is_1080p = t.hd_1080p.is_match(name);
        let is_720 = t.hd_720.is_match(name);

        if t.mpeg2.is_match(name) && (is_720 || t.hd_1080i.is_match(name)) && t.tv.is_match(name) {
            return Quality::RawHdtv;
        }

        if web {
            return if is_1080p { Quality::FullHdWebDl } else { Quality::HdWebDl };
        }

        if bluray && (t.avc.is_match(name) || !t.tv.is_match(name)) {
            return if is_1080p { Quality::FullHdBluray } else { Quality::HdBluray };
        }

        if is_1080p {
            Quality::FullHdTv
        } else if is_720 {
            Quality::Hdtv
        } else {
            // 1080i without a raw MPEG-2 marker
            Quality::FullHdTv
        }
    }

    pub fn is_unknown(self) -> bool {
        self == Quality::Unknown
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quality::Unknown => "Unknown",
            Quality::Sdtv => "SD TV",
            Quality::Sddvd => "SD DVD",
            Quality::Hdtv => "HD TV",
            Quality::RawHdtv => "RawHD TV",
            Quality::FullHdTv => "1080p HD TV",
            Quality::HdWebDl => "720p WEB-DL",
            Quality::FullHdWebDl => "1080p WEB-DL",
            Quality::HdBluray => "720p BluRay",
            Quality::FullHdBluray => "1080p BluRay",
            Quality::UhdTv => "4K UHD TV",
            Quality::UhdWebDl => "4K UHD WEB-DL",
            Quality::UhdBluray => "4K UHD BluRay",
        };
        f.write_str(label)
    }
}
