use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Known video container and disc image extensions
const MEDIA_EXTENSIONS: &[&str] = &[
    "avi", "mkv", "mpg", "mpeg", "wmv", "ogm", "mp4", "iso", "img", "divx", "m2ts", "m4v", "ts",
    "flv", "f4v", "mov", "rmvb", "vob", "dvr-ms", "wtv", "ogv", "3gp", "webm",
];

static SAMPLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:^|[\W_])sample\d*[\W_]").unwrap());
static EXTRAS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)extras?$").unwrap());

/// Prefix of the AppleDouble files macOS leaves on foreign file systems
const RESOURCE_FORK_PREFIX: &str = "._";

/// Check if the given extension (with or without the leading dot) is a known media extension
pub fn is_media_extension(extension: &str) -> bool {
    let extension = extension.trim_start_matches('.').to_lowercase();
    MEDIA_EXTENSIONS.contains(&extension.as_str())
}

/// Check if a file name looks like a real episode rather than a sample, an extra or metadata
pub fn is_media_file(file_name: &str) -> bool {
    if SAMPLE_RE.is_match(file_name) {
        return false;
    }

    if file_name.starts_with(RESOURCE_FORK_PREFIX) {
        return false;
    }

    let (stem, extension) = split_extension(file_name);
    if EXTRAS_RE.is_match(stem) {
        return false;
    }

    extension.is_some_and(is_media_extension)
}

/// Split a file name into its stem and extension using the platform path rules
pub fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    let path = Path::new(file_name);
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if file_name.ends_with(ext) => {
            (&file_name[..file_name.len() - ext.len() - 1], Some(ext))
        }
        _ => (file_name, None),
    }
}
