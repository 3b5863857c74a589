use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::media::is_media_file;
use crate::parser::{NameParser, ParseResult};
use crate::quality::Quality;

/// One media file and what could be read from its path
#[derive(Debug, Clone, Serialize)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub result: ParseResult,
}

/// Scan report containing every parsed media file
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub scan_path: PathBuf,
    pub scanned_files: usize,
    pub skipped_files: usize,
    pub files: Vec<ScannedFile>,
    pub scan_time: Duration,
}

impl ScanReport {
    /// Files that no rule could make sense of
    pub fn unmatched(&self) -> impl Iterator<Item = &ScannedFile> {
        self.files.iter().filter(|f| f.result.is_empty())
    }
}

/// Command to walk a media library and parse every episode file
pub struct ScanCommand {
    media_root: PathBuf,
    parser: NameParser,
    json: bool,
    output: Option<PathBuf>,
}

impl ScanCommand {
    pub fn new(media_root: PathBuf, parser: NameParser, json: bool, output: Option<PathBuf>) -> Self {
        Self {
            media_root,
            parser,
            json,
            output,
        }
    }

    /// Execute the scan and build the report
    pub async fn execute(&self) -> Result<ScanReport> {
        let start_time = Instant::now();

        if !self.media_root.exists() {
            return Err(anyhow!("Media directory does not exist: {:?}", self.media_root));
        }

        if !self.media_root.is_dir() {
            return Err(anyhow!("Path is not a directory: {:?}", self.media_root));
        }

        info!("🔎 Scanning directory: {:?}", self.media_root);

        let mut media_files = Vec::new();
        let mut skipped_files = 0;
        for entry in WalkDir::new(&self.media_root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if is_media_file(&file_name) {
                media_files.push(entry.path().to_path_buf());
            } else {
                debug!("Skipping non-episode file: {:?}", entry.path());
                skipped_files += 1;
            }
        }

        info!("Found {} media files, parsing in parallel...", media_files.len());

        let progress = ProgressBar::new(media_files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );

        let files: Vec<ScannedFile> = media_files
            .par_iter()
            .map(|path| {
                let result = self.parser.parse_file(&path.to_string_lossy());
                progress.inc(1);
                ScannedFile {
                    path: path.clone(),
                    result,
                }
            })
            .collect();

        progress.finish_and_clear();

        let report = ScanReport {
            scan_path: self.media_root.clone(),
            scanned_files: files.len(),
            skipped_files,
            files,
            scan_time: start_time.elapsed(),
        };

        info!(
            "✅ Scan complete. Parsed {} files ({} unmatched) in {:.2}s",
            report.scanned_files,
            report.unmatched().count(),
            report.scan_time.as_secs_f64()
        );

        if let Some(output) = &self.output {
            write_report(&report, output).await?;
        }

        Ok(report)
    }

    /// Print the report to stdout, as JSON when requested
    pub fn print_report(&self, report: &ScanReport) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }

        println!("\n📊 Scan Report");
        println!("═════════════");
        println!("📂 Scanned directory: {}", report.scan_path.display());
        println!("📁 Media files: {}", report.scanned_files);
        println!("🚫 Skipped files: {}", report.skipped_files);
        println!("⏱️  Scan time: {:.2}s", report.scan_time.as_secs_f64());

        let mut by_series: BTreeMap<&str, Vec<&ScannedFile>> = BTreeMap::new();
        for file in &report.files {
            by_series
                .entry(file.result.series_name.as_str())
                .or_default()
                .push(file);
        }

        for (series, files) in by_series {
            let series = if series.is_empty() { "(unknown series)" } else { series };
            println!("\n📺 {} ({} files)", series, files.len());
            for file in files {
                println!("   • {}", describe(file));
            }
        }

        let mut quality_counts: BTreeMap<String, usize> = BTreeMap::new();
        for file in &report.files {
            *quality_counts.entry(file.result.quality.to_string()).or_insert(0) += 1;
        }

        if !quality_counts.is_empty() {
            println!("\n📈 Quality Summary:");
            for (quality, count) in quality_counts {
                println!("• {}: {} files", quality, count);
            }
        }

        Ok(())
    }
}

async fn write_report(report: &ScanReport, output: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(output, json)
        .await
        .with_context(|| format!("Failed to write report to {:?}", output))?;
    info!("📝 Wrote scan report to {:?}", output);
    Ok(())
}

fn describe(file: &ScannedFile) -> String {
    let name = file
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let result = &file.result;

    let episode = if let Some(date) = result.air_date {
        date.to_string()
    } else if !result.episode_numbers.is_empty() {
        let episodes: Vec<String> = result.episode_numbers.iter().map(|e| format!("E{:02}", e)).collect();
        format!("S{:02}{}", result.season_number, episodes.join(""))
    } else if !result.absolute_episode_numbers.is_empty() {
        let episodes: Vec<String> = result.absolute_episode_numbers.iter().map(|e| e.to_string()).collect();
        format!("#{}", episodes.join("-"))
    } else if result.season_number > 0 {
        format!("S{:02}", result.season_number)
    } else {
        "?".to_string()
    };

    if result.quality == Quality::Unknown {
        format!("{} [{}]", episode, name)
    } else {
        format!("{} {} [{}]", episode, result.quality, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn parser() -> NameParser {
        NameParser::new(Arc::new(Catalog::standard().unwrap()))
    }

    #[tokio::test]
    async fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let scan_cmd = ScanCommand::new(temp_dir.path().to_path_buf(), parser(), false, None);

        let report = scan_cmd.execute().await.unwrap();
        assert_eq!(report.scanned_files, 0);
        assert_eq!(report.skipped_files, 0);
    }

    #[tokio::test]
    async fn test_scan_filters_and_parses() {
        let temp_dir = TempDir::new().unwrap();
        let season = temp_dir.path().join("Breaking Bad/Season 1");
        fs::create_dir_all(&season).unwrap();
        fs::write(season.join("Breaking.Bad.S01E01.720p.HDTV.x264-GRP.mkv"), "").unwrap();
        fs::write(season.join("Breaking.Bad.S01E01.720p.HDTV.x264-GRP.nfo"), "").unwrap();
        fs::write(season.join("breaking.bad.s01e01.sample.mkv"), "").unwrap();
        fs::write(season.join("._Breaking.Bad.S01E02.mkv"), "").unwrap();

        let scan_cmd = ScanCommand::new(temp_dir.path().to_path_buf(), parser(), false, None);
        let report = scan_cmd.execute().await.unwrap();

        assert_eq!(report.scanned_files, 1);
        assert_eq!(report.skipped_files, 3);
        let result = &report.files[0].result;
        assert_eq!(result.series_name, "Breaking.Bad");
        assert_eq!(result.season_number, 1);
        assert_eq!(result.episode_numbers, vec![1]);
        assert_eq!(result.release_group, "GRP");
    }

    #[tokio::test]
    async fn test_scan_writes_json_report() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Show.Name.S02E03.mkv"), "").unwrap();
        let output = temp_dir.path().join("report.json");

        let scan_cmd = ScanCommand::new(temp_dir.path().to_path_buf(), parser(), true, Some(output.clone()));
        scan_cmd.execute().await.unwrap();

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["scanned_files"], 1);
        assert_eq!(json["files"][0]["result"]["episode_numbers"][0], 3);
    }

    #[tokio::test]
    async fn test_scan_nonexistent_directory() {
        let scan_cmd = ScanCommand::new(PathBuf::from("/nonexistent/path"), parser(), false, None);
        assert!(scan_cmd.execute().await.is_err());
    }
}
