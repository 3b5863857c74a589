use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use tvname::commands::scan::ScanCommand;
use tvname::{Catalog, NameParser};

fn standard_parser() -> NameParser {
    NameParser::new(Arc::new(Catalog::standard().unwrap()))
}

/// Mix of the naming styles found in a typical library
fn sample_paths(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            let show = format!("Test Show {}", i % 10);
            match i % 4 {
                0 => format!("/tv/{}/Season 1/Test.Show.{}.S01E{:02}.720p.HDTV.x264-GRP.mkv", show, i % 10, (i % 24) + 1),
                1 => format!("/tv/{}/Test Show {} - 1x{:02} - Episode {}.avi", show, i % 10, (i % 24) + 1, i),
                2 => format!("/tv/{}/Test.Show.{}.2010.11.{:02}.HDTV.mp4", show, i % 10, (i % 28) + 1),
                _ => format!("/anime/{}/[Group] Test Show {} - {:02} [1080p].mkv", show, i % 10, (i % 99) + 1),
            }
        })
        .collect()
}

fn create_test_media_library(size: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (i, path) in sample_paths(size).iter().enumerate() {
        let file_name = path.rsplit('/').next().unwrap();
        let dir = temp_dir.path().join(format!("Test Show {}", i % 10));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), "").unwrap();
    }
    temp_dir
}

fn bench_parse_names(c: &mut Criterion) {
    let parser = standard_parser();
    let name = "Show.Name.S03E07.720p.HDTV.x264-GRP";

    c.bench_function("parse_release_name", |b| {
        b.iter(|| black_box(parser.parse(black_box(name))))
    });
}

fn bench_parse_files(c: &mut Criterion) {
    let parser = standard_parser();
    let paths = sample_paths(100);

    c.bench_function("parse_file_100_paths", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(parser.parse_file(path));
            }
        });
    });
}

fn bench_scan(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let library = create_test_media_library(200);

    c.bench_function("scan_200_files", |b| {
        b.iter(|| {
            let scan_cmd = ScanCommand::new(library.path().to_path_buf(), standard_parser(), false, None);
            let report = rt.block_on(scan_cmd.execute()).unwrap();
            black_box(report);
        });
    });
}

criterion_group!(benches, bench_parse_names, bench_parse_files, bench_scan);
criterion_main!(benches);
