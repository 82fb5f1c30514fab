//! Integration tests for the search engine.
//!
//! These tests run real searches over PNG files written to temporary
//! directories:
//! - Exact copies short-circuit the search
//! - Near matches are ranked by distance
//! - Broken, hidden and non-image files are handled
//! - Fatal errors for the reference and gallery roots

use assert_fs::prelude::*;
use image::{GrayImage, Luma};
use predicates::prelude::*;
use similar_search::core::comparator::Tolerance;
use similar_search::core::hasher::HashVariant;
use similar_search::core::reporter::{format_report, not_found_message};
use similar_search::core::search::{ExecutionMode, SearchEngine, SearchState};
use similar_search::error::{ScanError, SearchError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const MODES: [ExecutionMode; 2] = [
    ExecutionMode::Sequential,
    ExecutionMode::Parallel { workers: Some(3) },
];

/// Left half white, right half black, plus any extra white 8x8 blocks.
///
/// Under aHash each extra block in the right half flips exactly one bit.
fn write_halves(path: &Path, extra_white_blocks: &[(u32, u32)]) {
    GrayImage::from_fn(64, 64, |x, y| {
        if x < 32 || extra_white_blocks.contains(&(x / 8, y / 8)) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
    .save(path)
    .unwrap();
}

/// Top half white: 32 bits away from `write_halves` under aHash
fn write_unrelated(path: &Path) {
    GrayImage::from_fn(64, 64, |_, y| if y < 32 { Luma([255]) } else { Luma([0]) })
        .save(path)
        .unwrap();
}

struct Fixture {
    _dir: TempDir,
    reference: PathBuf,
    gallery: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let reference = dir.path().join("reference.png");
        write_halves(&reference, &[]);
        let gallery = dir.path().join("gallery");
        fs::create_dir(&gallery).unwrap();
        Self {
            _dir: dir,
            reference,
            gallery,
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.gallery.join(name)
    }
}

fn engine(mode: ExecutionMode) -> SearchEngine {
    SearchEngine::builder()
        .variant(HashVariant::Average)
        .mode(mode)
        .build()
        .unwrap()
}

fn names(outcome: &similar_search::core::search::SearchOutcome) -> Vec<(String, u32)> {
    outcome
        .result
        .iter()
        .map(|m| {
            (
                m.path.file_name().unwrap().to_string_lossy().into_owned(),
                m.distance,
            )
        })
        .collect()
}

#[test]
fn identical_copy_short_circuits() {
    let fixture = Fixture::new();
    fs::create_dir(fixture.path("nested")).unwrap();
    fs::copy(&fixture.reference, fixture.path("nested/copy.png")).unwrap();
    write_halves(&fixture.path("near.png"), &[(7, 7)]);
    write_unrelated(&fixture.path("unrelated.png"));

    for mode in MODES {
        let outcome = engine(mode)
            .search(&fixture.reference, &[fixture.gallery.clone()])
            .unwrap();

        assert_eq!(outcome.ended_with, SearchState::ExactMatch);
        assert!(outcome.found_exact_match());
        assert_eq!(names(&outcome), vec![("copy.png".to_string(), 0)]);
    }
}

#[test]
fn near_matches_are_ranked_closest_first() {
    let fixture = Fixture::new();
    write_halves(&fixture.path("two-off.png"), &[(6, 0), (7, 7)]);
    write_halves(&fixture.path("one-off.png"), &[(7, 7)]);
    write_unrelated(&fixture.path("unrelated.png"));

    for mode in MODES {
        let outcome = engine(mode)
            .search(&fixture.reference, &[fixture.gallery.clone()])
            .unwrap();

        assert_eq!(outcome.ended_with, SearchState::Exhausted);
        assert_eq!(
            names(&outcome),
            vec![("one-off.png".to_string(), 1), ("two-off.png".to_string(), 2)]
        );
        assert_eq!(outcome.summary.candidates_checked, 3);

        let report = format_report("reference.png", &outcome.result);
        assert!(predicate::str::starts_with("Images similar to reference.png:").eval(&report));
        assert!(predicate::str::contains("one-off.png (98.4%)").eval(&report));
        assert!(predicate::str::contains("two-off.png (96.9%)").eval(&report));
    }
}

#[test]
fn nothing_within_tolerance_reports_not_found() {
    let fixture = Fixture::new();
    write_unrelated(&fixture.path("unrelated.png"));

    let engine = SearchEngine::builder()
        .variant(HashVariant::Average)
        .tolerance(Tolerance::new(5).unwrap())
        .build()
        .unwrap();
    let outcome = engine
        .search(&fixture.reference, &[fixture.gallery.clone()])
        .unwrap();

    assert!(outcome.result.is_empty());
    assert_eq!(
        format_report("reference.png", &outcome.result),
        not_found_message("reference.png")
    );
}

#[test]
fn corrupt_and_non_image_files_are_skipped() {
    let fixture = Fixture::new();
    write_halves(&fixture.path("one-off.png"), &[(7, 7)]);
    // PNG magic followed by garbage: sniffs as an image, fails to decode
    let mut truncated = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    truncated.extend_from_slice(b"not really a png");
    fs::write(fixture.path("broken.png"), truncated).unwrap();
    fs::write(fixture.path("notes.txt"), "shopping list").unwrap();

    for mode in MODES {
        let outcome = engine(mode)
            .search(&fixture.reference, &[fixture.gallery.clone()])
            .unwrap();

        assert_eq!(names(&outcome), vec![("one-off.png".to_string(), 1)]);
        assert_eq!(outcome.summary.candidates_discovered, 2);
        assert_eq!(outcome.summary.candidates_skipped, 1);
    }
}

#[test]
fn hidden_entries_are_skipped_unless_requested() {
    let fixture = Fixture::new();
    fs::copy(&fixture.reference, fixture.path(".hidden-copy.png")).unwrap();
    write_halves(&fixture.path("one-off.png"), &[(7, 7)]);

    let outcome = engine(ExecutionMode::Sequential)
        .search(&fixture.reference, &[fixture.gallery.clone()])
        .unwrap();
    assert_eq!(names(&outcome), vec![("one-off.png".to_string(), 1)]);

    let outcome = SearchEngine::builder()
        .variant(HashVariant::Average)
        .mode(ExecutionMode::Sequential)
        .include_hidden(true)
        .build()
        .unwrap()
        .search(&fixture.reference, &[fixture.gallery.clone()])
        .unwrap();
    assert_eq!(names(&outcome), vec![(".hidden-copy.png".to_string(), 0)]);
}

#[test]
fn gallery_may_list_files_directly() {
    let fixture = Fixture::new();
    write_halves(&fixture.path("one-off.png"), &[(7, 7)]);
    write_halves(&fixture.path("two-off.png"), &[(6, 0), (7, 7)]);

    let outcome = engine(ExecutionMode::Sequential)
        .search(&fixture.reference, &[fixture.path("two-off.png")])
        .unwrap();

    assert_eq!(names(&outcome), vec![("two-off.png".to_string(), 2)]);
}

#[test]
fn every_variant_finds_an_identical_copy() {
    let fixture = Fixture::new();
    fs::copy(&fixture.reference, fixture.path("copy.png")).unwrap();

    for variant in [
        HashVariant::Average,
        HashVariant::Difference,
        HashVariant::Frequency,
    ] {
        let outcome = SearchEngine::builder()
            .variant(variant)
            .build()
            .unwrap()
            .search(&fixture.reference, &[fixture.gallery.clone()])
            .unwrap();

        assert_eq!(names(&outcome), vec![("copy.png".to_string(), 0)]);
    }
}

#[test]
fn invalid_reference_is_fatal() {
    let temp = assert_fs::TempDir::new().unwrap();
    let notes = temp.child("notes.png");
    notes.write_str("not an image at all").unwrap();

    let engine = engine(ExecutionMode::Sequential);

    for reference in [notes.path().to_path_buf(), temp.path().join("missing.png")] {
        let error = engine
            .search(&reference, &[temp.path().to_path_buf()])
            .unwrap_err();

        assert!(matches!(error, SearchError::InvalidReference { .. }));
        assert!(predicate::str::contains(reference.display().to_string())
            .eval(&error.to_string()));
    }
}

#[test]
fn missing_gallery_root_is_fatal() {
    let fixture = Fixture::new();

    let error = engine(ExecutionMode::Sequential)
        .search(&fixture.reference, &[fixture.path("does-not-exist")])
        .unwrap_err();

    assert!(matches!(
        error,
        SearchError::Scan(ScanError::RootNotFound { .. })
    ));
}

#[test]
fn binary_prints_matches_and_exits_zero() {
    let fixture = Fixture::new();
    write_halves(&fixture.path("one-off.png"), &[(7, 7)]);

    let output = Command::new(env!("CARGO_BIN_EXE_isearch"))
        .arg(&fixture.reference)
        .arg(&fixture.gallery)
        .args(["-a", "ahash", "-o", "minimal", "--sequential"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(predicate::str::contains("one-off.png").eval(&stdout));
}

#[test]
fn binary_pretty_output_is_the_formatted_report() {
    let fixture = Fixture::new();
    write_halves(&fixture.path("one-off.png"), &[(7, 7)]);
    write_halves(&fixture.path("two-off.png"), &[(6, 0), (7, 7)]);

    let output = Command::new(env!("CARGO_BIN_EXE_isearch"))
        .arg(&fixture.reference)
        .arg(&fixture.gallery)
        .args(["-a", "ahash", "--sequential"])
        .output()
        .unwrap();

    let outcome = engine(ExecutionMode::Sequential)
        .search(&fixture.reference, &[fixture.gallery.clone()])
        .unwrap();
    let expected = format_report(&fixture.reference.display().to_string(), &outcome.result);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), expected);
}

#[test]
fn binary_reports_no_match_and_exits_zero() {
    let fixture = Fixture::new();
    write_unrelated(&fixture.path("unrelated.png"));

    let output = Command::new(env!("CARGO_BIN_EXE_isearch"))
        .arg(&fixture.reference)
        .arg(&fixture.gallery)
        .args(["-a", "average", "-l", "5"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(predicate::str::contains("No similar image found").eval(&stdout));
}

#[test]
fn binary_rejects_invalid_reference() {
    let temp = assert_fs::TempDir::new().unwrap();
    let notes = temp.child("notes.txt");
    notes.write_str("hello").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_isearch"))
        .arg(notes.path())
        .arg(temp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(predicate::str::contains("is not a valid image").eval(&stderr));
    assert!(predicate::str::contains("notes.txt").eval(&stderr));
}

#[test]
fn binary_rejects_out_of_range_level() {
    let fixture = Fixture::new();

    let output = Command::new(env!("CARGO_BIN_EXE_isearch"))
        .arg(&fixture.reference)
        .arg(&fixture.gallery)
        .args(["--level", "11"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}
