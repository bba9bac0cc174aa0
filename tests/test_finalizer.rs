//! Integration tests for finalization over real files and directories.

use std::fs;
use std::path::Path;

use page_reflow::config::ReflowConfig;
use page_reflow::error::Error;
use page_reflow::finalize::{read_section_log, Finalizer, Section};

fn section(content: &str) -> Section {
    Section {
        book_title: "A Book".to_string(),
        chapter_title: "Chapter 1".to_string(),
        subsection_title: "Opening".to_string(),
        content: content.to_string(),
    }
}

fn write_sections(path: &Path, sections: &[Section]) {
    let mut blob = String::new();
    for s in sections {
        blob.push_str(&serde_json::to_string(s).unwrap());
        blob.push('\n');
    }
    fs::write(path, blob).unwrap();
}

fn touch(path: &Path) {
    fs::write(path, b"not really an image").unwrap();
}

#[test]
fn test_inventory_is_natural_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("img10.png"));
    touch(&dir.path().join("img2.png"));
    touch(&dir.path().join("img1.png"));
    touch(&dir.path().join("notes.txt"));

    let finalizer = Finalizer::from_config(&ReflowConfig::default());
    let inventory = finalizer.build_inventory(dir.path());
    assert_eq!(inventory, vec!["img1.png", "img2.png", "img10.png"]);
}

#[test]
fn test_inventory_extension_filter_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("cover.PNG"));
    touch(&dir.path().join("cover.svg"));

    let finalizer = Finalizer::from_config(&ReflowConfig::default());
    let inventory = finalizer.build_inventory(dir.path());
    assert_eq!(inventory, vec!["cover.PNG"]);
}

#[test]
fn test_lexicographic_collation() {
    use page_reflow::config::Collation;

    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("img10.png"));
    touch(&dir.path().join("img2.png"));

    let config = ReflowConfig::default().with_inventory_collation(Collation::Lexicographic);
    let finalizer = Finalizer::from_config(&config);
    let inventory = finalizer.build_inventory(dir.path());
    assert_eq!(inventory, vec!["img10.png", "img2.png"]);
}

#[test]
fn test_missing_image_directory_is_not_fatal() {
    let finalizer = Finalizer::from_config(&ReflowConfig::default());
    let inventory = finalizer.build_inventory(Path::new("/does/not/exist"));
    assert!(inventory.is_empty());
}

#[test]
fn test_run_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    touch(&images.join("fig1.png"));
    touch(&images.join("fig2.png"));

    let log = dir.path().join("sections.jsonl");
    write_sections(
        &log,
        &[
            section("See [IMAGE_PLACEHOLDER_2] here."),
            section("And [IMAGE_PLACEHOLDER_5] is missing."),
        ],
    );

    let out = dir.path().join("resolved.jsonl");
    let finalizer = Finalizer::from_config(&ReflowConfig::default());
    let outcome = finalizer.run(&log, &images, &out).expect("finalize failed");

    assert_eq!(outcome.sections.len(), 2);
    assert!(outcome.sections[0].content.contains("![Image 2]"));
    assert!(outcome.sections[0].content.contains("fig2.png"));
    assert!(outcome.sections[1].content.contains("[IMAGE_PLACEHOLDER_5]"));
    assert_eq!(outcome.warnings.len(), 1);

    // Output file round-trips to the same records.
    let written = read_section_log(&out).unwrap();
    assert_eq!(written, outcome.sections);
}

#[test]
fn test_missing_section_log_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let finalizer = Finalizer::from_config(&ReflowConfig::default());
    let err = finalizer
        .run(
            &dir.path().join("nope.jsonl"),
            dir.path(),
            &dir.path().join("out.jsonl"),
        )
        .unwrap_err();
    assert!(matches!(err, Error::InputMissing(_)));
}

#[test]
fn test_empty_section_log_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("sections.jsonl");
    fs::write(&log, "\n\n").unwrap();

    let finalizer = Finalizer::from_config(&ReflowConfig::default());
    let err = finalizer
        .run(&log, dir.path(), &dir.path().join("out.jsonl"))
        .unwrap_err();
    assert!(matches!(err, Error::EmptySectionLog(_)));
}

#[test]
fn test_empty_image_directory_resolves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();

    let log = dir.path().join("sections.jsonl");
    write_sections(&log, &[section("[IMAGE_PLACEHOLDER_1]")]);

    let finalizer = Finalizer::from_config(&ReflowConfig::default());
    let outcome = finalizer
        .run(&log, &images, &dir.path().join("out.jsonl"))
        .unwrap();

    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.sections[0].content.contains("[IMAGE_PLACEHOLDER_1]"));
}
