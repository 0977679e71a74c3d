//! Integration tests for the resume screener

use chrono::NaiveDate;
use resume_screener::config::{ExperienceConfig, OutputFormat};
use resume_screener::input::InputManager;
use resume_screener::output::ReportGenerator;
use resume_screener::reference::ReferenceData;
use resume_screener::{ExperienceBand, Screener, ScreenerError};
use std::path::Path;

fn screener() -> Screener {
    let config = ExperienceConfig {
        inclusive_months: true,
        as_of: NaiveDate::from_ymd_opt(2024, 6, 15),
    };
    Screener::new(ReferenceData::embedded().unwrap(), &config).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("john doe"));
    assert!(text.contains("jan 2019 - dec 2021"));
    assert!(text.contains("node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("john doe"));
    assert!(text.contains("\nexperience\n"));
    assert!(text.contains("b.e. in computer engineering, 2018"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(ScreenerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_screen_fixture_resume_against_job() {
    let mut manager = InputManager::new();
    let resume = manager.extract_text(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    let job = manager.extract_text(Path::new("tests/fixtures/job_description.txt")).await.unwrap();

    let report = screener().screen(&resume, &job);

    assert_eq!(report.experience.experience_ranges.len(), 2);
    assert_eq!(report.experience.total_years, 5);
    assert_eq!(report.experience.total_months, 4);
    assert_eq!(report.experience.jd_required_years, 4);
    assert!(report.experience.meets_requirement);
    assert_eq!(report.experience_band, ExperienceBand::Experienced);

    assert_eq!(report.education.jd_detected, vec!["Bachelor (Computer)"]);
    assert_eq!(report.education.resume_detected.len(), 1);
    assert!(report.education.resume_detected[0].starts_with("BE"));
    assert!(report.education.matched);
    assert!(report.education.missing_groups.is_empty());
}

#[tokio::test]
async fn test_markdown_and_text_resumes_agree() {
    let mut manager = InputManager::new();
    let txt = manager.extract_text(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    let md = manager.extract_text(Path::new("tests/fixtures/sample_resume.md")).await.unwrap();
    let job = manager.extract_text(Path::new("tests/fixtures/job_description.txt")).await.unwrap();

    let screener = screener();
    let from_txt = screener.screen(&txt, &job);
    let from_md = screener.screen(&md, &job);
    assert_eq!(from_txt.experience, from_md.experience);
    assert_eq!(from_txt.education, from_md.education);
}

#[test]
fn test_three_year_range_meets_three_year_requirement() {
    let verdict = screener().extract_experience("Experience\nJan 2019 - Dec 2021\nSoftware Engineer", "3+ years required");
    assert_eq!(verdict.total_years, 3);
    assert_eq!(verdict.total_months, 0);
    assert_eq!(verdict.jd_required_years, 3);
    assert!(verdict.meets_requirement);
}

#[test]
fn test_branch_mismatch_is_reported_missing() {
    let verdict = screener().extract_education("BTech in Mechanical Engineering", "Bachelor in Computer Science");
    assert!(!verdict.matched);
    assert_eq!(verdict.resume_detected, vec!["BTech (Mechanical Engineering)"]);
    assert_eq!(verdict.missing_groups, vec!["Bachelor (Computer)"]);
}

#[test]
fn test_be_in_charge_is_not_a_degree_requirement() {
    let verdict = screener().extract_education(
        "BTech in Mechanical Engineering",
        "You will be in charge of deployments and me in meetings",
    );
    assert!(verdict.jd_detected.is_empty());
    assert!(verdict.missing_groups.is_empty());
    assert!(verdict.matched);
}

#[test]
fn test_fresher_phrase_means_no_requirement() {
    let verdict = screener().extract_experience("", "0-1 years, fresher welcome");
    assert_eq!(verdict.jd_required_years, 0);
    assert_eq!(verdict.jd_required_months, 0);
    assert!(verdict.meets_requirement);
}

#[test]
fn test_specialisation_collapses_to_computer_domain() {
    let verdict = screener().extract_education(
        "BE in Artificial Intelligence & Machine Learning",
        "Bachelor's degree in Computer Science required",
    );
    assert_eq!(verdict.resume_detected, vec!["BE (Computer)"]);
    assert!(verdict.matched);
}

#[test]
fn test_present_resolves_to_pinned_date() {
    let verdict = screener().extract_experience("Experience\nMar 2023 - Present", "");
    assert_eq!(verdict.total_in_months(), 16);
    assert_eq!(verdict.experience_ranges[0].end_label, "Present");
}

#[test]
fn test_ocr_damaged_years_are_repaired() {
    let clean = screener().extract_experience("Experience\nJan 2019 - Mar 2021", "");
    let damaged = screener().extract_experience("Experience\nJan 2O19 - Mar 202l", "");
    assert_eq!(clean.total_in_months(), 27);
    assert_eq!(damaged.total_in_months(), clean.total_in_months());
}

#[test]
fn test_adding_a_range_never_lowers_total() {
    let screener = screener();
    let one = screener.extract_experience("Experience\nJan 2019 - Dec 2019", "");
    let two = screener.extract_experience("Experience\nJan 2019 - Dec 2019\nJun 2020 - Aug 2020", "");
    assert_eq!(one.total_in_months(), 12);
    assert_eq!(two.total_in_months(), 15);
}

#[test]
fn test_implausible_requirement_does_not_discard_ranges() {
    let verdict = screener().extract_experience("Experience\nJan 2023 - Dec 2023", "minimum 357913942 years");
    assert_eq!(verdict.total_in_months(), 12);
    assert_eq!(verdict.experience_ranges.len(), 1);
    assert_eq!(verdict.jd_required_years, 0);
}

#[test]
fn test_screening_is_idempotent() {
    let screener = screener();
    let resume = "Experience\nJan 2020 - Jun 2021\n\nEducation\nMBA in Finance, 2019";
    let jd = "MBA required with at least 1 year of experience";
    let first = screener.screen(resume, jd);
    let second = screener.screen(resume, jd);
    assert_eq!(first.experience, second.experience);
    assert_eq!(first.education, second.education);
    assert_eq!(first.experience_band, second.experience_band);
}

#[test]
fn test_json_report_round_trips_verdicts() {
    let report = screener()
        .screen("Experience\nJan 2019 - Dec 2021", "3+ years required")
        .with_paths("cv.txt", "job.txt");
    let json = ReportGenerator::new().generate_report(&report, OutputFormat::Json).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["experience"]["total_years"], 3);
    assert_eq!(value["experience"]["meets_requirement"], true);
    assert_eq!(value["resume_path"], "cv.txt");
}
