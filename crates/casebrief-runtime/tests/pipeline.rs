//! End-to-end behaviour of segmentation, summarization and batch runs.

use casebrief_core::{Section, SummaryConfig};
use casebrief_runtime::{
    assemble, parse, BatchRunner, CaseStatus, CaseSummarizer, DEFAULT_SUMMARY_FILE,
};

const EXAMPLE: &str = "DECISION\nThe facts are as follows.\nThe accused pleaded guilty.\nISSUES\nWhether or not the penalty applies.\nOUR RULING\nThe petition is denied.";

const CASE: &str = "PEOPLE OF THE PHILIPPINES v. JUAN DELA CRUZ

DECISION

The Antecedents

The accused was charged with murder before the Regional Trial Court.
On the night of the incident, the victim was walking home from a wake.
The accused approached the victim from behind and stabbed him twice.
A neighbor witnessed the stabbing and identified the accused in court.
The accused claimed that he was asleep at home when the stabbing happened.
The trial court convicted the accused of murder and imposed reclusion perpetua.
The Court of Appeals affirmed the conviction with modification as to damages.

The Issue

Whether the guilt of the accused was proven beyond reasonable doubt.

Our Ruling

The appeal lacks merit.
Treachery attended the killing because the attack was sudden and unexpected.
Alibi cannot prevail over the positive identification by a credible witness.
The award of damages is modified in line with prevailing jurisprudence.
SO ORDERED.
";

#[test]
fn test_example_segmentation() {
    let sections = CaseSummarizer::default().segment(EXAMPLE);
    assert_eq!(sections.get(Section::Title), ["DECISION"]);
    assert_eq!(
        sections.get(Section::Facts),
        ["The facts are as follows.", "The accused pleaded guilty."]
    );
    assert_eq!(
        sections.get(Section::Issues),
        ["ISSUES", "Whether or not the penalty applies."]
    );
    assert_eq!(sections.get(Section::Rulings), ["OUR RULING", "The petition is denied."]);
}

#[test]
fn test_lead_in_can_be_disabled() {
    let config = SummaryConfig {
        lead_in_headings: false,
        ..Default::default()
    };
    let sections = CaseSummarizer::new(config).unwrap().segment(EXAMPLE);
    assert_eq!(
        sections.get(Section::Title),
        ["DECISION", "The facts are as follows.", "The accused pleaded guilty."]
    );
    assert!(sections.get(Section::Facts).is_empty());
}

#[test]
fn test_no_headings_all_title() {
    let text = "Lorem ipsum dolor sit amet.\n\nConsectetur adipiscing elit.\nSed do eiusmod.";
    let sections = CaseSummarizer::default().segment(text);
    assert_eq!(sections.get(Section::Title).len(), 3);
    assert_eq!(sections.total_lines(), 3);
}

#[test]
fn test_summary_respects_fractions() {
    let summarizer = CaseSummarizer::default();
    let sections = summarizer.segment(CASE);
    let summary = summarizer.summarize_text(CASE).unwrap();

    for section in [Section::Facts, Section::Issues, Section::Rulings] {
        let n = sections.get(section).len();
        let bound = ((n as f64 * summarizer.config().keep_fraction(section)).floor() as usize).max(1);
        assert!(summary.get(section).len() <= bound, "{} over bound", section);
        for sentence in summary.get(section) {
            assert!(sections.get(section).contains(sentence));
        }
    }
    assert!(!summary.get(Section::Rulings).contains(&"Our Ruling".to_string()));
    assert!(!summary.get(Section::Facts).contains(&"The Antecedents".to_string()));
}

#[test]
fn test_idempotent_output() {
    let a = CaseSummarizer::default().summarize_to_string(CASE).unwrap();
    let b = CaseSummarizer::default().summarize_to_string(CASE).unwrap();
    assert_eq!(a, b);
    assert_eq!(assemble(&parse(&a)), a);
}

#[test]
fn test_document_order_option() {
    let config = SummaryConfig {
        preserve_document_order: true,
        ..Default::default()
    };
    let summarizer = CaseSummarizer::new(config).unwrap();
    let sections = summarizer.segment(CASE);
    let summary = summarizer.summarize_text(CASE).unwrap();

    let facts = sections.get(Section::Facts);
    let positions: Vec<usize> = summary
        .get(Section::Facts)
        .iter()
        .map(|s| facts.iter().position(|f| f == s).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_batch_isolates_failures() {
    let root = tempfile::tempdir().unwrap();
    let good = root.path().join("case_01");
    let missing = root.path().join("case_02");
    let broken = root.path().join("case_03");
    for dir in [&good, &missing, &broken] {
        std::fs::create_dir(dir).unwrap();
    }
    std::fs::write(good.join("court_case.txt"), CASE).unwrap();
    std::fs::write(broken.join("court_case.txt"), [0xffu8, 0xfe, 0x00, 0x80]).unwrap();

    let report = BatchRunner::new(CaseSummarizer::default()).run(root.path()).unwrap();

    assert_eq!(report.cases.len(), 3);
    assert_eq!((report.written, report.skipped, report.failed), (1, 1, 1));
    assert_eq!(report.cases[0].case, "case_01");
    assert!(matches!(report.cases[0].status, CaseStatus::Written { .. }));
    assert_eq!(report.cases[1].status, CaseStatus::Skipped);
    assert!(matches!(report.cases[2].status, CaseStatus::Failed { .. }));

    let written = std::fs::read_to_string(good.join(DEFAULT_SUMMARY_FILE)).unwrap();
    assert_eq!(written, CaseSummarizer::default().summarize_to_string(CASE).unwrap());
    assert!(!missing.join(DEFAULT_SUMMARY_FILE).exists());
}

#[test]
fn test_parallel_matches_serial() {
    let root = tempfile::tempdir().unwrap();
    for i in 0..6 {
        let dir = root.path().join(format!("case_{i:02}"));
        std::fs::create_dir(&dir).unwrap();
        if i != 3 {
            std::fs::write(dir.join("court_case.txt"), CASE.replace("murder", &format!("offense {i}"))).unwrap();
        }
    }

    let serial = BatchRunner::new(CaseSummarizer::default()).run(root.path()).unwrap();
    let parallel = BatchRunner::new(CaseSummarizer::default())
        .with_parallel(true)
        .run(root.path())
        .unwrap();

    let statuses = |r: &casebrief_runtime::BatchReport| {
        r.cases
            .iter()
            .map(|c| (c.case.clone(), c.status.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(statuses(&serial), statuses(&parallel));
    assert_eq!(serial.skipped, 1);
}

#[test]
fn test_custom_file_names() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("case");
    std::fs::create_dir(&dir).unwrap();
    std::fs::write(dir.join("input.txt"), CASE).unwrap();

    let report = BatchRunner::new(CaseSummarizer::default())
        .with_case_file("input.txt")
        .with_summary_file("out.txt")
        .run(root.path())
        .unwrap();
    assert_eq!(report.written, 1);
    assert!(dir.join("out.txt").exists());
}

#[test]
fn test_report_json_shape() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("empty_case")).unwrap();
    let report = BatchRunner::new(CaseSummarizer::default()).run(root.path()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["skipped"], 1);
    assert_eq!(json["cases"][0]["status"], "skipped");
    assert!(json["durationMs"].is_number());
}
