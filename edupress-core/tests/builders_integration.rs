//! End-to-end tests for the document builders
//!
//! Raw JSON goes through the normalizer and a builder; assertions read the
//! placement trace and the uncompressed PDF bytes.

use edupress::content::{normalize, ContentKind, INDIGENOUS_LANGUAGE};
use edupress::layout::DocumentArtifact;
use edupress::{build_document, DocumentSettings, PlacementKind, Result};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const TOP_MARGIN: f64 = 20.0;
const USABLE_BOTTOM: f64 = 280.0;
const EPSILON: f64 = 1e-6;

fn build(kind: ContentKind, raw: Value) -> Result<DocumentArtifact> {
    build_document(&normalize(kind, &raw), &DocumentSettings::uncompressed())
}

fn pdf_text(artifact: &DocumentArtifact) -> String {
    String::from_utf8_lossy(&artifact.bytes).into_owned()
}

fn long_lesson(steps: usize) -> Value {
    let activity = "Learners work in pairs to sort the picture cards into groups, \
        then explain to the class why each card belongs where they placed it. \
        The teacher moves between groups asking guiding questions.";
    let steps: Vec<Value> = (0..steps)
        .map(|i| {
            json!({
                "stage": format!("Step {}", i + 1),
                "time": "10 min",
                "teacherActivity": activity,
                "learnerActivity": activity,
                "methods": "Discussion, group work, demonstration"
            })
        })
        .collect();

    json!({
        "teacherName": "Mrs Moyo",
        "grade": "Grade 5",
        "subject": "Social Sciences",
        "topic": "Family",
        "subTopic": "Roles in the family",
        "date": "2025-03-10",
        "duration": 40,
        "objectives": ["Name three family roles"],
        "materials": ["Picture cards"],
        "assumedKnowledge": "Learners know their own family members.",
        "lessonSteps": steps,
        "evaluation": ""
    })
}

#[test]
fn test_lesson_rows_restart_at_page_top() -> Result<()> {
    let artifact = build(ContentKind::Lesson, long_lesson(12))?;
    assert!(artifact.page_count > 1);

    let rows: Vec<_> = artifact
        .placements
        .iter()
        .filter(|p| p.kind == PlacementKind::Row)
        .collect();

    for row in &rows {
        assert!(!row.overflow, "row overflowed: {}", row.text);
        assert!(row.bottom() <= USABLE_BOTTOM + EPSILON);
    }

    for pair in rows.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.page != prev.page {
            // The header row is repeated first, then the continuing row sits directly below it.
            assert!((next.top - TOP_MARGIN).abs() < EPSILON);
            assert!(next.text.starts_with("Stage | Time"));
        }
    }

    let continued_headers = rows
        .iter()
        .filter(|p| p.page > 0 && p.text.starts_with("Stage | Time"))
        .count();
    assert!(continued_headers >= 1);
    Ok(())
}

#[test]
fn test_lesson_evaluation_box_is_last() -> Result<()> {
    let artifact = build(ContentKind::Lesson, long_lesson(3))?;
    let evaluation = artifact.find("EVALUATION:").expect("evaluation block placed");
    assert_eq!(evaluation.kind, PlacementKind::Cluster);
    assert!(evaluation.top <= 250.0 + EPSILON);
    assert_eq!(evaluation, artifact.placements.last().unwrap());
    assert_eq!(artifact.file_name, "Social_Sciences_LessonPlan_2025-03-10.pdf");
    Ok(())
}

#[test]
fn test_flashcard_pairs_match_cards() -> Result<()> {
    for count in [0usize, 1, 4, 5, 11] {
        let cards: Vec<Value> = (0..count)
            .map(|i| json!({ "front": format!("Question {i}"), "back": format!("Answer {i}") }))
            .collect();
        let artifact = build(
            ContentKind::Flashcards,
            json!({ "topic": "Weather", "grade": "Grade 3", "subject": "Science", "cards": cards }),
        )?;

        let pairs: Vec<_> = artifact
            .placements
            .iter()
            .filter(|p| p.kind == PlacementKind::Cluster)
            .collect();
        assert_eq!(pairs.len(), count);

        for (i, pair) in pairs.iter().enumerate() {
            // Front and back live in one atomic unit, so they share a page.
            assert!(pair.text.contains(&format!("Question {i}")));
            assert!(pair.text.contains(&format!("Answer {i}")));
            assert!(pair.bottom() <= USABLE_BOTTOM + EPSILON);
        }
    }
    Ok(())
}

fn birds_assessment() -> Value {
    json!({
        "title": "Topic Test: Birds",
        "grade": "Grade 4",
        "subject": "Science and Technology",
        "topic": "Birds",
        "totalMarks": 5,
        "questions": [
            {
                "section": "A", "type": "mcq",
                "question": "Which bird cannot fly?",
                "options": ["A. Ostrich", "B. Eagle", "C. Dove", "D. Hawk"],
                "answer": "A. Ostrich", "marks": 1
            },
            {
                "section": "A", "type": "mcq",
                "question": "What covers a bird's body?",
                "options": ["A. Scales", "B. Fur", "C. Feathers", "D. Shell"],
                "answer": "C. Feathers", "marks": 1
            },
            {
                "section": "B", "type": "composition",
                "question": "Write a story about a bird that lost its nest.",
                "answer": "N/A", "marks": 20
            }
        ]
    })
}

#[test]
fn test_assessment_student_copy_answer_sheet_and_guide() -> Result<()> {
    let artifact = build(ContentKind::Assessment, birds_assessment())?;
    let text = pdf_text(&artifact);

    assert!(artifact.contains_text("Total Marks: 22"));
    assert!(!artifact.contains_text("Total Marks: 5"));

    let sheet = artifact.find("ANSWER SHEET").expect("answer sheet present");
    let guide = artifact.find("(MARKING GUIDE)").expect("marking guide present");

    // Student copy: options visible, no answers, no inline writing lines.
    for option in ["A. Ostrich", "D. Hawk", "A. Scales", "C. Feathers"] {
        let placement = artifact.find(option).unwrap();
        assert!(placement.page < sheet.page);
    }
    assert!(artifact.placements.iter().all(|p| p.page >= guide.page || !p.text.contains("ANSWER:")));
    let student_rules = artifact
        .placements
        .iter()
        .filter(|p| p.page < sheet.page && p.kind == PlacementKind::Rule)
        .count();
    assert_eq!(student_rules, 1, "only the header rule");
    assert!(artifact.contains_text("SECTION B: CHOOSE ONE TOPIC"));

    // Exactly two ruled answer pages.
    assert_eq!(guide.page, sheet.page + 2);
    for page in [sheet.page, sheet.page + 1] {
        let lines = artifact
            .placements_on(page)
            .filter(|p| p.kind == PlacementKind::Rule)
            .count();
        assert!(lines > 20, "page {page} has {lines} lines");
    }

    // Marking guide.
    assert!(artifact.contains_text("ANSWER: A. Ostrich  [1 marks]"));
    assert!(artifact.contains_text("ANSWER: C. Feathers  [1 marks]"));
    assert!(artifact.contains_text("Refer to standard Composition Marking Grid"));
    assert!(!artifact.contains_text("ANSWER: N/A"));
    assert!(text.contains("(ASSESSMENT TEST) Tj"));

    assert_eq!(artifact.file_name, "Birds_Assessment.pdf");
    Ok(())
}

#[test]
fn test_assessment_without_composition_has_no_answer_sheet() -> Result<()> {
    let artifact = build(
        ContentKind::Assessment,
        json!({
            "topic": "Water",
            "questions": [
                { "type": "structured", "question": "Name two sources of water.", "answer": "River, well", "marks": 2 }
            ]
        }),
    )?;
    assert!(artifact.find("ANSWER SHEET").is_none());

    // max(2, 2 * 2) writing lines plus the two header rules
    let rules = artifact
        .placements
        .iter()
        .filter(|p| p.kind == PlacementKind::Rule)
        .count();
    assert_eq!(rules, 4 + 2);
    Ok(())
}

fn exam(subject: &str) -> Value {
    json!({
        "schoolName": "Chitungwiza Primary School",
        "grade": "Grade 7",
        "subject": subject,
        "term": "Term 3",
        "year": "2025",
        "duration": "2 hours",
        "sections": [
            {
                "name": "Section A",
                "guidance": "Answer all questions.",
                "questions": [
                    { "id": 1, "type": "mcq", "question": "2 + 2 =", "options": ["A. 3", "B. 4", "C. 5", "D. 6"], "answer": "B. 4", "marks": 1 }
                ]
            },
            {
                "name": "Section B",
                "questions": [
                    { "id": 2, "type": "structured", "question": "Explain why we boil water.", "answer": "To kill germs", "marks": 3 }
                ]
            }
        ]
    })
}

#[test]
fn test_exam_label_set_follows_subject() -> Result<()> {
    let shona = build(ContentKind::Exam, exam(INDIGENOUS_LANGUAGE))?;
    assert!(shona.contains_text("BVUNZO DZEKUPERA KWEGORE"));
    assert!(shona.contains_text("MIRAIRO KUVANYORI"));
    assert!(shona.contains_text("NGUVA"));
    assert!(!shona.contains_text("INSTRUCTIONS TO CANDIDATES"));
    assert!(!shona.contains_text("END OF TERM EXAMINATION"));

    let english = build(ContentKind::Exam, exam("Mathematics"))?;
    assert!(english.contains_text("END OF TERM EXAMINATION"));
    assert!(english.contains_text("INSTRUCTIONS TO CANDIDATES"));
    assert!(!english.contains_text("MIRAIRO KUVANYORI"));
    assert!(!english.contains_text("NGUVA"));
    Ok(())
}

#[test]
fn test_exam_pages_and_marking_guide() -> Result<()> {
    let artifact = build(ContentKind::Exam, exam("Mathematics"))?;
    assert!(artifact.page_count >= 3);

    let section = artifact.find("SECTION A [1 Marks]").expect("section header");
    assert!(section.page >= 1);

    let header = "Mathematics - Term 3 2025";
    let guide = artifact.find("MARKING GUIDE (TEACHER'S COPY)").unwrap();
    for page in 1..guide.page {
        assert!(artifact.placements_on(page).any(|p| p.text == header));
    }
    assert!(!artifact.placements_on(guide.page).any(|p| p.text == header));
    assert!(artifact.contains_text("1. B. 4"));
    assert!(artifact.contains_text("2. To kill germs"));

    // max(1, 3) writing lines for the structured question
    let rules = artifact
        .placements
        .iter()
        .filter(|p| p.kind == PlacementKind::Rule && p.page < guide.page)
        .count();
    assert_eq!(rules, 3);
    Ok(())
}

#[test]
fn test_artifact_save_round_trips_bytes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let artifact = build(ContentKind::Flashcards, json!({ "topic": "Shapes", "cards": [] }))?;
    let path = temp_dir.path().join(&artifact.file_name);
    artifact.save(&path)?;

    assert_eq!(fs::read(&path)?, artifact.bytes);
    Ok(())
}

#[test]
fn test_minimal_inputs_always_build() -> Result<()> {
    for kind in ContentKind::all() {
        let artifact = build_document(&normalize(kind, &json!({})), &DocumentSettings::default())?;
        assert!(artifact.page_count >= 1, "{kind} produced no pages");
        assert!(artifact.bytes.starts_with(b"%PDF-1.7"));
        assert_eq!(artifact.mime_type, "application/pdf");
    }
    Ok(())
}

fn rule_count(artifact: &DocumentArtifact) -> usize {
    artifact
        .placements
        .iter()
        .filter(|p| p.kind == PlacementKind::Rule)
        .count()
}

#[test]
fn test_large_marks_give_bounded_documents() -> Result<()> {
    let assessment = |marks: u64| {
        json!({
            "topic": "Soil",
            "questions": [{ "type": "structured", "question": "Describe loam soil.", "marks": marks }]
        })
    };
    let small = build(ContentKind::Assessment, assessment(1))?;
    let large = build(ContentKind::Assessment, assessment(200_000))?;
    assert_eq!(rule_count(&large), rule_count(&small) - 2 + 200);
    assert!(large.page_count <= 10, "{} pages", large.page_count);

    let exam = |marks: u64| {
        json!({
            "subject": "Agriculture",
            "sections": [{
                "name": "Section B",
                "questions": [{ "type": "structured", "question": "Name three crops.", "marks": marks }]
            }]
        })
    };
    let small = build(ContentKind::Exam, exam(1))?;
    let large = build(ContentKind::Exam, exam(u32::MAX as u64))?;
    assert_eq!(rule_count(&large), rule_count(&small) - 1 + 100);
    assert!(large.page_count <= 8, "{} pages", large.page_count);
    Ok(())
}
