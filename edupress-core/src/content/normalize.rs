//! Turns loosely shaped JSON into complete content values.
//!
//! Every function here is total: whatever the input, the result has every
//! field a builder reads, with documented stand-ins for anything missing.
//! Totals are always recomputed from their parts.

use super::fields::{objects, positive_int, string_list, text};
use super::model::{
    Assessment, AssessmentQuestion, ContentKind, ExamPaper, ExamSection, Flashcard, FlashcardSet,
    LessonPlan, LessonStep, NormalizedContent, QuestionType, PLACEHOLDER,
};
use serde_json::Value;
use tracing::debug;

/// Lesson length used when none is given, in minutes.
pub const DEFAULT_LESSON_DURATION: u32 = 40;

/// Marks a single question may carry; larger values are clamped.
pub const MAX_QUESTION_MARKS: u32 = 100;

/// Marks a section may declare; larger values are clamped.
pub const MAX_SECTION_MARKS: u32 = 1000;

/// A lesson needs at least this many steps before the supplied ones are kept.
const MIN_LESSON_STEPS: usize = 3;

const OBJECTIVES_FALLBACK: &str =
    "By the end of the lesson, learners should be able to master the topic.";
const MATERIALS_FALLBACK: [&str; 3] = ["Chalkboard", "Textbooks", "Local Environment"];
const ASSUMED_KNOWLEDGE_FALLBACK: &str = "Learners have basic understanding of previous concepts.";
const SECTION_GUIDANCE_FALLBACK: &str = "Answer all questions.";

pub fn normalize(kind: ContentKind, raw: &Value) -> NormalizedContent {
    match kind {
        ContentKind::Lesson => NormalizedContent::Lesson(normalize_lesson(raw)),
        ContentKind::Flashcards => NormalizedContent::Flashcards(normalize_flashcards(raw)),
        ContentKind::Assessment => NormalizedContent::Assessment(normalize_assessment(raw)),
        ContentKind::Exam => NormalizedContent::Exam(normalize_exam(raw)),
    }
}

fn text_or_placeholder(raw: &Value, key: &str) -> String {
    text(raw, key).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Positive integer at `key`, clamped to `max`.
fn bounded_marks(raw: &Value, key: &str, max: u32) -> Option<u32> {
    positive_int(raw, key).map(|marks| {
        if marks > max {
            debug!(key, marks, max, "clamping marks");
        }
        marks.min(max)
    })
}

fn total(marks: impl Iterator<Item = u32>) -> u32 {
    marks.fold(0, u32::saturating_add)
}

/// The five-stage lesson used when the source gives too few steps.
pub fn fallback_lesson_steps() -> Vec<LessonStep> {
    vec![
        LessonStep::new("Introduction", "5 min", "Introduces topic", "Listen", "Q&A"),
        LessonStep::new(
            "Step 1: Presentation",
            "10 min",
            "Explains concept",
            "Observe",
            "Demonstration",
        ),
        LessonStep::new("Step 2: Practice", "10 min", "Guides learners", "Practice", "Group Work"),
        LessonStep::new(
            "Step 3: Activity",
            "10 min",
            "Supervises",
            "Write/Do",
            "Individual Work",
        ),
        LessonStep::new("Conclusion", "5 min", "Concludes", "Answer", "Discussion"),
    ]
}

pub fn normalize_lesson(raw: &Value) -> LessonPlan {
    let topic = text_or_placeholder(raw, "topic");

    let mut objectives = string_list(raw, "objectives");
    if objectives.is_empty() {
        debug!("lesson objectives missing, using fallback");
        objectives.push(OBJECTIVES_FALLBACK.to_string());
    }

    let mut materials = string_list(raw, "materials");
    if materials.is_empty() {
        debug!("lesson materials missing, using fallback");
        materials = MATERIALS_FALLBACK.iter().map(|m| m.to_string()).collect();
    }

    let steps: Vec<LessonStep> = objects(raw, "lessonSteps")
        .map(|step| LessonStep {
            stage: text_or_placeholder(step, "stage"),
            time: text_or_placeholder(step, "time"),
            teacher_activity: text_or_placeholder(step, "teacherActivity"),
            learner_activity: text_or_placeholder(step, "learnerActivity"),
            methods: text_or_placeholder(step, "methods"),
        })
        .collect();
    let lesson_steps = if steps.len() >= MIN_LESSON_STEPS {
        steps
    } else {
        debug!(supplied = steps.len(), "too few lesson steps, using fallback");
        fallback_lesson_steps()
    };

    LessonPlan {
        grade: text_or_placeholder(raw, "grade"),
        subject: text_or_placeholder(raw, "subject"),
        sub_topic: text(raw, "subTopic").unwrap_or_else(|| topic.clone()),
        topic,
        date: text_or_placeholder(raw, "date"),
        duration: positive_int(raw, "duration").unwrap_or(DEFAULT_LESSON_DURATION),
        teacher_name: text_or_placeholder(raw, "teacherName"),
        objectives,
        materials,
        assumed_knowledge: text(raw, "assumedKnowledge")
            .unwrap_or_else(|| ASSUMED_KNOWLEDGE_FALLBACK.to_string()),
        lesson_steps,
        evaluation: text(raw, "evaluation").unwrap_or_default(),
    }
}

pub fn normalize_flashcards(raw: &Value) -> FlashcardSet {
    let cards = objects(raw, "cards")
        .enumerate()
        .map(|(i, card)| Flashcard {
            id: format!("card-{i}"),
            front: text(card, "front").unwrap_or_else(|| "Front".to_string()),
            back: text(card, "back").unwrap_or_else(|| "Back".to_string()),
        })
        .collect();

    FlashcardSet {
        topic: text_or_placeholder(raw, "topic"),
        grade: text_or_placeholder(raw, "grade"),
        subject: text_or_placeholder(raw, "subject"),
        cards,
    }
}

/// Options for a multiple-choice question. Short lists are padded to four
/// lettered entries.
fn normalize_options(mut options: Vec<String>) -> Vec<String> {
    const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];
    while options.len() < LETTERS.len() {
        let letter = LETTERS[options.len()];
        options.push(format!("{letter}. {PLACEHOLDER}"));
    }
    options
}

fn normalize_question(raw: &Value, id: u32, section: String) -> AssessmentQuestion {
    let options = string_list(raw, "options");
    let mut question_type = match text(raw, "type") {
        Some(tag) => QuestionType::parse(&tag),
        None if !options.is_empty() => QuestionType::MultipleChoice,
        None => QuestionType::Structured,
    };

    let options = match question_type {
        QuestionType::MultipleChoice if options.is_empty() => {
            debug!(id, "multiple-choice question without options, treating as structured");
            question_type = QuestionType::Structured;
            Vec::new()
        }
        QuestionType::MultipleChoice => normalize_options(options),
        _ => Vec::new(),
    };

    AssessmentQuestion {
        id,
        section,
        question_type,
        question: text_or_placeholder(raw, "question"),
        options,
        answer: text_or_placeholder(raw, "answer"),
        marks: bounded_marks(raw, "marks", MAX_QUESTION_MARKS).unwrap_or(1),
    }
}

/// A single written question standing in for an empty question list.
fn fallback_question(id: u32, section: &str, about: &str) -> AssessmentQuestion {
    AssessmentQuestion {
        id,
        section: section.to_string(),
        question_type: QuestionType::Structured,
        question: format!("Write short notes on {about}."),
        options: Vec::new(),
        answer: PLACEHOLDER.to_string(),
        marks: 5,
    }
}

pub fn normalize_assessment(raw: &Value) -> Assessment {
    let topic = text_or_placeholder(raw, "topic");

    let mut section = "A".to_string();
    let mut questions: Vec<AssessmentQuestion> = objects(raw, "questions")
        .enumerate()
        .map(|(i, q)| {
            if let Some(label) = text(q, "section") {
                section = label;
            }
            normalize_question(q, i as u32 + 1, section.clone())
        })
        .collect();

    if questions.is_empty() {
        debug!("assessment has no questions, using fallback");
        questions.push(fallback_question(1, "A", &topic));
    }

    let total_marks = total(questions.iter().map(|q| q.marks));
    let title = text(raw, "title").unwrap_or_else(|| {
        if topic == PLACEHOLDER {
            "Assessment".to_string()
        } else {
            format!("{topic} Assessment")
        }
    });

    Assessment {
        title,
        grade: text_or_placeholder(raw, "grade"),
        subject: text_or_placeholder(raw, "subject"),
        topic,
        passage: text(raw, "passage"),
        questions,
        total_marks,
    }
}

fn section_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

pub fn normalize_exam(raw: &Value) -> ExamPaper {
    let subject = text_or_placeholder(raw, "subject");
    let mut next_id = 1u32;

    let mut sections: Vec<ExamSection> = objects(raw, "sections")
        .enumerate()
        .map(|(index, section)| {
            let name = text(section, "name")
                .unwrap_or_else(|| format!("Section {}", section_letter(index)));

            let mut questions: Vec<AssessmentQuestion> = objects(section, "questions")
                .map(|q| {
                    let id = positive_int(q, "id").unwrap_or(next_id);
                    next_id = id.saturating_add(1);
                    normalize_question(q, id, name.clone())
                })
                .collect();
            if questions.is_empty() {
                debug!(section = %name, "exam section has no questions, using fallback");
                questions.push(fallback_question(next_id, &name, &subject));
                next_id = next_id.saturating_add(1);
            }

            let section_marks = bounded_marks(section, "sectionMarks", MAX_SECTION_MARKS)
                .unwrap_or_else(|| total(questions.iter().map(|q| q.marks)));

            ExamSection {
                guidance: text(section, "guidance")
                    .unwrap_or_else(|| SECTION_GUIDANCE_FALLBACK.to_string()),
                name,
                section_marks,
                questions,
            }
        })
        .collect();

    if sections.is_empty() {
        debug!("exam has no sections, using fallback");
        let question = fallback_question(1, "Section A", &subject);
        sections.push(ExamSection {
            name: "Section A".to_string(),
            guidance: SECTION_GUIDANCE_FALLBACK.to_string(),
            section_marks: question.marks,
            questions: vec![question],
        });
    }

    let total_marks = total(sections.iter().map(|s| s.section_marks));

    ExamPaper {
        school_name: text_or_placeholder(raw, "schoolName"),
        grade: text_or_placeholder(raw, "grade"),
        subject,
        term: text_or_placeholder(raw, "term"),
        year: text_or_placeholder(raw, "year"),
        duration: text_or_placeholder(raw, "duration"),
        sections,
        total_marks,
    }
}

/// Parse response text as a JSON object, tolerating a Markdown code fence.
/// Returns `None` for anything that is not an object.
pub fn parse_object(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|inner| inner.trim_end().trim_end_matches("```"))
        .unwrap_or(trimmed);
    serde_json::from_str::<Value>(trimmed)
        .ok()
        .filter(Value::is_object)
}
