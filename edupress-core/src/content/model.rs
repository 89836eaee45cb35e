use crate::error::PressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subject whose exam papers use the Shona label set.
pub const INDIGENOUS_LANGUAGE: &str = "Indigenous Language (Shona/Ndebele)";

/// Stand-in for scalar text the source left out.
pub const PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonStep {
    pub stage: String,
    pub time: String,
    pub teacher_activity: String,
    pub learner_activity: String,
    pub methods: String,
}

impl LessonStep {
    pub fn new(stage: &str, time: &str, teacher: &str, learner: &str, methods: &str) -> Self {
        Self {
            stage: stage.to_string(),
            time: time.to_string(),
            teacher_activity: teacher.to_string(),
            learner_activity: learner.to_string(),
            methods: methods.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlan {
    pub grade: String,
    pub subject: String,
    pub topic: String,
    pub sub_topic: String,
    pub date: String,
    /// Minutes
    pub duration: u32,
    pub teacher_name: String,
    pub objectives: Vec<String>,
    pub materials: Vec<String>,
    pub assumed_knowledge: String,
    pub lesson_steps: Vec<LessonStep>,
    /// Left blank for the teacher to fill in by hand
    pub evaluation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub topic: String,
    pub grade: String,
    pub subject: String,
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[serde(rename = "mcq")]
    MultipleChoice,
    Structured,
    Composition,
}

impl QuestionType {
    /// Lenient parse of the `type` tag. Unknown tags read as structured.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        match tag.as_str() {
            "mcq" | "multiple choice" | "multiple-choice" | "multiplechoice" => {
                QuestionType::MultipleChoice
            }
            "composition" | "essay" | "rondedzero" => QuestionType::Composition,
            _ => QuestionType::Structured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuestion {
    pub id: u32,
    pub section: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub answer: String,
    pub marks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub title: String,
    pub grade: String,
    pub subject: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    pub questions: Vec<AssessmentQuestion>,
    pub total_marks: u32,
}

impl Assessment {
    pub fn has_composition(&self) -> bool {
        self.questions
            .iter()
            .any(|q| q.question_type == QuestionType::Composition)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSection {
    pub name: String,
    pub guidance: String,
    pub section_marks: u32,
    pub questions: Vec<AssessmentQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamPaper {
    pub school_name: String,
    pub grade: String,
    pub subject: String,
    pub term: String,
    pub year: String,
    /// Free-form label such as "2 hours"
    pub duration: String,
    pub sections: Vec<ExamSection>,
    pub total_marks: u32,
}

impl ExamPaper {
    pub fn is_indigenous_language(&self) -> bool {
        self.subject == INDIGENOUS_LANGUAGE
    }
}

/// The four document kinds the pipeline builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Lesson,
    Flashcards,
    Assessment,
    Exam,
}

impl ContentKind {
    pub fn all() -> [ContentKind; 4] {
        [
            ContentKind::Lesson,
            ContentKind::Flashcards,
            ContentKind::Assessment,
            ContentKind::Exam,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Lesson => "lesson",
            ContentKind::Flashcards => "flashcards",
            ContentKind::Assessment => "assessment",
            ContentKind::Exam => "exam",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = PressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lesson" | "lesson-plan" | "lessonplan" => Ok(ContentKind::Lesson),
            "flashcards" | "flashcard" => Ok(ContentKind::Flashcards),
            "assessment" | "test" => Ok(ContentKind::Assessment),
            "exam" | "end-term-exam" => Ok(ContentKind::Exam),
            other => Err(PressError::InvalidStructure(format!(
                "unknown content kind '{other}'"
            ))),
        }
    }
}

/// A content shape after normalization, ready for a builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NormalizedContent {
    Lesson(LessonPlan),
    Flashcards(FlashcardSet),
    Assessment(Assessment),
    Exam(ExamPaper),
}

impl NormalizedContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            NormalizedContent::Lesson(_) => ContentKind::Lesson,
            NormalizedContent::Flashcards(_) => ContentKind::Flashcards,
            NormalizedContent::Assessment(_) => ContentKind::Assessment,
            NormalizedContent::Exam(_) => ContentKind::Exam,
        }
    }
}
