use crate::content::ContentKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRequest {
    pub teacher_name: String,
    pub grade: String,
    pub subject: String,
    pub topic: String,
    /// Free-text note such as "learners struggle with fractions"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub date: String,
    /// Minutes
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardRequest {
    pub grade: String,
    pub subject: String,
    pub topic: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentType {
    #[serde(rename = "Multiple Choice")]
    MultipleChoice,
    #[serde(rename = "Structured Questions")]
    Structured,
    #[serde(rename = "Mixed (Section A & B)")]
    Mixed,
    #[serde(rename = "Comprehension Passage")]
    Comprehension,
    #[serde(rename = "Composition / Rondedzero")]
    Composition,
}

impl AssessmentType {
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentType::MultipleChoice => "Multiple Choice",
            AssessmentType::Structured => "Structured Questions",
            AssessmentType::Mixed => "Mixed (Section A & B)",
            AssessmentType::Comprehension => "Comprehension Passage",
            AssessmentType::Composition => "Composition / Rondedzero",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub grade: String,
    pub subject: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub assessment_type: AssessmentType,
    /// Number of questions
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRequest {
    pub school_name: String,
    pub grade: String,
    pub subject: String,
    pub term: String,
    pub year: String,
    /// Label such as "2 hours"
    pub duration: String,
}

/// Parameters for one content request, tagged by document kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GenerationRequest {
    Lesson(LessonRequest),
    Flashcards(FlashcardRequest),
    Assessment(AssessmentRequest),
    Exam(ExamRequest),
}

impl GenerationRequest {
    pub fn kind(&self) -> ContentKind {
        match self {
            GenerationRequest::Lesson(_) => ContentKind::Lesson,
            GenerationRequest::Flashcards(_) => ContentKind::Flashcards,
            GenerationRequest::Assessment(_) => ContentKind::Assessment,
            GenerationRequest::Exam(_) => ContentKind::Exam,
        }
    }

    pub fn grade(&self) -> &str {
        match self {
            GenerationRequest::Lesson(r) => &r.grade,
            GenerationRequest::Flashcards(r) => &r.grade,
            GenerationRequest::Assessment(r) => &r.grade,
            GenerationRequest::Exam(r) => &r.grade,
        }
    }

    pub fn subject(&self) -> &str {
        match self {
            GenerationRequest::Lesson(r) => &r.subject,
            GenerationRequest::Flashcards(r) => &r.subject,
            GenerationRequest::Assessment(r) => &r.subject,
            GenerationRequest::Exam(r) => &r.subject,
        }
    }
}
