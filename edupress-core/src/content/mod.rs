//! Content shapes and their normalization.

mod fields;
mod model;
mod normalize;

pub use model::{
    Assessment, AssessmentQuestion, ContentKind, ExamPaper, ExamSection, Flashcard, FlashcardSet,
    LessonPlan, LessonStep, NormalizedContent, QuestionType, INDIGENOUS_LANGUAGE, PLACEHOLDER,
};
pub use normalize::{
    fallback_lesson_steps, normalize, normalize_assessment, normalize_exam, normalize_flashcards,
    normalize_lesson, parse_object, DEFAULT_LESSON_DURATION, MAX_QUESTION_MARKS,
    MAX_SECTION_MARKS,
};
