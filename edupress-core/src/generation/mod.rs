//! The contract with the external content service: what is asked for and
//! how replies are turned into normalized content. Transport lives with the
//! caller.

mod prompts;
mod request;
mod response;

pub use prompts::{
    assessment_type_instruction, build_prompt, Prompt, DEFAULT_MODEL, RESPONSE_MIME_TYPE,
};
pub use request::{
    AssessmentRequest, AssessmentType, ExamRequest, FlashcardRequest, GenerationRequest,
    LessonRequest,
};
pub use response::decode_response;
