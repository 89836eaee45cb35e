use super::request::GenerationRequest;
use crate::content::{normalize, parse_object, NormalizedContent};
use crate::error::{PressError, Result};
use serde_json::{Map, Value};
use tracing::warn;

/// Turn the content service's reply into normalized content.
///
/// A missing or blank reply, or one that is not a JSON object, is a
/// [`PressError::GenerationFailed`]. Anything that parses is normalized, with
/// the request's own metadata taking precedence over the reply's.
pub fn decode_response(request: &GenerationRequest, text: Option<&str>) -> Result<NormalizedContent> {
    let kind = request.kind();

    let text = match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => text,
        None => {
            warn!(%kind, "empty response from content service");
            return Err(PressError::GenerationFailed);
        }
    };

    let mut raw = match parse_object(text) {
        Some(raw) => raw,
        None => {
            warn!(%kind, length = text.len(), "content service returned malformed JSON");
            return Err(PressError::GenerationFailed);
        }
    };

    if let Some(object) = raw.as_object_mut() {
        apply_request_metadata(request, object);
    }
    Ok(normalize(kind, &raw))
}

fn apply_request_metadata(request: &GenerationRequest, object: &mut Map<String, Value>) {
    let mut set = |key: &str, value: Value| {
        object.insert(key.to_string(), value);
    };

    match request {
        GenerationRequest::Lesson(r) => {
            set("grade", r.grade.clone().into());
            set("subject", r.subject.clone().into());
            set("topic", r.topic.clone().into());
            set("date", r.date.clone().into());
            set("duration", r.duration.into());
            set("teacherName", r.teacher_name.clone().into());
        }
        GenerationRequest::Flashcards(r) => {
            set("grade", r.grade.clone().into());
            set("subject", r.subject.clone().into());
            set("topic", r.topic.clone().into());
        }
        GenerationRequest::Assessment(r) => {
            set("grade", r.grade.clone().into());
            set("subject", r.subject.clone().into());
            set("topic", r.topic.clone().into());
        }
        GenerationRequest::Exam(r) => {
            set("schoolName", r.school_name.clone().into());
            set("grade", r.grade.clone().into());
            set("subject", r.subject.clone().into());
            set("term", r.term.clone().into());
            set("year", r.year.clone().into());
            set("duration", r.duration.clone().into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::FlashcardRequest;

    fn request() -> GenerationRequest {
        GenerationRequest::Flashcards(FlashcardRequest {
            grade: "Grade 4".to_string(),
            subject: "Science and Technology".to_string(),
            topic: "Magnets".to_string(),
            count: 2,
        })
    }

    #[test]
    fn test_blank_and_missing_fail() {
        assert!(matches!(decode_response(&request(), None), Err(PressError::GenerationFailed)));
        assert!(matches!(decode_response(&request(), Some("  \n")), Err(PressError::GenerationFailed)));
    }

    #[test]
    fn test_malformed_fails() {
        let result = decode_response(&request(), Some("{\"cards\": ["));
        assert!(matches!(result, Err(PressError::GenerationFailed)));
        let result = decode_response(&request(), Some("[]"));
        assert!(matches!(result, Err(PressError::GenerationFailed)));
    }

    #[test]
    fn test_request_metadata_wins() {
        let reply = r#"{"topic": "Something else", "cards": [{"front": "Do magnets attract wood?", "back": "No"}]}"#;
        match decode_response(&request(), Some(reply)).unwrap() {
            NormalizedContent::Flashcards(set) => {
                assert_eq!(set.topic, "Magnets");
                assert_eq!(set.grade, "Grade 4");
                assert_eq!(set.cards.len(), 1);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }
}
