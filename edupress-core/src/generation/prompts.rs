//! Prompt text for each content request.

use super::request::{
    AssessmentRequest, AssessmentType, ExamRequest, FlashcardRequest, GenerationRequest,
    LessonRequest,
};
use serde::Serialize;

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Response format requested from the content service.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// A system instruction plus the user turn sent to the content service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub system_instruction: String,
    pub user_prompt: String,
}

/// Build the prompt for `request`. `syllabus` is reference text for the
/// grade and subject, interpolated when the caller has it.
pub fn build_prompt(request: &GenerationRequest, syllabus: Option<&str>) -> Prompt {
    let context = syllabus
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Follow the Heritage Based Curriculum for this grade and subject.");

    match request {
        GenerationRequest::Lesson(r) => lesson_prompt(r, context),
        GenerationRequest::Flashcards(r) => flashcard_prompt(r, context),
        GenerationRequest::Assessment(r) => assessment_prompt(r, context),
        GenerationRequest::Exam(r) => exam_prompt(r, context),
    }
}

fn lesson_prompt(request: &LessonRequest, context: &str) -> Prompt {
    let system_instruction = format!(
        r#"You are an expert Zimbabwean Primary School teacher.
Create a DETAILED daily Lesson Plan for {grade} {subject}.

STRICT SYLLABUS CONTEXT:
{context}

FORMATTING RULES:
1. Objectives must be SMART.
2. SOM/Media: include concrete objects, ICT tools and local heritage materials.
3. Lesson Development: generate exactly these stages in the 'lessonSteps' array:
   Introduction (5 min), Step 1 (10 min), Step 2 (10 min), Step 3 (10 min), Conclusion (5 min).
4. Methods/Competencies: list the methods used in every step.

JSON RESPONSE STRUCTURE:
{{
  "subTopic": "Specific focus of the lesson",
  "objectives": ["Objective 1", "Objective 2"],
  "materials": ["Item 1", "Item 2"],
  "assumedKnowledge": "Description of what learners already know.",
  "lessonSteps": [
    {{ "stage": "Introduction", "time": "5 min", "teacherActivity": "...", "learnerActivity": "...", "methods": "..." }}
  ],
  "evaluation": ""
}}"#,
        grade = request.grade,
        subject = request.subject,
    );

    let user_prompt = format!(
        r#"Create a lesson plan for:
Topic: "{topic}"
Sub-Topic Context: "{note}"

Content Requirement:
- Use Heritage Based Curriculum concepts (local context, unhu/ubuntu).
- Step 1 must be the delivery of the main concept.
- Step 3 must be an activity (Written or Practical).
- Fill "methods" for every step."#,
        topic = request.topic,
        note = request.context.as_deref().unwrap_or("General coverage"),
    );

    Prompt {
        system_instruction,
        user_prompt,
    }
}

fn flashcard_prompt(request: &FlashcardRequest, context: &str) -> Prompt {
    let system_instruction = format!(
        r#"You are a teacher creating study flashcards for {grade} students.
Create {count} flashcards for the Subject: {subject}.

Context: {context}

Requirements:
1. Content must be simple, clear, and age-appropriate.
2. "Front" should be a Question, Term, or Brief Scenario.
3. "Back" should be the Answer, Definition, or Result.
4. Return ONLY a valid JSON object.
5. JSON Structure: {{ "cards": [{{ "front": "...", "back": "..." }}] }}"#,
        grade = request.grade,
        count = request.count,
        subject = request.subject,
    );

    Prompt {
        system_instruction,
        user_prompt: format!(
            "Create {} flashcards on the topic: \"{}\".",
            request.count, request.topic
        ),
    }
}

/// The part of the assessment prompt that depends on the question style.
pub fn assessment_type_instruction(request: &AssessmentRequest) -> String {
    let count = request.count;
    match request.assessment_type {
        AssessmentType::Mixed => format!(
            "Create {} Multiple Choice questions (Section A) and {} Structured questions (Section B).",
            count.div_ceil(2),
            count / 2
        ),
        AssessmentType::MultipleChoice => format!("Create {count} Multiple Choice questions."),
        AssessmentType::Comprehension => format!(
            "Create a short, interesting reading passage titled '{}' suitable for {}. Then create {count} questions based on this passage.",
            request.topic, request.grade
        ),
        AssessmentType::Composition => format!(
            "Create 4 varied Composition/Rondedzero topics suitable for {} {}. Each should be worth 20 marks.",
            request.grade, request.subject
        ),
        AssessmentType::Structured => format!("Create {count} Structured questions."),
    }
}

fn assessment_prompt(request: &AssessmentRequest, context: &str) -> Prompt {
    let system_instruction = format!(
        r#"You are a strict examiner for Zimbabwean Primary Schools.
Create a test/assessment for {grade} {subject}.

Context: {context}
Type: {kind}

Format Guidelines:
- Mixed: split questions into Section A (Multiple Choice) and Section B (Structured).
- Multiple Choice: must have 4 options (A, B, C, D).
- Structured: must require written answers.
- Comprehension: generate a reading passage appropriate for {grade}; questions must be based on it.
- Composition / Rondedzero: generate 4 different essay topics (narrative, descriptive, letter, report).
- Marks: usually 1 for MCQ, 1-5 for structured, 20-30 for composition.

JSON Structure (Strict):
{{
  "title": "Topic Test: [Topic Name]",
  "passage": "[Only for Comprehension type]",
  "questions": [
    {{ "id": 1, "section": "A", "type": "mcq", "question": "...", "options": ["A. ...", "B. ...", "C. ...", "D. ..."], "answer": "B. ...", "marks": 1 }},
    {{ "id": 2, "section": "Composition", "type": "composition", "question": "Write a story about...", "answer": "N/A", "marks": 20 }}
  ]
}}"#,
        grade = request.grade,
        subject = request.subject,
        kind = request.assessment_type.label(),
    );

    Prompt {
        system_instruction,
        user_prompt: format!(
            "Generate an assessment on the topic: \"{}\". {}",
            request.topic,
            assessment_type_instruction(request)
        ),
    }
}

fn exam_prompt(request: &ExamRequest, context: &str) -> Prompt {
    let system_instruction = format!(
        r#"You are a chief examiner for the ZIMSEC primary level.
Create a comprehensive "End of Term Examination" for {grade} {subject} for {term}.

Context: {context}

Structure:
- Section A: 20 Multiple Choice Questions, 1 mark each.
- Section B: 5-8 Structured/Short Answer Questions, total 30 marks.
- Section C: 2-3 Problem Solving/Essay/Composition Questions, total 20-30 marks.

JSON Format:
{{
  "sections": [
    {{
      "name": "Section A",
      "guidance": "Answer all questions. Each question carries 1 mark.",
      "sectionMarks": 20,
      "questions": [
        {{ "id": 1, "type": "mcq", "question": "...", "options": ["A.", "B.", "C.", "D."], "answer": "B...", "marks": 1 }}
      ]
    }}
  ]
}}

Subject Specifics:
- English/Indigenous Language: Section C must be Composition/Rondedzero options.
- Mathematics: Section C should be word problems or data handling.
- Science/Social Studies: Section C should be long answer explanations."#,
        grade = request.grade,
        subject = request.subject,
        term = request.term,
    );

    Prompt {
        system_instruction,
        user_prompt: format!(
            "Generate a full End of Term Examination for {} {} {}. Total marks approx 70-80.",
            request.grade, request.subject, request.term
        ),
    }
}
