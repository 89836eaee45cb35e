use crate::content::ExamPaper;

/// Which fixed string table an exam cover uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSet {
    English,
    Shona,
}

/// Cover-page strings for an exam paper. Chosen wholesale from one set.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamLabels {
    pub set: LabelSet,
    pub title: &'static str,
    pub time: &'static str,
    pub instructions_header: &'static str,
    pub instructions: Vec<String>,
    pub footer: &'static str,
}

impl ExamLabels {
    /// Shona labels for the indigenous-language paper, English otherwise.
    pub fn for_paper(exam: &ExamPaper) -> Self {
        if exam.is_indigenous_language() {
            Self::shona(exam)
        } else {
            Self::english(exam)
        }
    }

    pub fn english(exam: &ExamPaper) -> Self {
        Self {
            set: LabelSet::English,
            title: "END OF TERM EXAMINATION",
            time: "TIME",
            instructions_header: "INSTRUCTIONS TO CANDIDATES",
            instructions: vec![
                "Write your name and grade on the answer sheet provided.".to_string(),
                format!(
                    "This paper consists of {} sections: {}.",
                    exam.sections.len(),
                    section_names(exam)
                ),
                "Answer all questions in Section A and Section B.".to_string(),
                "Answer questions from Section C as instructed.".to_string(),
                "Handwriting must be neat and legible.".to_string(),
            ],
            footer: "This question paper consists of printed pages.",
        }
    }

    pub fn shona(exam: &ExamPaper) -> Self {
        // Third term closes the school year.
        let title = if exam.term.contains('3') {
            "BVUNZO DZEKUPERA KWEGORE"
        } else {
            "BVUNZO DZEKUPERA KWETERMU"
        };

        Self {
            set: LabelSet::Shona,
            title,
            time: "NGUVA",
            instructions_header: "MIRAIRO KUVANYORI",
            instructions: vec![
                "Nyora zita rako negiredhi pabepa remhinduro.".to_string(),
                format!(
                    "Bepa rino rine zvikamu {} zvinoti: {}.",
                    exam.sections.len(),
                    section_names(exam)
                ),
                "Pindura mibvunzo yose muChikamu A neChikamu B.".to_string(),
                "Pindura mibvunzo muChikamu C sekurairwa kwazvakaitwa.".to_string(),
                "Nyora zvakatsvinda uye zvinoraveka.".to_string(),
            ],
            footer: "Bepa rebvunzo rine mapeji akaprindwa.",
        }
    }
}

fn section_names(exam: &ExamPaper) -> String {
    exam.sections
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
