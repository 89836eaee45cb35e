use super::{place_flowing, DocumentBuilder};
use crate::content::{Assessment, AssessmentQuestion, QuestionType, MAX_QUESTION_MARKS};
use crate::error::Result;
use crate::graphics::Color;
use crate::layout::{
    PaginatedCanvas, PlaceOptions, Primitive, Rule, Stroke, TextBlock,
};
use crate::text::Font;

/// Structured questions get this many writing lines per mark...
pub const ASSESSMENT_LINES_PER_MARK: u32 = 2;
/// ...but never fewer than this.
pub const ASSESSMENT_MIN_LINES: u32 = 2;

const LEFT: f64 = 15.0;
const OPTION_INDENT: f64 = 20.0;
const QUESTION_WIDTH: f64 = 170.0;
const LINE_SPACING: f64 = 8.0;
const ANSWER_SHEET_SPACING: f64 = 10.0;
const ANSWER_SHEET_PAGES: usize = 2;

const COMPOSITION_RUBRIC: &str = "ANSWER: Content should be relevant, grammatically correct, and well-structured. (Refer to standard Composition Marking Grid).";

/// Writing lines for a structured question worth `marks`.
pub fn ruled_lines(marks: u32) -> u32 {
    let marks = marks.min(MAX_QUESTION_MARKS);
    ASSESSMENT_MIN_LINES.max(marks * ASSESSMENT_LINES_PER_MARK)
}

/// Classroom test: a student copy, composition answer sheets when needed,
/// then the marking guide, all in one file.
pub struct AssessmentDocumentBuilder<'a> {
    assessment: &'a Assessment,
}

impl<'a> AssessmentDocumentBuilder<'a> {
    pub fn new(assessment: &'a Assessment) -> Self {
        Self { assessment }
    }

    fn draw_header(&self, canvas: &mut PaginatedCanvas, copy_label: &str) {
        let assessment = self.assessment;
        let geometry = *canvas.geometry();
        let (center, width) = (geometry.center_x(), geometry.content_width());

        canvas.set_cursor(10.0);
        canvas.place(TextBlock::centered("ASSESSMENT TEST", Font::HelveticaBold, 14.0, center, width));
        canvas.place(TextBlock::centered(
            &assessment.title.to_uppercase(),
            Font::HelveticaBold,
            12.0,
            center,
            width,
        ));
        canvas.place(TextBlock::centered(
            &format!("{} {}", assessment.grade, assessment.subject),
            Font::Helvetica,
            10.0,
            center,
            width,
        ));
        canvas.place_with(
            TextBlock::centered(copy_label, Font::Helvetica, 10.0, center, width),
            PlaceOptions::gap(4.0),
        );

        let fields = Primitive::cluster(
            5.0,
            vec![
                (
                    0.0,
                    TextBlock::single(
                        "Name: _______________________________   Date: _______________",
                        Font::Helvetica,
                        10.0,
                        LEFT,
                    )
                    .into(),
                ),
                (
                    0.0,
                    TextBlock::right_aligned(
                        &format!("Total Marks: {}", assessment.total_marks),
                        Font::Helvetica,
                        10.0,
                        150.0,
                    )
                    .into(),
                ),
            ],
        );
        canvas.place(fields);
        canvas.place_with(
            Rule::horizontal(LEFT, 195.0, 8.0)
                .with_offset(1.0)
                .with_stroke(Stroke::new(0.5)),
            PlaceOptions::gap(1.0),
        );
    }

    fn section_header(label: &str, composition: bool, size: f64) -> TextBlock {
        let text = if composition {
            format!("SECTION {label}: CHOOSE ONE TOPIC")
        } else {
            format!("SECTION {label}")
        };
        TextBlock::single(&text, Font::HelveticaBold, size, LEFT)
    }

    /// Question text with its options as one unit.
    fn question_block(question: &AssessmentQuestion) -> Primitive {
        let prompt = format!("{}. {} ({} marks)", question.id, question.question, question.marks);
        let text = TextBlock::new(&prompt, Font::Helvetica, 10.0, LEFT, QUESTION_WIDTH);

        if question.question_type != QuestionType::MultipleChoice {
            return text.into();
        }

        let mut offset = text.height() + 2.0;
        let mut children: Vec<(f64, Primitive)> = vec![(0.0, text.into())];
        for option in &question.options {
            let line = TextBlock::single(option, Font::Helvetica, 10.0, OPTION_INDENT);
            children.push((offset, line.into()));
            offset += 5.0;
        }
        Primitive::cluster(offset, children)
    }

    fn render_student_copy(&self, canvas: &mut PaginatedCanvas) {
        let assessment = self.assessment;
        self.draw_header(canvas, "(STUDENT COPY)");

        if let Some(passage) = &assessment.passage {
            canvas.place_with(
                TextBlock::single("READING PASSAGE:", Font::HelveticaBold, 10.0, LEFT),
                PlaceOptions::gap(1.0),
            );
            let body = TextBlock::new(passage, Font::Helvetica, 10.0, LEFT, 180.0);
            place_flowing(canvas, body, 10.0);
        }

        let writing_line = Stroke::new(0.1).with_color(Color::gray8(200));
        let mut current_section: Option<&str> = None;

        for question in &assessment.questions {
            let block = Self::question_block(question);

            if current_section != Some(question.section.as_str()) {
                current_section = Some(question.section.as_str());
                let composition = question.question_type == QuestionType::Composition;
                canvas.start_section_with(
                    Self::section_header(&question.section, composition, 11.0),
                    block.height(),
                    PlaceOptions::gap(0.5),
                );
            }

            match question.question_type {
                QuestionType::MultipleChoice => {
                    canvas.place_with(block, PlaceOptions::gap(4.0));
                }
                QuestionType::Structured => {
                    canvas.place_with(block, PlaceOptions::gap(2.0));
                    for _ in 0..ruled_lines(question.marks) {
                        canvas.place(
                            Rule::horizontal(OPTION_INDENT, 190.0, LINE_SPACING)
                                .with_stroke(writing_line.clone()),
                        );
                    }
                    canvas.advance(2.0);
                }
                // Composition topics are answered on the trailing sheets.
                QuestionType::Composition => {
                    canvas.place_with(block, PlaceOptions::gap(2.0));
                }
            }
        }
    }

    fn render_answer_sheet(&self, canvas: &mut PaginatedCanvas) {
        let geometry = *canvas.geometry();
        let stroke = Stroke::new(0.1).with_color(Color::gray8(150));

        canvas.new_page();
        canvas.set_cursor(10.0);
        canvas.place_with(
            TextBlock::centered(
                "ANSWER SHEET",
                Font::HelveticaBold,
                12.0,
                geometry.center_x(),
                geometry.content_width(),
            ),
            PlaceOptions::gap(3.0),
        );
        canvas.place(TextBlock::single(
            "Write your composition below:",
            Font::Helvetica,
            10.0,
            LEFT,
        ));
        canvas.set_cursor(35.0);

        for page in 0..ANSWER_SHEET_PAGES {
            if page > 0 {
                canvas.new_page();
            }
            canvas.fill_ruled_page(ANSWER_SHEET_SPACING, LEFT, 195.0, &stroke);
        }
    }

    fn render_marking_guide(&self, canvas: &mut PaginatedCanvas) {
        let assessment = self.assessment;
        canvas.new_page();
        self.draw_header(canvas, "(MARKING GUIDE)");

        let mut current_section: Option<&str> = None;
        for question in &assessment.questions {
            let prompt = TextBlock::new(
                &format!("{}. {}", question.id, question.question),
                Font::HelveticaBold,
                10.0,
                LEFT,
                QUESTION_WIDTH,
            );
            let answer_text = match question.question_type {
                QuestionType::Composition => COMPOSITION_RUBRIC.to_string(),
                _ => format!("ANSWER: {}  [{} marks]", question.answer, question.marks),
            };
            let answer = TextBlock::new(&answer_text, Font::Helvetica, 10.0, OPTION_INDENT, QUESTION_WIDTH)
                .with_color(Color::answer_green());

            let height = prompt.height() + answer.height();
            let entry = Primitive::cluster(
                height,
                vec![(0.0, prompt.clone().into()), (prompt.height(), answer.into())],
            );

            if current_section != Some(question.section.as_str()) {
                current_section = Some(question.section.as_str());
                canvas.start_section_with(
                    Self::section_header(&question.section, false, 10.0),
                    height,
                    PlaceOptions::gap(1.0),
                );
            }
            canvas.place_with(entry, PlaceOptions::gap(5.0));
        }
    }
}

impl DocumentBuilder for AssessmentDocumentBuilder<'_> {
    fn file_name(&self) -> String {
        format!("{}_Assessment.pdf", self.assessment.topic)
    }

    fn title(&self) -> String {
        self.assessment.title.clone()
    }

    fn render(&self, canvas: &mut PaginatedCanvas) -> Result<()> {
        canvas.set_subject(&self.assessment.subject);

        self.render_student_copy(canvas);
        if self.assessment.has_composition() {
            self.render_answer_sheet(canvas);
        }
        self.render_marking_guide(canvas);
        Ok(())
    }
}
