use super::labels::ExamLabels;
use super::DocumentBuilder;
use crate::content::{AssessmentQuestion, ExamPaper, ExamSection, QuestionType, MAX_QUESTION_MARKS};
use crate::error::Result;
use crate::graphics::Color;
use crate::layout::{
    Frame, PaginatedCanvas, PlaceOptions, Primitive, Rule, Stroke, TextBlock,
};
use crate::text::Font;

/// Structured exam questions get one writing line per mark...
pub const EXAM_LINES_PER_MARK: u32 = 1;
/// ...with at least one line.
pub const EXAM_MIN_LINES: u32 = 1;

/// A new section is not started below this line.
const SECTION_LIMIT: f64 = 250.0;
const NUMBER_X: f64 = 15.0;
const TEXT_X: f64 = 25.0;
const OPTION_X: f64 = 30.0;
const LINE_SPACING: f64 = 8.0;
const COMPOSITION_SPACE: f64 = 5.0;
const SECTION_SPACE: f64 = 10.0;

/// Writing lines for a structured question worth `marks`.
pub fn ruled_lines(marks: u32) -> u32 {
    let marks = marks.min(MAX_QUESTION_MARKS);
    EXAM_MIN_LINES.max(marks * EXAM_LINES_PER_MARK)
}

/// End-of-term paper: cover page, question pages and a marking guide.
pub struct ExamDocumentBuilder<'a> {
    exam: &'a ExamPaper,
    labels: ExamLabels,
}

impl<'a> ExamDocumentBuilder<'a> {
    pub fn new(exam: &'a ExamPaper) -> Self {
        Self {
            exam,
            labels: ExamLabels::for_paper(exam),
        }
    }

    pub fn labels(&self) -> &ExamLabels {
        &self.labels
    }

    fn render_cover(&self, canvas: &mut PaginatedCanvas) {
        let exam = self.exam;
        let labels = &self.labels;
        let geometry = *canvas.geometry();
        let center = geometry.center_x();
        let (width, height) = (geometry.width, geometry.height);

        canvas.stamp(&Frame::outline(10.0, width - 20.0, height - 20.0, 1.0).into(), 10.0);
        canvas.stamp(&Frame::outline(12.0, width - 24.0, height - 24.0, 0.3).into(), 12.0);

        let centered = |text: &str, font: Font, size: f64| {
            TextBlock::centered(text, font, size, center, 160.0)
        };

        canvas.set_cursor(22.0);
        canvas.place_with(
            centered(&exam.school_name.to_uppercase(), Font::TimesBold, 22.0).with_line_height(10.0),
            PlaceOptions::gap(4.0),
        );
        canvas.place_with(centered(labels.title, Font::TimesBold, 16.0), PlaceOptions::gap(2.0));
        canvas.place_with(
            centered(&format!("{} {}", exam.term, exam.year), Font::TimesBold, 14.0),
            PlaceOptions::gap(13.0),
        );
        canvas.place_with(
            centered(&exam.grade.to_uppercase(), Font::TimesBold, 18.0),
            PlaceOptions::gap(1.0),
        );
        canvas.place_with(
            centered(&exam.subject.to_uppercase(), Font::TimesBold, 18.0),
            PlaceOptions::gap(16.0),
        );
        canvas.place_with(
            TextBlock::single(
                &format!("{}:  {}", labels.time, exam.duration),
                Font::HelveticaBold,
                12.0,
                20.0,
            ),
            PlaceOptions::gap(14.0),
        );
        canvas.place_with(
            TextBlock::single(labels.instructions_header, Font::HelveticaBold, 12.0, 20.0),
            PlaceOptions::gap(2.0),
        );
        for instruction in &labels.instructions {
            canvas.place(
                TextBlock::new(&format!("• {instruction}"), Font::Helvetica, 11.0, 25.0, 165.0)
                    .with_line_height(7.0),
            );
        }

        let footer = TextBlock::centered(labels.footer, Font::TimesItalic, 10.0, center, 160.0);
        canvas.stamp(&footer.into(), height - 24.0);
    }

    fn section_header(&self, section: &ExamSection, center: f64, width: f64) -> Primitive {
        let title = TextBlock::centered(
            &format!("{} [{} Marks]", section.name.to_uppercase(), section.section_marks),
            Font::HelveticaBold,
            12.0,
            center,
            width,
        );
        let guidance = TextBlock::centered(&section.guidance, Font::HelveticaOblique, 10.0, center, width);
        let height = title.height() + guidance.height();
        Primitive::cluster(height, vec![(0.0, title.clone().into()), (title.height(), guidance.into())])
    }

    /// Number, marks and wrapped text, with options for multiple choice.
    fn question_block(question: &AssessmentQuestion, page_width: f64) -> Primitive {
        let text = TextBlock::new(&question.question, Font::Helvetica, 10.0, TEXT_X, page_width - 40.0);
        let mut children: Vec<(f64, Primitive)> = vec![
            (0.0, TextBlock::single(&format!("{}.", question.id), Font::Helvetica, 10.0, NUMBER_X).into()),
            (
                0.0,
                TextBlock::right_aligned(&format!("[{}]", question.marks), Font::Helvetica, 10.0, page_width - 20.0)
                    .into(),
            ),
        ];
        let mut height = text.height();
        children.insert(1, (0.0, text.into()));

        if question.question_type == QuestionType::MultipleChoice {
            height += 3.0;
            for option in &question.options {
                children.push((height, TextBlock::single(option, Font::Helvetica, 10.0, OPTION_X).into()));
                height += 5.0;
            }
        }
        Primitive::cluster(height, children)
    }

    fn render_questions(&self, canvas: &mut PaginatedCanvas) {
        let exam = self.exam;
        let geometry = *canvas.geometry();
        let page_width = geometry.width;
        let writing_line = Stroke::new(0.1).with_color(Color::gray8(150));

        canvas.set_running_header(
            TextBlock::single(
                &format!("{} - {} {}", exam.subject, exam.term, exam.year),
                Font::Helvetica,
                10.0,
                page_width - 60.0,
            ),
            6.0,
        );
        canvas.new_page();

        for section in &exam.sections {
            canvas.break_if_below(SECTION_LIMIT);

            let first = section
                .questions
                .first()
                .map_or(0.0, |q| Self::question_block(q, page_width).height());
            canvas.start_section_with(
                self.section_header(section, geometry.center_x(), geometry.content_width()),
                first,
                PlaceOptions::gap(5.0),
            );

            for question in &section.questions {
                let block = Self::question_block(question, page_width);
                match question.question_type {
                    QuestionType::MultipleChoice => {
                        canvas.place_with(block, PlaceOptions::gap(3.0));
                    }
                    QuestionType::Structured => {
                        canvas.place_with(block, PlaceOptions::gap(3.0));
                        for _ in 0..ruled_lines(question.marks) {
                            canvas.place(
                                Rule::horizontal(TEXT_X, page_width - 25.0, LINE_SPACING)
                                    .with_offset(2.0)
                                    .with_stroke(writing_line.clone()),
                            );
                        }
                        canvas.advance(2.0);
                    }
                    // Compositions are written on separate sheets.
                    QuestionType::Composition => {
                        canvas.place_with(block, PlaceOptions::gap(3.0));
                        canvas.place(Primitive::Space(COMPOSITION_SPACE));
                    }
                }
            }
            canvas.place(Primitive::Space(SECTION_SPACE));
        }
        canvas.clear_running_header();
    }

    fn render_marking_guide(&self, canvas: &mut PaginatedCanvas) {
        let geometry = *canvas.geometry();
        let answer_width = geometry.width - 30.0;

        canvas.new_page();
        canvas.set_cursor(15.0);
        canvas.place_with(
            TextBlock::centered(
                "MARKING GUIDE (TEACHER'S COPY)",
                Font::TimesBold,
                16.0,
                geometry.center_x(),
                geometry.content_width(),
            ),
            PlaceOptions::gap(4.0),
        );

        for section in &self.exam.sections {
            canvas.start_section_with(
                TextBlock::single(&section.name, Font::HelveticaBold, 12.0, NUMBER_X),
                5.0,
                PlaceOptions::gap(2.0),
            );
            for question in &section.questions {
                let answer = TextBlock::new(
                    &format!("{}. {}", question.id, question.answer),
                    Font::Helvetica,
                    10.0,
                    NUMBER_X,
                    answer_width,
                );
                canvas.place_with(answer, PlaceOptions::gap(2.0));
            }
            canvas.place(Primitive::Space(SECTION_SPACE));
        }
    }
}

impl DocumentBuilder for ExamDocumentBuilder<'_> {
    fn file_name(&self) -> String {
        format!("{}_End_Term_Exam.pdf", self.exam.subject)
    }

    fn title(&self) -> String {
        format!("{} {} {}", self.exam.subject, self.exam.term, self.exam.year)
    }

    fn render(&self, canvas: &mut PaginatedCanvas) -> Result<()> {
        canvas.set_subject(&self.exam.subject);
        canvas.set_author(&self.exam.school_name);

        self.render_cover(canvas);
        self.render_questions(canvas);
        self.render_marking_guide(canvas);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ruled_line_count() {
        assert_eq!(ruled_lines(1), 1);
        assert_eq!(ruled_lines(4), 4);
        assert_eq!(ruled_lines(10), 10);
        assert_eq!(ruled_lines(u32::MAX), MAX_QUESTION_MARKS);
    }

    #[test]
    fn test_question_block_uses_given_id() {
        let question = AssessmentQuestion {
            id: 21,
            section: "Section B".to_string(),
            question_type: QuestionType::Structured,
            question: "Name two uses of water.".to_string(),
            options: Vec::new(),
            answer: "Drinking, washing".to_string(),
            marks: 2,
        };
        let block = ExamDocumentBuilder::question_block(&question, 210.0);

        assert_eq!(block.text(), "21. | Name two uses of water. | [2]");
        assert_eq!(block.height(), 5.0);
    }
}
