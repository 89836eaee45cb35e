use super::{place_flowing, DocumentBuilder};
use crate::content::LessonPlan;
use crate::error::Result;
use crate::graphics::Color;
use crate::layout::{
    Frame, HeaderStyle, PaginatedCanvas, PlaceOptions, Primitive, Table, TableCell, TableOptions,
    TextBlock,
};
use crate::text::Font;
use regex::Regex;

lazy_static::lazy_static! {
    static ref LEADING_BULLET: Regex = Regex::new(r"^[•\-\*]\s*").expect("bullet pattern is valid");
}

const LEFT: f64 = 10.0;
const INDENT: f64 = 15.0;
const BODY_SIZE: f64 = 10.0;

/// The evaluation block never starts below this line.
const EVALUATION_LIMIT: f64 = 250.0;
const EVALUATION_BOX_HEIGHT: f64 = 35.0;

const HEADER_COLUMNS: [f64; 4] = [35.0, 60.0, 35.0, 60.0];
const STEP_COLUMNS: [f64; 5] = [25.0, 15.0, 50.0, 50.0, 50.0];
const STEP_HEADINGS: [&str; 5] = [
    "Stage",
    "Time",
    "Teacher's Activity",
    "Learner's Activity",
    "Methods/Competencies",
];

/// Strip a bullet the content source may already have added.
pub(crate) fn clean_bullet(item: &str) -> String {
    LEADING_BULLET.replace(item, "").into_owned()
}

/// Daily lesson plan: header grid, objectives, materials, assumed knowledge,
/// the lesson development table and an evaluation box.
pub struct LessonDocumentBuilder<'a> {
    plan: &'a LessonPlan,
}

impl<'a> LessonDocumentBuilder<'a> {
    pub fn new(plan: &'a LessonPlan) -> Self {
        Self { plan }
    }

    fn header_table(&self) -> Result<Table> {
        let plan = self.plan;
        let mut table = Table::new(LEFT, HEADER_COLUMNS.to_vec());
        table.set_options(TableOptions {
            cell_padding: 2.0,
            font_size: BODY_SIZE,
            ..TableOptions::default()
        });

        let pair = |label: &str, value: &str| [TableCell::label(label), TableCell::new(value)];
        let rows = [
            (pair("DATE", &plan.date), pair("TIME", &format!("{} mins", plan.duration))),
            (pair("GRADE", &plan.grade), pair("SUBJECT", &plan.subject)),
            (pair("TOPIC", &plan.topic), pair("TEACHER", &plan.teacher_name)),
        ];
        for (left, right) in rows {
            table.add_custom_row(left.into_iter().chain(right).collect())?;
        }
        table.add_custom_row(vec![
            TableCell::label("SUB-TOPIC"),
            TableCell::new(plan.sub_topic.as_str()).with_colspan(3),
        ])?;
        Ok(table)
    }

    fn steps_table(&self) -> Result<Table> {
        let mut table = Table::new(LEFT, STEP_COLUMNS.to_vec());
        table.set_options(TableOptions {
            cell_padding: 3.0,
            font_size: 9.0,
            line_height: 4.5,
            header_style: Some(HeaderStyle {
                background_color: Color::gray8(230),
                text_color: Color::black(),
                font: Font::HelveticaBold,
            }),
            ..TableOptions::default()
        });
        table.set_column_font(0, Font::HelveticaBold);
        table.add_header_row(STEP_HEADINGS.iter().map(|h| h.to_string()).collect())?;

        for step in &self.plan.lesson_steps {
            table.add_row(vec![
                step.stage.clone(),
                step.time.clone(),
                step.teacher_activity.clone(),
                step.learner_activity.clone(),
                step.methods.clone(),
            ])?;
        }
        Ok(table)
    }

    fn heading(text: &str) -> TextBlock {
        TextBlock::single(text, Font::HelveticaBold, BODY_SIZE, LEFT)
    }

    fn evaluation_block(&self, width: f64) -> Primitive {
        let mut children = vec![
            (0.0, Self::heading("EVALUATION:").into()),
            (5.0, Frame::outline(LEFT, width, EVALUATION_BOX_HEIGHT, 0.1).into()),
        ];
        if !self.plan.evaluation.is_empty() {
            let text = TextBlock::new(&self.plan.evaluation, Font::Helvetica, BODY_SIZE, LEFT + 2.0, width - 4.0);
            children.push((7.0, text.into()));
        }
        Primitive::cluster(5.0 + EVALUATION_BOX_HEIGHT, children)
    }
}

impl DocumentBuilder for LessonDocumentBuilder<'_> {
    fn file_name(&self) -> String {
        let subject = self.plan.subject.split_whitespace().collect::<Vec<_>>().join("_");
        format!("{subject}_LessonPlan_{}.pdf", self.plan.date)
    }

    fn title(&self) -> String {
        format!("Lesson Plan: {}", self.plan.topic)
    }

    fn render(&self, canvas: &mut PaginatedCanvas) -> Result<()> {
        let plan = self.plan;
        let geometry = *canvas.geometry();
        let width = geometry.content_width();
        canvas.set_subject(&plan.subject);
        canvas.set_author(&plan.teacher_name);

        canvas.set_cursor(10.0);
        canvas.place_with(
            TextBlock::centered("DETAILED LESSON PLAN", Font::HelveticaBold, 16.0, geometry.center_x(), width),
            PlaceOptions::gap(2.0),
        );
        canvas.place_table(&self.header_table()?);
        canvas.advance(4.0);

        canvas.start_section(Self::heading("OBJECTIVES:"), 10.0);
        canvas.place(TextBlock::single(
            "By the end of the lesson, learners should be able to:",
            Font::Helvetica,
            BODY_SIZE,
            LEFT,
        ));
        for objective in &plan.objectives {
            let bullet = format!("• {}", clean_bullet(objective));
            canvas.place(TextBlock::new(&bullet, Font::Helvetica, BODY_SIZE, INDENT, width - 5.0));
        }
        canvas.advance(2.0);

        canvas.start_section(Self::heading("SOM / MEDIA / MATERIALS:"), 5.0);
        let materials = TextBlock::new(&plan.materials.join(", "), Font::Helvetica, BODY_SIZE, LEFT, width);
        place_flowing(canvas, materials, 2.0);

        canvas.start_section(Self::heading("ASSUMED KNOWLEDGE:"), 5.0);
        let assumed = TextBlock::new(&plan.assumed_knowledge, Font::Helvetica, BODY_SIZE, INDENT, width - 5.0);
        place_flowing(canvas, assumed, 5.0);

        let steps = self.steps_table()?;
        let first_rows = steps.header().map_or(0.0, |r| r.height())
            + steps.rows().first().map_or(0.0, |r| r.height());
        canvas.start_section_with(
            Self::heading("LESSON DEVELOPMENT:"),
            first_rows,
            PlaceOptions::gap(1.0),
        );
        canvas.place_table(&steps);
        canvas.advance(6.0);

        canvas.break_if_below(EVALUATION_LIMIT);
        canvas.place(self.evaluation_block(width));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::normalize_lesson;
    use crate::document::DocumentSettings;
    use crate::layout::PlacementKind;
    use serde_json::json;

    fn plan() -> LessonPlan {
        normalize_lesson(&json!({
            "grade": "Grade 5",
            "subject": "Science and Technology",
            "topic": "Plants",
            "subTopic": "Parts of a flower",
            "date": "2025-01-14",
            "duration": 35,
            "teacherName": "Mr Ncube",
            "objectives": ["- name the parts of a flower", "• draw a flower"],
        }))
    }

    #[test]
    fn test_clean_bullet() {
        assert_eq!(clean_bullet("- define a noun"), "define a noun");
        assert_eq!(clean_bullet("•  count to ten"), "count to ten");
        assert_eq!(clean_bullet("* spell"), "spell");
        assert_eq!(clean_bullet("plain"), "plain");
    }

    #[test]
    fn test_file_name_uses_subject_and_date() {
        let plan = plan();
        let builder = LessonDocumentBuilder::new(&plan);
        assert_eq!(builder.file_name(), "Science_and_Technology_LessonPlan_2025-01-14.pdf");
    }

    #[test]
    fn test_layout_order_and_content() {
        let plan = plan();
        let artifact = LessonDocumentBuilder::new(&plan)
            .build(&DocumentSettings::uncompressed())
            .unwrap();

        let order: Vec<&str> = [
            "DETAILED LESSON PLAN",
            "OBJECTIVES:",
            "SOM / MEDIA / MATERIALS:",
            "ASSUMED KNOWLEDGE:",
            "LESSON DEVELOPMENT:",
            "EVALUATION:",
        ]
        .to_vec();
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| {
                artifact
                    .placements
                    .iter()
                    .position(|p| p.text.contains(needle))
                    .unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(artifact.contains_text("• name the parts of a flower"));
        assert!(artifact.contains_text("• draw a flower"));
        assert!(!artifact.contains_text("• -"));
        assert!(artifact.contains_text("35 mins"));
        assert!(artifact.contains_text("Parts of a flower"));
    }

    #[test]
    fn test_one_table_row_per_step() {
        let plan = plan();
        let artifact = LessonDocumentBuilder::new(&plan)
            .build(&DocumentSettings::uncompressed())
            .unwrap();

        let step_rows = artifact
            .placements
            .iter()
            .filter(|p| p.kind == PlacementKind::Row)
            .filter(|p| {
                plan.lesson_steps.iter().any(|s| {
                    let first_word = s.stage.split_whitespace().next().unwrap_or_default();
                    p.text.starts_with(first_word)
                })
            })
            .count();
        assert_eq!(step_rows, plan.lesson_steps.len());
    }

    #[test]
    fn test_evaluation_box_never_split() {
        let mut plan = plan();
        plan.assumed_knowledge = "Learners know how seeds grow. ".repeat(60);
        let artifact = LessonDocumentBuilder::new(&plan)
            .build(&DocumentSettings::uncompressed())
            .unwrap();

        let evaluation = artifact.find("EVALUATION:").unwrap();
        assert_eq!(evaluation.kind, PlacementKind::Cluster);
        assert!(evaluation.bottom() <= 280.0 + 1e-6);
    }
}
