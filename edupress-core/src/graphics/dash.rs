/// Line dash pattern as written by the `d` operator.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDashPattern {
    /// Alternating dash and gap lengths
    pub array: Vec<f64>,
    /// Offset into the pattern where stroking starts
    pub phase: f64,
}

impl LineDashPattern {
    pub fn solid() -> Self {
        Self {
            array: Vec::new(),
            phase: 0.0,
        }
    }

    pub fn dashed(dash: f64, gap: f64) -> Self {
        Self {
            array: vec![dash, gap],
            phase: 0.0,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.array.is_empty()
    }

    /// Same pattern with every length multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            array: self.array.iter().map(|v| v * factor).collect(),
            phase: self.phase * factor,
        }
    }

    pub fn to_pdf_operator(&self) -> String {
        let array = self
            .array
            .iter()
            .map(|v| format!("{v:.2}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!("[{array}] {:.2} d", self.phase)
    }
}
