use crate::pipeline::RowOutcome;

/// Per-run accumulation of row outcomes, in arrival order.
///
/// Owned by the batch loop: a single writer appends one outcome per attempted
/// row, and the summary is rendered once at the end of the run.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<RowOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: RowOutcome) {
        self.outcomes.push(outcome);
    }

    /// Rows fed to the pipeline.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Rows that reached the processed state.
    pub fn processed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Processed { .. }))
            .count()
    }

    pub fn outcomes(&self) -> &[RowOutcome] {
        &self.outcomes
    }

    /// Human-readable run summary: counts, then an itemized failure list or an
    /// explicit all-succeeded line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("--- batch summary ---\n");
        out.push_str(&format!("rows attempted: {}\n", self.attempted()));
        out.push_str(&format!("rows processed: {}\n", self.processed()));

        let failures: Vec<&RowOutcome> = self
            .outcomes
            .iter()
            .filter(|o| !matches!(o, RowOutcome::Processed { .. }))
            .collect();

        if failures.is_empty() {
            out.push_str("all attempted rows were processed\n");
        } else {
            out.push_str("rows not found or failed:\n");
            for outcome in failures {
                match outcome {
                    RowOutcome::NotFound { identifier } => {
                        out.push_str(&format!("- {identifier} (source image not found)\n"));
                    }
                    RowOutcome::Failed { identifier, cause } => {
                        out.push_str(&format!("- {identifier} ({cause})\n"));
                    }
                    RowOutcome::Processed { .. } => {}
                }
            }
        }
        out
    }
}
