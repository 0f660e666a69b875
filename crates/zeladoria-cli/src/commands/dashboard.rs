//! Status dashboard

use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use colored::*;
use serde::Serialize;
use tabled::Tabled;
use zeladoria_workflow::{ComplaintWorkflow, DashboardSummary};

/// Table row for one count
#[derive(Debug, Serialize, Tabled)]
struct CountRow {
    group: String,
    name: String,
    count: usize,
}

fn rows(summary: &DashboardSummary) -> Vec<CountRow> {
    let status = summary.by_status.iter().map(|(s, n)| CountRow {
        group: "status".into(),
        name: s.to_string(),
        count: *n,
    });
    let category = summary.by_category.iter().map(|(c, n)| CountRow {
        group: "category".into(),
        name: c.to_string(),
        count: *n,
    });
    status.chain(category).collect()
}

/// Show the dashboard counts
pub async fn execute(workflow: &ComplaintWorkflow, format: OutputFormat) -> CliResult<()> {
    let summary = workflow.summary().await;
    match format {
        OutputFormat::Table => {
            println!(
                "{} {}   {} {}   {} {}   {} {}",
                "Total:".bold(),
                summary.total,
                "Pending:".bold(),
                summary.pending.to_string().yellow(),
                "Open:".bold(),
                summary.open,
                "Completed:".bold(),
                summary.completed.to_string().green(),
            );
            output::print_output(rows(&summary), format)
        }
        _ => output::print_serialized(&summary, format),
    }
}
