//! Complaint intake

use crate::commands::records;
use crate::error::{CliError, CliResult};
use crate::output::{print_success, OutputFormat};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use zeladoria_types::{parse_date, Category, NewComplaint};
use zeladoria_workflow::ComplaintWorkflow;

/// Arguments for registering a complaint
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Protocol number issued by the city hall
    #[arg(short, long)]
    pub protocol: String,

    /// Street address of the problem
    #[arg(short, long)]
    pub address: String,

    /// Category (Pothole, Overgrowth, Lighting, Sidewalk, Sewage, Garbage, Tree, Other)
    #[arg(long)]
    pub category: Category,

    /// Ombudsman reference, if the complaint was escalated
    #[arg(long)]
    pub ombudsman: Option<String>,

    /// Free-text description
    #[arg(short, long)]
    pub description: Option<String>,

    /// JPEG or PNG photo of the problem
    #[arg(long)]
    pub photo: Option<PathBuf>,

    /// Creation date (dd/mm/yyyy), defaults to today
    #[arg(long, value_parser = parse_day)]
    pub date: Option<NaiveDate>,
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| e.to_string())
}

impl RegisterArgs {
    fn complaint(&self) -> NewComplaint {
        let mut new = NewComplaint::new(&self.protocol, &self.address, self.category);
        if let Some(reference) = &self.ombudsman {
            new = new.with_ombudsman_ref(reference);
        }
        if let Some(description) = &self.description {
            new = new.with_description(description);
        }
        new
    }
}

/// Register a complaint
pub async fn execute(
    args: RegisterArgs,
    workflow: &ComplaintWorkflow,
    format: OutputFormat,
) -> CliResult<()> {
    let photo = match &args.photo {
        Some(path) => Some(tokio::fs::read(path).await.map_err(|e| {
            CliError::InvalidInput(format!("cannot read photo {}: {}", path.display(), e))
        })?),
        None => None,
    };

    let new = args.complaint();
    let record = match args.date {
        Some(date) => workflow.intake_on(new, photo.as_deref(), date).await?,
        None => workflow.intake(new, photo.as_deref()).await?,
    };

    print_success(&format!("Registered complaint {}", record.protocol_id));
    records::print_record(&record, workflow, format)
}
