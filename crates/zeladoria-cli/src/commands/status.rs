//! Status updates

use crate::commands::records;
use crate::error::CliResult;
use crate::output::{print_success, OutputFormat};
use zeladoria_types::{ProtocolId, Status};
use zeladoria_workflow::ComplaintWorkflow;

/// Set the status of a complaint
pub async fn execute(
    workflow: &ComplaintWorkflow,
    protocol: &str,
    status: Status,
    format: OutputFormat,
) -> CliResult<()> {
    let protocol_id = ProtocolId::new(protocol.trim());
    let record = workflow.set_status(&protocol_id, status).await?;

    print_success(&format!(
        "Complaint {} is now {}",
        record.protocol_id, record.status
    ));
    records::print_record(&record, workflow, format)
}
