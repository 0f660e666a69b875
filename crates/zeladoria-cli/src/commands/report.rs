//! PDF report export

use crate::error::{CliError, CliResult};
use crate::output::{print_success, print_warning};
use std::path::PathBuf;
use zeladoria_types::ProtocolId;
use zeladoria_workflow::ComplaintWorkflow;

/// Write the PDF report of one complaint into `out_dir`
pub async fn execute(
    workflow: &ComplaintWorkflow,
    protocol: &str,
    out_dir: PathBuf,
) -> CliResult<()> {
    let protocol_id = ProtocolId::new(protocol.trim());
    let record = workflow
        .find(&protocol_id)
        .await
        .ok_or_else(|| CliError::NotFound(format!("complaint {}", protocol_id)))?;

    let photo = workflow.photos().resolve(&record.photo_ref);
    if record.has_photo() && photo.is_none() {
        print_warning(&format!(
            "Photo {} not found, report has no image",
            record.photo_ref
        ));
    }

    let bytes = zeladoria_report::render(&record, photo.as_deref())?;

    tokio::fs::create_dir_all(&out_dir).await?;
    let path = out_dir.join(zeladoria_report::suggested_filename(&record));
    tokio::fs::write(&path, bytes).await?;

    tracing::info!(protocol_id = %record.protocol_id, path = %path.display(), "Report written");
    print_success(&format!("Report written to {}", path.display()));
    Ok(())
}
