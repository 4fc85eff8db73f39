//! Document I/O for rendered proofs

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Save a rendered document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, ImposeError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
