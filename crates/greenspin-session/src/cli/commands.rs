/*
[INPUT]:  SessionController, proof text and photo path from CLI flags
[OUTPUT]: One-shot spin and spin+validate flows with non-zero exit on failure
[POS]:    CLI non-interactive commands
[UPDATE]: When one-shot command behavior changes
*/

use anyhow::{Context, Result, anyhow};
use console::style;
use std::path::Path;

use greenspin_adapter::PhotoAttachment;
use greenspin_session::SessionController;

use super::render::print_session;

/// Spin once and print the revealed task
pub async fn run_spin(controller: &SessionController) -> Result<()> {
    controller.spin().await?;
    println!("{}", style("Spinning for a new task...").cyan());

    let session = controller.wait_settled().await;
    print_session(&session);

    match session.last_error {
        Some(failure) => Err(anyhow!("spin failed: {}", failure.message)),
        None => Ok(()),
    }
}

/// Spin, attach proof, submit, and print the verdict
pub async fn run_cycle(
    controller: &SessionController,
    proof: &str,
    photo_path: &Path,
) -> Result<()> {
    let photo = PhotoAttachment::from_path(photo_path)
        .await
        .with_context(|| format!("read photo {}", photo_path.display()))?;

    run_spin(controller).await?;

    controller.set_proof_text(proof).await?;
    controller.set_proof_photo(photo).await?;
    controller.submit().await.context("submit proof")?;
    println!("\n{}", style("Submitting proof for validation...").cyan());

    let session = controller.wait_settled().await;
    match (&session.validation_verdict, &session.last_error) {
        (Some(verdict), _) => {
            println!("\n{} {}", style("Validation Result:").bold(), verdict);
            Ok(())
        }
        (None, Some(failure)) => Err(anyhow!("validation failed: {}", failure.message)),
        (None, None) => Err(anyhow!("validation finished without a verdict")),
    }
}
