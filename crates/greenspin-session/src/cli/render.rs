/*
[INPUT]:  TaskSession snapshots
[OUTPUT]: Styled terminal output
[POS]:    CLI presentation helpers
[UPDATE]: When session fields shown to the user change
*/

use console::style;

use greenspin_session::state::{FailureKind, SubmitBlocker, TaskSession};

pub fn print_session(session: &TaskSession) {
    match &session.task {
        Some(task) => {
            println!("\n{}", style("Assigned Task").bold().green());
            println!("  {}", task.description);
            println!(
                "  {} points | {}",
                style(task.points_awarded).bold(),
                style(&task.monetary_value).bold()
            );
            println!("\n{}", style("Environmental impact").bold().green());
            println!("  {}", task.impact_note);
        }
        None => println!("{}", style("No task assigned.").yellow()),
    }

    if !session.proof_text.is_empty() || session.proof_photo.is_some() {
        println!("\n{}", style("Proof").bold());
        if !session.proof_text.is_empty() {
            println!("  text:  {}", session.proof_text);
        }
        if let Some(photo) = &session.proof_photo {
            println!("  photo: {} ({} bytes)", photo.file_name, photo.len());
        }
    }

    if let Some(verdict) = &session.validation_verdict {
        println!("\n{} {}", style("Validation Result:").bold(), verdict);
    }

    if let Some(failure) = &session.last_error {
        let label = match failure.kind {
            FailureKind::TaskRequest => "Could not fetch a task",
            FailureKind::Validation => "Validation request failed",
        };
        println!("\n{} {}", style(label).red().bold(), style(&failure.message).dim());
    }
}

pub fn blocker_hint(blocker: SubmitBlocker) -> &'static str {
    match blocker {
        SubmitBlocker::NoTask => "Spin for a task first.",
        SubmitBlocker::EmptyProofText => "Describe your result before submitting.",
        SubmitBlocker::MissingPhoto => "Attach a photo before submitting.",
    }
}
