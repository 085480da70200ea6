/*
[INPUT]:  SessionController and user input via CLI
[OUTPUT]: Menu-driven spin/proof/submit loop
[POS]:    CLI interactive flow
[UPDATE]: When session actions change
*/

use anyhow::Result;
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use greenspin_adapter::PhotoAttachment;
use greenspin_session::SessionController;

use super::render::{blocker_hint, print_session};

pub async fn run_interactive(controller: &SessionController) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("GreenSpin Weekly Challenge").bold().cyan());
    println!(
        "{}",
        style("Take on meaningful eco-tasks and earn rewards weekly.").dim()
    );

    loop {
        let actions = vec![
            "Spin for new task",
            "Write proof",
            "Attach photo",
            "Submit for validation",
            "Show session",
            "Exit",
        ];
        let selection = Select::with_theme(&theme)
            .with_prompt("Select action")
            .items(&actions)
            .default(0)
            .interact()?;

        match selection {
            0 => spin(controller).await?,
            1 => write_proof(controller, &theme).await?,
            2 => attach_photo(controller, &theme).await?,
            3 => submit(controller).await?,
            4 => print_session(&controller.snapshot()),
            _ => return Ok(()),
        }
    }
}

async fn spin(controller: &SessionController) -> Result<()> {
    controller.spin().await?;
    println!("{}", style("Spinning...").cyan());
    let session = controller.wait_settled().await;
    print_session(&session);
    Ok(())
}

async fn write_proof(controller: &SessionController, theme: &ColorfulTheme) -> Result<()> {
    let current = controller.snapshot().proof_text;
    let text: String = Input::with_theme(theme)
        .with_prompt("Describe your result")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;

    if let Err(err) = controller.set_proof_text(text).await {
        println!("{}", style(err).yellow());
    }
    Ok(())
}

async fn attach_photo(controller: &SessionController, theme: &ColorfulTheme) -> Result<()> {
    let path: String = Input::with_theme(theme)
        .with_prompt("Photo path")
        .interact_text()?;

    let photo = match PhotoAttachment::from_path(path.trim()).await {
        Ok(photo) => photo,
        Err(err) => {
            println!("{}", style(format!("Could not read photo: {err}")).red());
            return Ok(());
        }
    };

    if let Err(err) = controller.set_proof_photo(photo).await {
        println!("{}", style(err).yellow());
    }
    Ok(())
}

async fn submit(controller: &SessionController) -> Result<()> {
    let session = controller.snapshot();
    if let Some(blocker) = session.submit_blocker() {
        println!("{}", style(blocker_hint(blocker)).yellow());
        return Ok(());
    }

    if let Err(err) = controller.submit().await {
        println!("{}", style(err).yellow());
        return Ok(());
    }
    println!("{}", style("Validating...").cyan());

    let session = controller.wait_settled().await;
    print_session(&session);
    Ok(())
}
