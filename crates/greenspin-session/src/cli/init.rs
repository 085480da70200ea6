/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When GreenSpinConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::PathBuf;

use greenspin_session::config::{GreenSpinConfig, ServiceConfig, SessionConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to GreenSpin Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a new greenspin configuration.").dim()
    );

    let theme = ColorfulTheme::default();
    let defaults = GreenSpinConfig::default();

    println!("\n{}", style("--- Task Service ---").bold());
    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Service base URL")
        .default(defaults.service.base_url.clone())
        .interact_text()?;

    let request_timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Request timeout in seconds (0 = wait indefinitely)")
        .default(0)
        .interact_text()?;

    println!("\n{}", style("--- Session ---").bold());
    let spin_delay_ms: u64 = Input::with_theme(&theme)
        .with_prompt("Spin animation delay (ms)")
        .default(defaults.session.spin_delay_ms)
        .interact_text()?;

    let config = GreenSpinConfig {
        service: ServiceConfig {
            base_url,
            request_timeout_secs: (request_timeout_secs > 0).then_some(request_timeout_secs),
            ..defaults.service
        },
        session: SessionConfig { spin_delay_ms },
    };
    config.validate().context("generated configuration is invalid")?;

    let yaml = serde_yaml::to_string(&config).context("failed to serialize config to YAML")?;

    std::fs::write(&output, yaml)
        .context(format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
