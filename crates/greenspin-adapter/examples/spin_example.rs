//! Request one task from a locally running task service and print it.
//!
//! Run with: `cargo run -p greenspin-adapter --example spin_example`

use greenspin_adapter::{GreenSpinClient, TaskService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = GreenSpinClient::new()?;
    println!("Requesting task from {}", client.base_url());

    let task = client.request_new_task().await?;
    println!("Task: {}", task.desc);
    println!("Impact: {}", task.task);
    println!("Points: {} | Value: {}", task.points, task.value);

    Ok(())
}
