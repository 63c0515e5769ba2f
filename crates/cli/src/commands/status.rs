use boxoffice_migrate::{MigrateResult, MigrationRunner, MigrationStatus};
use console::style;

pub async fn run(runner: &MigrationRunner) -> MigrateResult<()> {
    let status_list = runner.status().await?;

    println!("Migration Status:");
    println!("=================");

    if status_list.is_empty() {
        println!("No migrations registered");
        return Ok(());
    }

    let mut pending = 0;
    for (unit, status) in &status_list {
        match status {
            MigrationStatus::Applied { applied_at, batch } => {
                println!(
                    "  {} {} (batch {}, {})",
                    style("✓").green(),
                    unit.id,
                    batch,
                    applied_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            MigrationStatus::Pending => {
                pending += 1;
                println!("  {} {}", style("⏳").yellow(), unit.id);
            }
        }
    }

    println!();
    println!(
        "{} applied, {} pending",
        status_list.len() - pending,
        pending
    );

    Ok(())
}
