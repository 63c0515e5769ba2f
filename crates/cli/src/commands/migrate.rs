use boxoffice_migrate::{MigrateResult, MigrationRunner};
use console::style;

pub async fn run(runner: &MigrationRunner) -> MigrateResult<()> {
    let result = runner.run().await?;

    if result.applied_count == 0 {
        println!("Nothing to migrate ({} already applied)", result.skipped_count);
        return Ok(());
    }

    for id in &result.applied_migrations {
        println!("  {} {}", style("✓").green(), id);
    }
    println!(
        "Applied {} migration(s) in {}ms",
        result.applied_count, result.execution_time_ms
    );

    Ok(())
}
