use boxoffice_migrate::{MigrateResult, MigrationRollback, MigrationRunner};
use console::style;

pub async fn run(runner: &MigrationRunner, step: Option<usize>) -> MigrateResult<()> {
    let result = match step {
        Some(n) => runner.rollback_step(n).await?,
        None => runner.rollback_last_batch().await?,
    };

    if result.rolled_back_count == 0 {
        println!("Nothing to roll back");
        return Ok(());
    }

    for id in &result.rolled_back_migrations {
        println!("  {} {}", style("↩").yellow(), id);
    }
    println!(
        "Rolled back {} migration(s) in {}ms",
        result.rolled_back_count, result.execution_time_ms
    );

    Ok(())
}
