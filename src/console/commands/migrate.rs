use crate::configuration::get_configuration;
use actix_web::rt;
use anyhow::Context;
use sqlx::PgPool;

/// Applies the pending SQL migrations to the configured database.
pub struct MigrateCommand {}

impl MigrateCommand {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for MigrateCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::console::commands::CallableTrait for MigrateCommand {
    fn call(&self) -> anyhow::Result<()> {
        rt::System::new().block_on(async {
            let settings = get_configuration().context("Failed to read configuration")?;
            let db_pool = PgPool::connect(&settings.database.connection_string())
                .await
                .context("Failed to connect to database")?;

            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .context("Failed to run migrations")?;

            println!("Migrations applied to {}", settings.database.database_name);
            Ok(())
        })
    }
}
