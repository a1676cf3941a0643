//! Seed command handler

use crate::config::Config;
use crate::db::Store;
use crate::services::seed::seed_defaults;

pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let report = seed_defaults(&store, config).await?;

    if report.admin_created {
        println!("Created admin account: {}", config.seed.admin_email);
    } else {
        println!("Admin account already exists: {}", config.seed.admin_email);
    }

    if report.rooms_created > 0 {
        println!("Created {} sample rooms", report.rooms_created);
    } else {
        println!("Room catalog left unchanged");
    }

    Ok(())
}
