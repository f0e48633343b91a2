mod add;
mod backup;
mod info;
mod list;
mod migrate;
mod remove;
mod stats;
mod status;
mod tag;
mod update;
mod watch;

pub use add::cmd_add;
pub use backup::{cmd_backup_list, cmd_backup_now, cmd_backup_restore, cmd_export, cmd_import};
pub use info::cmd_info;
pub use list::cmd_list;
pub use migrate::{cmd_migrate, cmd_migrate_clear};
pub use remove::cmd_remove;
pub use stats::cmd_stats;
pub use status::cmd_status;
pub use tag::{cmd_tag_add, cmd_tag_list, cmd_tag_remove};
pub use update::cmd_update;
pub use watch::cmd_watch;

use crate::config::Config;
use crate::db::Store;

pub(crate) async fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
}

pub(crate) fn confirm(prompt: &str) -> anyhow::Result<bool> {
    println!("{prompt}");
    println!("Enter 'y' to confirm, anything else to cancel:");

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
