pub use super::auto_backups::Entity as AutoBackups;
pub use super::settings::Entity as Settings;
pub use super::tags::Entity as Tags;
pub use super::works::Entity as Works;
