pub mod paths;
pub mod settings;

pub use settings::{get_app_config, AppConfig, CoachConfig, ReminderConfig};
