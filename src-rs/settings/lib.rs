pub mod form;
pub mod store;
pub mod types;

pub use form::{FormError, SettingField, SettingsForm};
pub use store::{load_settings, save_settings};
pub use types::Settings;
