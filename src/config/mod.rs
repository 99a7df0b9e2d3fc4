pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::{load_global_settings, load_settings_from, save_settings_to};
pub use paths::{
    default_global_config_path, default_state_root, CONFIG_PATH_ENV, GLOBAL_SETTINGS_FILE_NAME,
    GLOBAL_STATE_DIR, RECEIPTS_DIR_NAME,
};
pub use settings::{
    Settings, DEFAULT_INSTITUTION_NAME, DEFAULT_TRANSITION_DELAY_MS, MAX_TRANSITION_DELAY_MS,
};
