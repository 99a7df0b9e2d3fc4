use crate::config::{
    default_global_config_path, load_settings_from, save_settings_to, ConfigError, Settings,
};

fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn cmd_config(args: &[String]) -> Result<String, String> {
    let path = default_global_config_path().map_err(map_config_err)?;
    match args.first().map(String::as_str) {
        None | Some("show") => {
            let settings = load_settings_from(&path).map_err(map_config_err)?;
            let body = serde_yaml::to_string(&settings)
                .map_err(|e| format!("failed to encode settings: {e}"))?;
            let source = if path.exists() {
                path.display().to_string()
            } else {
                format!("{} (not found; defaults)", path.display())
            };
            Ok(format!("config={source}\n{}", body.trim_end()))
        }
        Some("init") => {
            if path.exists() {
                return Ok(format!("config already exists\nconfig={}", path.display()));
            }
            let written = save_settings_to(&path, &Settings::default()).map_err(map_config_err)?;
            Ok(format!("config initialized\nconfig={}", written.display()))
        }
        Some(other) => Err(format!(
            "unknown config subcommand `{other}`; expected show or init"
        )),
    }
}
