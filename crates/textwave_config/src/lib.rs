use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `config/default.*` at the workspace root
/// 2. `config/{RUN_ENV}.*` (RUN_ENV defaults to "debug")
/// 3. Environment variables prefixed with `TW` and separated by `__`
///    (e.g. `TW_SERVER__PORT=8086`)
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "TW".to_string());

    let config_root = env::var("CARGO_MANIFEST_DIR")
        .map(|dir| {
            PathBuf::from(dir)
                .ancestors()
                .nth(2) // go from crates/textwave_config to workspace root
                .map(|p| p.to_path_buf())
                .unwrap_or_default()
        })
        .unwrap_or_else(|_| PathBuf::from("."));

    let default_path = config_root.join("config/default");
    let env_path = config_root.join(format!("config/{}", run_env));

    let builder = Config::builder()
        .add_source(File::with_name(default_path.to_string_lossy().as_ref()).required(false))
        .add_source(File::with_name(env_path.to_string_lossy().as_ref()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(raw_config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// Loading happens once per process. The file defaults to ".env" and can be
/// overridden via the DOTENV_OVERRIDE environment variable or a leading
/// `.env*` command line argument.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
