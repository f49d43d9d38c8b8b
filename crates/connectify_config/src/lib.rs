use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources are layered, later ones overriding earlier ones:
///
/// 1. `<config dir>/default` (any format the `config` crate understands, optional)
/// 2. `<config dir>/<RUN_ENV>` (optional, `RUN_ENV` defaults to `debug`)
/// 3. Environment variables prefixed with `PREFIX` (default `HTR`), using `__` as
///    the nesting separator, e.g. `HTR_DATABASE__URL`.
///
/// The config directory is `CONFIG_DIR` when set, `./config` otherwise.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir)
}

/// Loads the configuration from an explicit directory.
///
/// Same layering as [`load_config`], without consulting `CONFIG_DIR`.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "HTR".to_string());

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    debug!("Loading default config from {}", default_path.display());
    debug!("Loading {} config from {}", run_env, env_path.display());

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` when set, otherwise the first command line
/// argument if it starts with `.env`, otherwise `.env`. Loading happens once per
/// process; a missing file is not an error.
///
/// Returns the path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_config_from_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yml"),
            r#"
server:
  host: "0.0.0.0"
  port: 9090
use_booking: true
database:
  url: "sqlite://data/test.db"
booking:
  professionals: ["p-1", "p-2"]
  max_booking_minutes: 240
"#,
        )
        .unwrap();

        let config = load_config_from(dir.path()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert!(config.use_booking);
        assert_eq!(config.database.unwrap().url, "sqlite://data/test.db");
        let booking = config.booking.unwrap();
        assert_eq!(booking.professionals, vec!["p-1", "p-2"]);
        assert_eq!(booking.max_booking_minutes, Some(240));
    }

    #[test]
    fn test_optional_sections_default_to_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nhost = \"127.0.0.1\"\nport = 8081\n",
        )
        .unwrap();

        let config = load_config_from(dir.path()).unwrap();

        assert_eq!(config.server.port, 8081);
        assert!(!config.use_booking);
        assert!(config.database.is_none());
        assert!(config.booking.is_none());
    }

    #[test]
    fn test_missing_server_section_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from(dir.path()).is_err());
    }

    #[test]
    fn test_default_app_config_enables_booking() {
        let config = AppConfig::default();
        assert!(config.use_booking);
        assert_eq!(config.server.port, 8080);
        assert!(config.database.is_some());
    }
}
