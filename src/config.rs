use anyhow::{Context, Result};
use clap::Parser;
use std::{env, path::PathBuf};

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
    pub cors: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "JSON-file backed asset tracking API")]
pub struct Args {
    /// Host to bind to (overrides ASSET_STORE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides ASSET_STORE_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// JSON file holding the asset collection (overrides ASSET_STORE_DATA_FILE)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Directory served for `/` and other non-API paths (overrides ASSET_STORE_STATIC_DIR)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Disable the permissive CORS layer (same as ASSET_STORE_CORS=false)
    #[arg(long)]
    pub no_cors: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::resolve(Args::parse(), |key| env::var(key))
    }

    /// Merge parsed CLI args over values looked up through `var`.
    pub fn resolve<F>(args: Args, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        // --- Environment fallback ---
        let env_host = var("ASSET_STORE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match var("ASSET_STORE_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing ASSET_STORE_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 5000,
            Err(err) => return Err(err).context("reading ASSET_STORE_PORT"),
        };
        let env_data = var("ASSET_STORE_DATA_FILE").unwrap_or_else(|_| "assets.json".into());
        let env_static = var("ASSET_STORE_STATIC_DIR").unwrap_or_else(|_| "static".into());
        let env_cors = match var("ASSET_STORE_CORS") {
            Ok(value) => parse_flag(&value)
                .with_context(|| format!("parsing ASSET_STORE_CORS value `{}`", value))?,
            Err(_) => true,
        };

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            data_file: args.data_file.unwrap_or_else(|| env_data.into()),
            static_dir: args.static_dir.unwrap_or_else(|| env_static.into()),
            cors: env_cors && !args.no_cors,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got `{}`", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, env::VarError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn defaults_without_env_or_args() {
        let cfg = AppConfig::resolve(Args::default(), lookup(&[])).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.data_file, PathBuf::from("assets.json"));
        assert_eq!(cfg.static_dir, PathBuf::from("static"));
        assert!(cfg.cors);
        assert_eq!(cfg.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn args_override_env() {
        let env = lookup(&[
            ("ASSET_STORE_HOST", "10.0.0.1"),
            ("ASSET_STORE_PORT", "8080"),
            ("ASSET_STORE_DATA_FILE", "/var/lib/assets.json"),
        ]);
        let args = Args {
            port: Some(9000),
            data_file: Some("local.json".into()),
            ..Args::default()
        };
        let cfg = AppConfig::resolve(args, env).unwrap();
        assert_eq!(cfg.host, "10.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.data_file, PathBuf::from("local.json"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = AppConfig::resolve(Args::default(), lookup(&[("ASSET_STORE_PORT", "http")]))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("ASSET_STORE_PORT"));
    }

    #[test]
    fn cors_can_be_disabled_either_way() {
        let from_env =
            AppConfig::resolve(Args::default(), lookup(&[("ASSET_STORE_CORS", "false")])).unwrap();
        assert!(!from_env.cors);

        let from_flag = AppConfig::resolve(
            Args {
                no_cors: true,
                ..Args::default()
            },
            lookup(&[]),
        )
        .unwrap();
        assert!(!from_flag.cors);

        assert!(
            AppConfig::resolve(Args::default(), lookup(&[("ASSET_STORE_CORS", "maybe")])).is_err()
        );
    }
}
