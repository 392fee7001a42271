use anyhow::{Context, Result};
use std::env;

/// Runtime configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub spanner_emulator_host: Option<String>,
    pub spanner_project: String,
    pub spanner_instance: String,
    pub spanner_database: String,
    pub service_port: u16,
    pub service_host: String,
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} environment variable is required"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let service_port = match env::var("SERVICE_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .context("SERVICE_PORT must be a port number (0-65535)")?,
            Err(_) => 3000,
        };

        Ok(Config {
            spanner_emulator_host: env::var("SPANNER_EMULATOR_HOST").ok(),
            spanner_project: required("SPANNER_PROJECT")?,
            spanner_instance: required("SPANNER_INSTANCE")?,
            spanner_database: required("SPANNER_DATABASE")?,
            service_port,
            service_host: env::var("SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        })
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    /// Fully qualified path of the configured Spanner database
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.spanner_project, self.spanner_instance, self.spanner_database
        )
    }

    pub fn log_startup(&self) {
        match &self.spanner_emulator_host {
            Some(host) => tracing::info!("Using Spanner emulator at {}", host),
            None => tracing::info!("Using production Spanner"),
        }
        tracing::info!("Database: {}", self.database_path());
        tracing::info!("Binding HTTP listener to {}", self.bind_addr());
    }
}
