//! Console logging setup
//!
//! Initialisation du système de tracing pour la console. Le niveau est
//! contrôlé par `RUST_LOG` quand la variable est définie, sinon par le
//! niveau par défaut des options.

use tracing_subscriber::EnvFilter;

/// Options d'initialisation du système de logging
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Niveau minimal quand `RUST_LOG` n'est pas défini
    pub default_level: String,
    /// Activer la sortie vers stderr/stdout
    pub enable_console: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            enable_console: true,
        }
    }
}

/// Initialise le système de logging console
///
/// # Exemple
/// ```rust,no_run
/// use pmoserver::logs::{init_logging, LoggingOptions};
///
/// init_logging(LoggingOptions::default());
/// ```
pub fn init_logging(options: LoggingOptions) {
    if !options.enable_console {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .init();
}
