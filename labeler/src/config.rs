//! Application configuration: defaults plus environment overrides.

use std::path::PathBuf;

/// Runtime configuration shared by the CLI and the web UI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Printer identifier (usb://, file://, or CUPS queue name).
    pub printer: String,
    /// Label media type; only 62mm continuous tape is supported.
    pub label_type: String,
    /// QR glyph size for single labels.
    pub qr_size: u32,
    /// Grid geometry.
    pub columns: u32,
    pub rows: u32,
    /// Products per batch before a cut and a checkpoint.
    pub batch_size: usize,
    /// Web UI listen port.
    pub server_port: u16,
    /// Directory for uploaded CSV files.
    pub upload_dir: PathBuf,
    /// Directory holding the bundled sample catalog.
    pub sample_dir: PathBuf,
    /// Skip opening the browser when the web UI starts.
    pub no_browser: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            printer: "usb://0x04f9:0x2042".to_string(),
            label_type: "62".to_string(),
            qr_size: 200,
            columns: 4,
            rows: 1,
            batch_size: 20,
            server_port: 5000,
            upload_dir: PathBuf::from("uploads"),
            sample_dir: PathBuf::from("defaults"),
            no_browser: false,
        }
    }
}

impl AppConfig {
    /// Build a config from defaults overridden by the environment
    /// (`.env` is honored when present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Ok(printer) = std::env::var("QL_PRINTER") {
            config.printer = printer;
        }
        if let Some(port) = env_parse("PORT") {
            config.server_port = port;
        }
        if let Ok(dir) = std::env::var("QL_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("QL_SAMPLE_DIR") {
            config.sample_dir = PathBuf::from(dir);
        }
        config.no_browser = std::env::var("NO_BROWSER").is_ok();

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_ql700() {
        let config = AppConfig::default();
        assert_eq!(config.printer, "usb://0x04f9:0x2042");
        assert_eq!(config.label_type, "62");
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.columns * config.rows, 4);
    }
}
