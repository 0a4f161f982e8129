use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base de la API; vacío = mismo origen que la página
    pub api_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub redirect_delay_ms: u32,
    pub scanner: ScannerConfig,
    pub signature: SignatureConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            redirect_delay_ms: 2000,
            scanner: ScannerConfig::default(),
            signature: SignatureConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub fps: u32,
    /// Lado del recuadro de lectura, en px
    pub qrbox: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self { fps: 10, qrbox: 250 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureConfig {
    pub pen_color: String,
    pub pen_width: f64,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            pen_color: "#000000".to_string(),
            pen_width: 2.5,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: option_env!("API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            redirect_delay_ms: option_env!("REDIRECT_DELAY_MS")
                .unwrap_or("2000").parse().unwrap_or(defaults.redirect_delay_ms),
            scanner: ScannerConfig {
                fps: option_env!("SCANNER_FPS")
                    .unwrap_or("10").parse().unwrap_or(defaults.scanner.fps),
                qrbox: option_env!("SCANNER_QRBOX")
                    .unwrap_or("250").parse().unwrap_or(defaults.scanner.qrbox),
            },
            signature: SignatureConfig {
                pen_color: option_env!("SIGNATURE_PEN_COLOR")
                    .unwrap_or("#000000").to_string(),
                pen_width: option_env!("SIGNATURE_PEN_WIDTH")
                    .unwrap_or("2.5").parse().unwrap_or(defaults.signature.pen_width),
            },
        }
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "");
        assert_eq!(config.redirect_delay_ms, 2000);
        assert_eq!(config.scanner.fps, 10);
        assert_eq!(config.scanner.qrbox, 250);
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_logging_disabled_keeps_warnings() {
        let config = AppConfig {
            enable_logging: false,
            ..AppConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Warn);
    }
}
