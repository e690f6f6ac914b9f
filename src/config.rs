//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración con soporte para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./pool_http_server --port 8080 --workers 4 --static-dir ./static
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_WORKERS=8 STATIC_DIR=./static ./pool_http_server
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Tamaño mínimo aceptado para `max_request_size`
pub const MIN_REQUEST_SIZE: usize = 1024;

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "pool_http_server")]
#[command(about = "Servidor HTTP concurrente con pool fijo de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Número de workers del pool
    #[arg(short, long, default_value = "4", env = "HTTP_WORKERS")]
    pub workers: usize,

    /// Directorio de archivos estáticos (opcional)
    #[arg(long = "static-dir", env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Tamaño máximo de un request en bytes (headers + body)
    #[arg(long = "max-request-size", default_value = "1048576", env = "MAX_REQUEST_SIZE")]
    pub max_request_size: usize,

    /// Timeout de lectura del socket en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use pool_http_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout de lectura, `None` si está deshabilitado
    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.max_request_size < MIN_REQUEST_SIZE {
            return Err(format!("Max request size must be >= {} bytes", MIN_REQUEST_SIZE));
        }

        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        let static_dir = self
            .static_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());

        info!(
            address = %self.address(),
            workers = self.workers,
            static_dir = %static_dir,
            max_request_size = self.max_request_size,
            read_timeout_ms = self.read_timeout_ms,
            "configuración cargada"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            workers: 4,
            static_dir: None,
            max_request_size: 1024 * 1024,
            read_timeout_ms: 5_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.workers, 4);
        assert!(config.static_dir.is_none());
        assert_eq!(config.max_request_size, 1_048_576);
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_workers() {
        let mut config = Config::default();
        config.workers = 0;
        let result = config.validate();
        assert!(result.unwrap_err().contains("Workers"));
    }

    #[test]
    fn test_validate_tiny_request_size() {
        let mut config = Config::default();
        config.max_request_size = 10;
        let result = config.validate();
        assert!(result.unwrap_err().contains("Max request size"));
    }

    #[test]
    fn test_read_timeout() {
        let mut config = Config::default();
        assert_eq!(config.read_timeout(), Some(Duration::from_millis(5_000)));

        config.read_timeout_ms = 0;
        assert_eq!(config.read_timeout(), None);
    }

    #[test]
    fn test_parse_from_args() {
        let config = Config::parse_from([
            "pool_http_server",
            "--port",
            "9090",
            "-w",
            "8",
            "--static-dir",
            "./public",
            "--host",
            "127.0.0.1",
        ]);

        assert_eq!(config.port, 9090);
        assert_eq!(config.workers, 8);
        assert_eq!(config.static_dir, Some(PathBuf::from("./public")));
        assert_eq!(config.address(), "127.0.0.1:9090");
    }
}
