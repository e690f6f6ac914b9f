//! # Pool HTTP Server - Entry Point
//! src/main.rs
//!
//! Lee la configuración, registra los handlers de la aplicación y arranca
//! el servidor. Ctrl-C detiene el servidor esperando las conexiones
//! pendientes. Un fallo de arranque termina el proceso con código 1.

use pool_http_server::commands;
use pool_http_server::config::Config;
use pool_http_server::server::Server;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    init_logging();

    let config = Config::new();
    config.log_summary();

    let mut server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "no se pudo iniciar el servidor");
            std::process::exit(1);
        }
    };

    let counter = server.request_counter();
    let workers = server.worker_count();
    commands::register(server.router_mut(), counter, workers);

    let handle = server.shutdown_handle();
    if let Err(e) = ctrlc::set_handler(move || handle.shutdown()) {
        warn!(error = %e, "no se pudo instalar el handler de Ctrl-C");
    }

    if let Err(e) = server.run() {
        error!(error = %e, "error fatal");
        std::process::exit(1);
    }
}

/// Logging con `RUST_LOG` (por defecto `info`)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
