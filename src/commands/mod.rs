//! # Comandos del Servidor
//!
//! Handlers de la aplicación que registra el binario. El núcleo del
//! servidor no depende de ellos: son ejemplos de uso del `Router`.

pub mod basic;

// Re-exportar funciones útiles
pub use basic::*;

use crate::router::Router;
use crate::server::RequestCounter;

/// Registra las rutas de la aplicación de ejemplo
pub fn register(router: &mut Router, counter: RequestCounter, workers: usize) {
    router.get("/api/status", StatusHandler::new(counter, workers));
    router.post("/submit", submit_handler);
    router.set_not_found_handler(not_found_page);
}
