//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto (thread acceptor)
//! 2. Acepta conexiones y las encola en el pool
//! 3. En un worker: lee, parsea, despacha y responde
//! 4. Cierra la conexión tras una única respuesta

pub mod connection;
pub mod counter;
pub mod shutdown;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::ConnectionError;
pub use counter::RequestCounter;
pub use shutdown::ShutdownHandle;
pub use tcp::Server;
