//! # Pool HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP mínimo y concurrente: acepta conexiones TCP, parsea un
//! request por conexión, lo despacha por una tabla de rutas (con archivos
//! estáticos primero) y responde, todo sobre un pool fijo de workers en
//! vez de un thread por conexión.
//!
//! ## Arquitectura
//!
//! ```text
//! Acceptor ─► ThreadPool::enqueue ─► Worker ─► handle_connection
//!          ─► Request::parse ─► Router::handle ─► Response::send ─► close
//! ```
//!
//! - `pool`: Pool fijo de workers con cola FIFO
//! - `http`: Parsing de requests y construcción de responses
//! - `router`: Rutas exactas, archivos estáticos y 404
//! - `server`: Acceptor, manejo de conexiones y apagado
//! - `commands`: Handlers de la aplicación de ejemplo
//! - `config`: Configuración CLI / variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use pool_http_server::config::Config;
//! use pool_http_server::http::{Request, Response};
//! use pool_http_server::server::Server;
//!
//! let mut server = Server::bind(Config::default()).expect("Error al iniciar servidor");
//! server.router_mut().get("/hello", |_req: &Request| Response::new().with_body("hola"));
//! server.run().expect("Error en el servidor");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod pool;
pub mod router;
pub mod server;

pub use error::ServerError;
