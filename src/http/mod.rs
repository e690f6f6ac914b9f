//! # Módulo HTTP
//!
//! Implementa la parte del protocolo que usa el servidor, sin librerías
//! de alto nivel:
//!
//! - Parsing de un request por conexión
//! - Construcción y serialización de responses
//! - Códigos de estado
//! - Percent-decoding de query strings y formularios
//!
//! No hay conexiones persistentes, chunked transfer encoding ni
//! `100-continue`: el servidor siempre cierra tras una respuesta.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Connection: close\r\n
//! Content-Length: 13\r\n
//! Content-Type: application/json\r\n
//! \r\n
//! {"ok": true}
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP
pub mod url;       // Percent-encoding

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{ParseError, Request};
pub use response::{escape_html, Response};
pub use status::StatusCode;
