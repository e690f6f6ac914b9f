//! # Manejo de una conexión
//! src/server/connection.rs
//!
//! Cada conexión aceptada es una tarea del pool que recorre:
//!
//! ```text
//! Accepted → Read → { ParseFailed → 400 | ParseOK → Route } → Send → Close
//! ```
//!
//! El socket pertenece sólo al worker que ejecuta la tarea y se cierra al
//! salir de `handle_connection`, en todos los caminos. Un error en una
//! conexión nunca afecta a otras.

use super::RequestCounter;
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;
use std::io::{self, ErrorKind, Read};
use std::net::TcpStream;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Tamaño de cada lectura del socket
pub const READ_CHUNK: usize = 4096;

/// Errores de lectura de una conexión
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("request exceeds the {limit} byte limit")]
    RequestTooLarge { limit: usize },

    #[error("peer closed the connection without sending data")]
    Disconnected,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Estado compartido (sólo lectura) por todas las tareas de conexión
pub struct ConnectionContext {
    pub router: Router,
    pub counter: RequestCounter,
    pub max_request_size: usize,
    pub read_timeout: Option<Duration>,
}

/// Lee un request completo
///
/// Sigue leyendo hasta tener el bloque de headers y los `Content-Length`
/// bytes del body, o hasta que el peer cierre. Si lo acumulado (o lo
/// declarado) supera `max_size` falla con `RequestTooLarge`.
pub fn read_request<R: Read>(reader: &mut R, max_size: usize) -> Result<Vec<u8>, ConnectionError> {
    let mut buffer = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if buffer.is_empty() => return Err(e.into()),
            Err(e) => {
                // Timeout u otro error con datos parciales: se parsea lo que llegó
                debug!(error = %e, bytes = buffer.len(), "lectura interrumpida");
                break;
            }
        };

        buffer.extend_from_slice(&chunk[..n]);

        if let Some(expected) = Request::expected_length(&buffer) {
            if expected > max_size {
                return Err(ConnectionError::RequestTooLarge { limit: max_size });
            }
            if buffer.len() >= expected {
                break;
            }
        }

        if buffer.len() > max_size {
            return Err(ConnectionError::RequestTooLarge { limit: max_size });
        }
    }

    if buffer.is_empty() {
        return Err(ConnectionError::Disconnected);
    }

    Ok(buffer)
}

/// Atiende una conexión de principio a fin
pub fn handle_connection(mut stream: TcpStream, context: &ConnectionContext) {
    let start = Instant::now();
    let request_number = context.counter.increment();
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    if let Err(e) = stream.set_read_timeout(context.read_timeout) {
        warn!(%peer, error = %e, "no se pudo configurar el timeout de lectura");
    }

    let response = match read_request(&mut stream, context.max_request_size) {
        Ok(buffer) => respond(&buffer, &context.router),
        Err(ConnectionError::RequestTooLarge { limit }) => {
            warn!(%peer, limit, "request demasiado grande");
            Response::error_page(StatusCode::PayloadTooLarge)
        }
        Err(e) => {
            // Peer desconectado: se cierra sin responder
            debug!(%peer, error = %e, "conexión cerrada sin request");
            return;
        }
    };

    if let Err(e) = response.send(&mut stream) {
        warn!(%peer, error = %e, "no se pudo enviar la respuesta");
        return;
    }

    debug!(
        %peer,
        request = request_number,
        status = response.status_code(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "respuesta enviada"
    );
}

/// Parsea y despacha; un panic del handler se convierte en 500
fn respond(buffer: &[u8], router: &Router) -> Response {
    let request = match Request::parse(buffer) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "request inválido");
            return Response::error_page(StatusCode::BadRequest);
        }
    };

    debug!(method = request.method(), path = request.path(), "request");

    match panic::catch_unwind(AssertUnwindSafe(|| router.handle(&request))) {
        Ok(response) => response,
        Err(_) => {
            error!(method = request.method(), path = request.path(), "el handler terminó con panic");
            Response::error_page(StatusCode::InternalServerError)
        }
    }
}
