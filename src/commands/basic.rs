//! # Handlers de la aplicación de ejemplo
//! src/commands/basic.rs
//!
//! - `GET /api/status`: estado del servidor en JSON
//! - `POST /submit`: procesa el formulario de contacto
//! - página 404 personalizada

use crate::http::{escape_html, Request, Response, StatusCode};
use crate::router::Handler;
use crate::server::RequestCounter;
use serde::Serialize;

/// Cuerpo JSON de `/api/status`
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// Hora local (RFC 3339)
    pub time: String,
    /// Conexiones atendidas desde el arranque
    pub requests: u64,
    /// Workers del pool
    pub threads: usize,
}

/// Handler para /api/status
///
/// # Ejemplo de response
/// ```json
/// {"time": "2024-05-01T10:00:00+02:00", "requests": 1, "threads": 4}
/// ```
pub struct StatusHandler {
    counter: RequestCounter,
    threads: usize,
}

impl StatusHandler {
    pub fn new(counter: RequestCounter, threads: usize) -> Self {
        Self { counter, threads }
    }

    pub fn report(&self) -> StatusReport {
        StatusReport {
            time: chrono::Local::now().to_rfc3339(),
            requests: self.counter.get(),
            threads: self.threads,
        }
    }
}

impl Handler for StatusHandler {
    fn handle(&self, _request: &Request) -> Response {
        match serde_json::to_value(self.report()) {
            Ok(value) => Response::json(&value),
            Err(_) => Response::error_page(StatusCode::InternalServerError),
        }
    }
}

/// Handler para POST /submit
///
/// Lee `name`, `email` y `message` del formulario y devuelve una página
/// de confirmación. Los campos ausentes se muestran vacíos.
pub fn submit_handler(request: &Request) -> Response {
    let form = request.form();
    let field = |name: &str| escape_html(form.get(name).map(String::as_str).unwrap_or(""));

    let html = format!(
        "<html><head><title>Formulario enviado</title>\
         <link rel='stylesheet' href='/css/style.css'></head>\
         <body><h1>¡Enviado!</h1>\
         <p><strong>Nombre:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Mensaje:</strong> {}</p>\
         <p><a href='/form.html'>Volver al formulario</a></p>\
         </body></html>",
        field("name"),
        field("email"),
        field("message"),
    );

    Response::html(StatusCode::Ok, &html)
}

/// Página 404 de la aplicación
pub fn not_found_page(request: &Request) -> Response {
    let html = format!(
        "<html><head><title>Página no encontrada</title></head>\
         <body><h1>404 - Página no encontrada</h1>\
         <p>La página \"{}\" no existe.</p>\
         <a href='/'>Volver al inicio</a></body></html>",
        escape_html(request.path())
    );

    Response::html(StatusCode::NotFound, &html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(response: &Response) -> String {
        String::from_utf8_lossy(response.body()).into_owned()
    }

    #[test]
    fn test_status_handler_reports_counter_and_threads() {
        let counter = RequestCounter::new();
        counter.increment();
        counter.increment();

        let handler = StatusHandler::new(counter, 4);
        let request = Request::parse(b"GET /api/status HTTP/1.1\r\n\r\n").unwrap();
        let response = handler.handle(&request);

        assert_eq!(response.header("Content-Type"), Some("application/json"));
        let json: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(json["requests"], 2);
        assert_eq!(json["threads"], 4);
        assert!(json["time"].as_str().is_some());
    }

    #[test]
    fn test_submit_handler_decodes_form() {
        let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 22\r\n\r\nname=A%26B&email=x%40y";
        let request = Request::parse(raw).unwrap();

        let response = submit_handler(&request);
        let body = body_text(&response);

        assert_eq!(response.status_code(), 200);
        assert!(body.contains("A&amp;B"));
        assert!(body.contains("x@y"));
    }

    #[test]
    fn test_submit_handler_escapes_html() {
        let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 24\r\n\r\nmessage=%3Cscript%3Ex%3C";
        let request = Request::parse(raw).unwrap();

        let body = body_text(&submit_handler(&request));
        assert!(body.contains("&lt;script&gt;x&lt;"));
        assert!(!body.contains("<script>"));
    }

    #[test]
    fn test_not_found_page() {
        let request = Request::parse(b"GET /missing HTTP/1.1\r\n\r\n").unwrap();
        let response = not_found_page(&request);

        assert_eq!(response.status_code(), 404);
        assert!(body_text(&response).contains("\"/missing\""));
    }
}
