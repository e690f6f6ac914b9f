//! # Construcción de Respuestas HTTP
//!
//! Acumulador de status, headers y body que se serializa una sola vez
//! hacia el socket.
//!
//! ## Formato en el cable
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Connection: close\r\n
//! Content-Length: 13\r\n
//! Content-Type: application/json\r\n
//! \r\n
//! {"ok": true}
//! ```
//!
//! Los headers se guardan en un `BTreeMap`, así que se emiten en orden
//! alfabético de nombre sin importar el orden de inserción. La salida es
//! determinista: serializar la misma respuesta dos veces da los mismos bytes.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use pool_http_server::http::{Response, StatusCode};
//!
//! let response = Response::new()
//!     .with_status(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("Hello");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::StatusCode;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Content-Type por defecto de toda respuesta
pub const DEFAULT_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código numérico (200, 404, ...)
    status_code: u16,

    /// Texto de razón ("OK", "Not Found", ...)
    status_text: String,

    /// Headers ordenados por nombre
    headers: BTreeMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta 200 OK con los headers por defecto
    ///
    /// `Content-Type: text/html; charset=UTF-8` y `Connection: close`.
    pub fn new() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), DEFAULT_CONTENT_TYPE.to_string());
        headers.insert("Connection".to_string(), "close".to_string());

        Self {
            status_code: StatusCode::Ok.as_u16(),
            status_text: StatusCode::Ok.reason_phrase().to_string(),
            headers,
            body: Vec::new(),
        }
    }

    /// Respuesta HTML con el status indicado
    pub fn html(status: StatusCode, html: &str) -> Self {
        Self::new().with_status(status).with_body(html)
    }

    /// Respuesta JSON 200 OK
    ///
    /// # Ejemplo
    /// ```
    /// use pool_http_server::http::Response;
    ///
    /// let response = Response::json(&serde_json::json!({"status": "ok"}));
    /// assert_eq!(response.header("Content-Type"), Some("application/json"));
    /// ```
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new()
            .with_header("Content-Type", "application/json")
            .with_body(&value.to_string())
    }

    /// Página HTML mínima para los errores que genera el propio servidor
    pub fn error_page(status: StatusCode) -> Self {
        let html = format!(
            "<html><head><title>{status}</title></head><body><h1>{status}</h1></body></html>"
        );
        Self::html(status, &html)
    }

    /// Cambia código y texto de estado
    pub fn set_status(&mut self, code: u16, text: &str) {
        self.status_code = code;
        self.status_text = text.to_string();
    }

    /// Versión encadenable de `set_status` para los códigos conocidos
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.set_status(status.as_u16(), status.reason_phrase());
        self
    }

    /// Agrega o sobrescribe un header
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Versión encadenable de `set_header`
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    /// Establece un body HTML
    ///
    /// Igual que `set_content`: recalcula `Content-Length`.
    pub fn set_html(&mut self, html: &str) {
        self.set_content(html.as_bytes().to_vec());
    }

    /// Establece el body desde bytes (archivos binarios, JSON, etc.)
    ///
    /// Siempre sobrescribe `Content-Length` con el largo en bytes.
    pub fn set_content(&mut self, content: Vec<u8>) {
        self.headers
            .insert("Content-Length".to_string(), content.len().to_string());
        self.body = content;
    }

    /// Versión encadenable de `set_html`
    pub fn with_body(mut self, body: &str) -> Self {
        self.set_html(body);
        self
    }

    /// Versión encadenable de `set_content`
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.set_content(body);
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers en orden alfabético: `Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body tal cual
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status_code, self.status_text);

        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        let mut result = Vec::with_capacity(head.len() + self.body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }

    /// Escribe la respuesta completa en `writer`
    pub fn send<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }

    /// Código de estado numérico
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Texto de estado
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Obtiene un header por nombre exacto
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapa texto para insertarlo dentro de HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
