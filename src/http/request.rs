//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser de un único request por conexión.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /submit?lang=es HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Length: 9\r\n
//! \r\n
//! name=Ana
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD TARGET [VERSION]`
//! 2. **Headers**: Pares `Name: Value` (uno por línea, las líneas sin `:` se ignoran)
//! 3. **Empty Line**: separa headers del body
//! 4. **Body**: exactamente `Content-Length` bytes (si el header existe)

use super::url;
use std::collections::HashMap;
use thiserror::Error;

/// Representa un request HTTP parseado
///
/// Es inmutable una vez construido: vive lo que dura el handler de la conexión.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP tal cual llegó (GET, POST, ...)
    method: String,

    /// Path sin la query string (ej: "/api/status")
    path: String,

    /// Versión HTTP declarada, vacía si no vino
    version: String,

    /// Query parameters ya decodificados
    query_params: HashMap<String, String>,

    /// Headers con el nombre tal como llegó
    headers: HashMap<String, String>,

    /// Body crudo
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío (no hay request line)
    #[error("Empty request")]
    EmptyRequest,

    /// La request line no tiene método y target
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// Content-Length no numérico
    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),
}

impl Request {
    /// Parsea un request desde los bytes leídos del socket
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use pool_http_server::http::Request;
    ///
    /// let raw = b"GET /search?q=rust+lang HTTP/1.1\r\nHost: x\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.path(), "/search");
    /// assert_eq!(request.query_param("q"), Some("rust lang"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ParseError::EmptyRequest);
        }

        // 1. Request line
        let (first_line, mut offset, _) = next_line(buffer, 0).ok_or(ParseError::EmptyRequest)?;
        let first_line = String::from_utf8_lossy(first_line);
        let (method, target, version) = Self::parse_request_line(&first_line)?;

        // 2. Path y query
        let (path, query_params) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), url::parse_urlencoded(query)),
            None => (target.to_string(), HashMap::new()),
        };

        // 3. Headers hasta la línea vacía
        let mut headers = HashMap::new();
        let mut body_start = None;

        while let Some((line, next, _)) = next_line(buffer, offset) {
            offset = next;

            if line.is_empty() {
                body_start = Some(offset);
                break;
            }

            let line = String::from_utf8_lossy(line);
            if let Some((name, value)) = split_header(&line) {
                headers.insert(name.to_string(), value.to_string());
            }
        }

        // 4. Body según Content-Length
        let content_length = match lookup_header(&headers, "Content-Length") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidContentLength(value.to_string()))?,
            None => 0,
        };

        let body = match body_start {
            Some(start) => {
                let end = start.saturating_add(content_length).min(buffer.len());
                buffer[start..end].to_vec()
            }
            None => Vec::new(),
        };

        Ok(Request {
            method: method.to_string(),
            path,
            version: version.to_string(),
            query_params,
            headers,
            body,
        })
    }

    /// Parsea la request line: `METHOD TARGET [VERSION]`
    fn parse_request_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
        let mut parts = line.split_whitespace();

        match (parts.next(), parts.next()) {
            (Some(method), Some(target)) => Ok((method, target, parts.next().unwrap_or(""))),
            _ => Err(ParseError::InvalidRequestLine),
        }
    }

    /// Tamaño total esperado del request (head + body declarado)
    ///
    /// Retorna `None` mientras el bloque de headers no esté completo. Un
    /// `Content-Length` inválido cuenta como cero: el parser lo rechazará.
    pub fn expected_length(buffer: &[u8]) -> Option<usize> {
        let (_, mut offset, terminated) = next_line(buffer, 0)?;
        if !terminated {
            return None;
        }

        let mut content_length = 0usize;

        loop {
            let (line, next, terminated) = next_line(buffer, offset)?;
            if !terminated {
                return None;
            }
            offset = next;

            if line.is_empty() {
                return Some(offset.saturating_add(content_length));
            }

            let line = String::from_utf8_lossy(line);
            if let Some((name, value)) = split_header(&line) {
                if name.eq_ignore_ascii_case("Content-Length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
        }
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path del request (sin query string)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP ("" si el cliente no la envió)
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los query parameters
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Obtiene un query parameter específico
    ///
    /// # Ejemplo
    /// ```
    /// use pool_http_server::http::Request;
    ///
    /// let raw = b"GET /test?num=42 HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.query_param("num"), Some("42"));
    /// assert_eq!(request.query_param("missing"), None);
    /// ```
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header por nombre
    ///
    /// Busca primero el nombre exacto y luego sin distinguir mayúsculas.
    pub fn header(&self, name: &str) -> Option<&str> {
        lookup_header(&self.headers, name)
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Obtiene el body del request como String
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Parsea el body como formulario `application/x-www-form-urlencoded`
    ///
    /// # Ejemplo
    /// ```
    /// use pool_http_server::http::Request;
    ///
    /// let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 10\r\n\r\nname=A%26B";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.form().get("name").map(String::as_str), Some("A&B"));
    /// ```
    pub fn form(&self) -> HashMap<String, String> {
        url::parse_urlencoded(&String::from_utf8_lossy(&self.body))
    }
}

/// Retorna la línea que empieza en `start` sin `\n` ni `\r` final, el offset
/// de la siguiente y si la línea terminaba en `\n`
fn next_line(buffer: &[u8], start: usize) -> Option<(&[u8], usize, bool)> {
    if start >= buffer.len() {
        return None;
    }

    let rest = &buffer[start..];
    let (line, next, terminated) = match rest.iter().position(|&b| b == b'\n') {
        Some(pos) => (&rest[..pos], start + pos + 1, true),
        None => (rest, buffer.len(), false),
    };

    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Some((line, next, terminated))
}

/// Separa `Name: Value` en el primer `:`, quitando un espacio inicial del valor
fn split_header(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    Some((name, value.strip_prefix(' ').unwrap_or(value)))
}

fn lookup_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .map(|s| s.as_str())
}
