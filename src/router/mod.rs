//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Decide qué produce la respuesta de cada request.
//!
//! ## Orden de despacho
//!
//! ```text
//! Request ─► ¿GET y archivo estático? ─► archivo
//!         └► ¿(método, path) registrado? ─► handler
//!         └► handler de not-found (404)
//! ```
//!
//! Los paths se comparan de forma exacta: no hay comodines, prefijos ni
//! parámetros. Un archivo estático tapa a una ruta GET con el mismo path.
//!
//! La tabla se configura antes de servir y luego sólo se lee desde los
//! workers, por eso `Router` se comparte detrás de un `Arc` sin lock.

pub mod static_files;

use crate::http::{escape_html, Request, Response, StatusCode};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Algo capaz de producir una respuesta a partir de un request
///
/// Rutas y handler de not-found comparten esta interfaz. Cualquier
/// `Fn(&Request) -> Response` la implementa; los handlers que necesitan
/// contexto (contadores, configuración) lo guardan en su propio struct.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    fn handle(&self, request: &Request) -> Response {
        self(request)
    }
}

/// Router con tabla método → path → handler
pub struct Router {
    routes: HashMap<String, HashMap<String, Box<dyn Handler>>>,
    static_dir: Option<PathBuf>,
    not_found: Box<dyn Handler>,
}

impl Router {
    /// Crea un router vacío, sin directorio estático y con el 404 por defecto
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            static_dir: None,
            not_found: Box::new(default_not_found),
        }
    }

    /// Registra un handler para `(method, path)`
    ///
    /// Si ya había uno para el mismo par, se reemplaza.
    ///
    /// # Ejemplo
    /// ```
    /// use pool_http_server::router::Router;
    /// use pool_http_server::http::{Request, Response};
    ///
    /// fn hello_handler(_req: &Request) -> Response {
    ///     Response::json(&serde_json::json!({"message": "Hello"}))
    /// }
    ///
    /// let mut router = Router::new();
    /// router.route("PUT", "/hello", hello_handler);
    /// assert_eq!(router.route_count(), 1);
    /// ```
    pub fn route<H>(&mut self, method: &str, path: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.routes
            .entry(method.to_string())
            .or_default()
            .insert(path.to_string(), Box::new(handler));
    }

    /// Registra un handler GET
    pub fn get<H>(&mut self, path: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.route("GET", path, handler);
    }

    /// Registra un handler POST
    pub fn post<H>(&mut self, path: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.route("POST", path, handler);
    }

    /// Configura el directorio de archivos estáticos
    pub fn set_static_dir(&mut self, dir: impl Into<PathBuf>) {
        self.static_dir = Some(dir.into());
    }

    /// Directorio estático configurado, si hay
    pub fn static_dir(&self) -> Option<&Path> {
        self.static_dir.as_deref()
    }

    /// Reemplaza el handler de not-found
    pub fn set_not_found_handler<H>(&mut self, handler: H)
    where
        H: Handler + 'static,
    {
        self.not_found = Box::new(handler);
    }

    /// Cantidad de pares (método, path) registrados
    pub fn route_count(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    /// Produce la respuesta para un request
    ///
    /// # Ejemplo
    /// ```
    /// use pool_http_server::router::Router;
    /// use pool_http_server::http::Request;
    ///
    /// let router = Router::new();
    /// let request = Request::parse(b"GET /test HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.handle(&request);
    ///
    /// assert_eq!(response.status_code(), 404);
    /// ```
    pub fn handle(&self, request: &Request) -> Response {
        // 1. Archivos estáticos (sólo GET)
        if request.method() == "GET" {
            if let Some(dir) = &self.static_dir {
                if let Some(response) = static_files::serve(dir, request.path()) {
                    return response;
                }
            }
        }

        // 2. Tabla de rutas
        let handler = self
            .routes
            .get(request.method())
            .and_then(|paths| paths.get(request.path()));

        match handler {
            Some(handler) => handler.handle(request),
            // 3. Not found
            None => self.not_found.handle(request),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// 404 por defecto: página HTML mínima que nombra el path pedido
pub fn default_not_found(request: &Request) -> Response {
    let html = format!(
        "<html><head><title>404 Not Found</title></head>\
         <body><h1>404 Not Found</h1><p>{}</p></body></html>",
        escape_html(request.path())
    );
    Response::html(StatusCode::NotFound, &html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_handler(_req: &Request) -> Response {
        Response::json(&serde_json::json!({"test": "ok"}))
    }

    fn hello_handler(_req: &Request) -> Response {
        Response::new().with_body("hello from route")
    }

    fn parse(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    fn body_text(response: &Response) -> String {
        String::from_utf8_lossy(response.body()).into_owned()
    }

    #[test]
    fn test_router_creation() {
        let router = Router::new();
        assert_eq!(router.route_count(), 0);
        assert!(router.static_dir().is_none());
    }

    #[test]
    fn test_route_found() {
        let mut router = Router::new();
        router.get("/test", test_handler);

        let response = router.handle(&parse(b"GET /test HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_route_ignores_query_string() {
        let mut router = Router::new();
        router.get("/test", test_handler);

        let response = router.handle(&parse(b"GET /test?x=1 HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn test_method_must_match() {
        let mut router = Router::new();
        router.post("/submit", test_handler);

        let response = router.handle(&parse(b"GET /submit HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status_code(), 404);

        let response = router.handle(&parse(b"POST /submit HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn test_exact_path_only() {
        let mut router = Router::new();
        router.get("/api", test_handler);

        assert_eq!(router.handle(&parse(b"GET /api/ HTTP/1.1\r\n\r\n")).status_code(), 404);
        assert_eq!(router.handle(&parse(b"GET /api/x HTTP/1.1\r\n\r\n")).status_code(), 404);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut router = Router::new();
        router.get("/dup", test_handler);
        router.get("/dup", hello_handler);

        assert_eq!(router.route_count(), 1);
        let response = router.handle(&parse(b"GET /dup HTTP/1.1\r\n\r\n"));
        assert_eq!(body_text(&response), "hello from route");
    }

    #[test]
    fn test_closure_handler_with_context() {
        let greeting = String::from("hola");
        let mut router = Router::new();
        router.get("/greet", move |req: &Request| {
            Response::new().with_body(&format!("{} {}", greeting, req.query_param("name").unwrap_or("?")))
        });

        let response = router.handle(&parse(b"GET /greet?name=Ana HTTP/1.1\r\n\r\n"));
        assert_eq!(body_text(&response), "hola Ana");
    }

    #[test]
    fn test_default_not_found_names_path() {
        let router = Router::new();

        let response = router.handle(&parse(b"GET /does-not-exist HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status_code(), 404);
        assert_eq!(response.status_text(), "Not Found");
        assert!(body_text(&response).contains("/does-not-exist"));
    }

    #[test]
    fn test_custom_not_found() {
        let mut router = Router::new();
        router.set_not_found_handler(|_req: &Request| {
            let mut response = Response::new().with_body("nada por aquí");
            response.set_status(404, "Not Found");
            response
        });

        let response = router.handle(&parse(b"GET /x HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status_code(), 404);
        assert_eq!(body_text(&response), "nada por aquí");
    }

    #[test]
    fn test_static_file_shadows_route() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>static index</h1>").unwrap();

        let mut router = Router::new();
        router.set_static_dir(dir.path());
        router.get("/", hello_handler);

        let response = router.handle(&parse(b"GET / HTTP/1.1\r\n\r\n"));
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.header("Content-Type"), Some("text/html"));
        assert_eq!(body_text(&response), "<h1>static index</h1>");
    }

    #[test]
    fn test_static_only_for_get() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("form.html"), "static form").unwrap();

        let mut router = Router::new();
        router.set_static_dir(dir.path());
        router.post("/form.html", hello_handler);

        let response = router.handle(&parse(b"POST /form.html HTTP/1.1\r\n\r\n"));
        assert_eq!(body_text(&response), "hello from route");
    }

    #[test]
    fn test_missing_static_file_falls_back_to_route() {
        let dir = tempfile::tempdir().unwrap();

        let mut router = Router::new();
        router.set_static_dir(dir.path());
        router.get("/api/status", test_handler);

        let response = router.handle(&parse(b"GET /api/status HTTP/1.1\r\n\r\n"));
        assert_eq!(response.header("Content-Type"), Some("application/json"));
    }
}
