//! # Archivos estáticos
//! src/router/static_files.rs
//!
//! Resuelve el path del request contra el directorio estático. `/` se
//! sirve como `index.html`; cualquier path con segmentos `..` se ignora
//! para no salir del directorio.

use crate::http::Response;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Content-Type para extensiones desconocidas o ausentes
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Infiere el Content-Type a partir de la extensión (sin distinguir mayúsculas)
///
/// # Ejemplo
/// ```
/// use pool_http_server::router::static_files::content_type_for;
/// use std::path::Path;
///
/// assert_eq!(content_type_for(Path::new("logo.PNG")), "image/png");
/// assert_eq!(content_type_for(Path::new("LICENSE")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return FALLBACK_CONTENT_TYPE,
    };

    match extension.as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Calcula el archivo candidato para `request_path` dentro de `root`
///
/// Retorna `None` si el path intenta salir del directorio.
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = if request_path == "/" {
        "index.html"
    } else {
        request_path.trim_start_matches('/')
    };

    let safe = Path::new(relative)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

    if safe {
        Some(root.join(relative))
    } else {
        None
    }
}

/// Sirve el archivo si existe, es regular y se puede leer
pub fn serve(root: &Path, request_path: &str) -> Option<Response> {
    let candidate = resolve(root, request_path)?;

    if !candidate.is_file() {
        return None;
    }

    match fs::read(&candidate) {
        Ok(content) => {
            debug!(file = %candidate.display(), bytes = content.len(), "archivo estático");
            Some(
                Response::new()
                    .with_header("Content-Type", content_type_for(&candidate))
                    .with_body_bytes(content),
            )
        }
        Err(e) => {
            debug!(file = %candidate.display(), error = %e, "no se pudo leer el archivo estático");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_table() {
        let cases = [
            ("index.html", "text/html"),
            ("style.CSS", "text/css"),
            ("app.js", "application/javascript"),
            ("a.png", "image/png"),
            ("b.jpg", "image/jpeg"),
            ("c.JPEG", "image/jpeg"),
            ("d.gif", "image/gif"),
            ("favicon.ico", "image/x-icon"),
            ("e.svg", "image/svg+xml"),
            ("archive.tar.gz", FALLBACK_CONTENT_TYPE),
            ("Makefile", FALLBACK_CONTENT_TYPE),
        ];

        for (file, expected) in cases {
            assert_eq!(content_type_for(Path::new(file)), expected, "{}", file);
        }
    }

    #[test]
    fn test_resolve_root_is_index() {
        let root = Path::new("/srv/static");
        assert_eq!(resolve(root, "/"), Some(root.join("index.html")));
        assert_eq!(resolve(root, "/css/site.css"), Some(root.join("css/site.css")));
    }

    #[test]
    fn test_resolve_rejects_parent_dirs() {
        let root = Path::new("/srv/static");
        assert_eq!(resolve(root, "/../etc/passwd"), None);
        assert_eq!(resolve(root, "/css/../../secret"), None);
    }

    #[test]
    fn test_serve_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();

        let response = serve(dir.path(), "/logo.svg").unwrap();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.header("Content-Type"), Some("image/svg+xml"));
        assert_eq!(response.header("Content-Length"), Some("6"));
        assert_eq!(response.body(), b"<svg/>");
    }

    #[test]
    fn test_serve_skips_directories_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();

        assert!(serve(dir.path(), "/docs").is_none());
        assert!(serve(dir.path(), "/missing.html").is_none());
        assert!(serve(dir.path(), "/").is_none());
    }
}
