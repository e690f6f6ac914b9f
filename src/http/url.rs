//! # Percent-encoding
//! src/http/url.rs
//!
//! Decodificación usada en query strings y cuerpos de formularios
//! (`application/x-www-form-urlencoded`):
//!
//! - `%XX` (dos dígitos hexadecimales) → byte
//! - `+` → espacio
//! - Un `%` malformado se conserva literalmente

use std::collections::HashMap;

/// Decodifica un componente percent-encoded
///
/// # Ejemplo
/// ```
/// use pool_http_server::http::url;
///
/// assert_eq!(url::decode("A%26B"), "A&B");
/// assert_eq!(url::decode("hello+world"), "hello world");
/// assert_eq!(url::decode("100%"), "100%");
/// ```
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => match (bytes.get(i + 1), bytes.get(i + 2)) {
                (Some(&hi), Some(&lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                    out.push((hex_value(hi) << 4) | hex_value(lo));
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Codifica un string para usarlo en una query string o formulario
///
/// Conserva los caracteres no reservados (`A-Z a-z 0-9 - _ . ~`), convierte
/// el espacio en `+` y todo lo demás en `%XX`.
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }

    out
}

/// Parsea pares `key=value` separados por `&`
///
/// Ejemplo: "num=10&text=hello&debug"
/// Retorna: {"num": "10", "text": "hello", "debug": ""}
///
/// Un par sin `=` se guarda con valor vacío y el parsing continúa con el
/// siguiente. Ante claves repetidas gana la última.
pub fn parse_urlencoded(input: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for pair in input.split('&') {
        if pair.is_empty() {
            continue;
        }

        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };

        params.insert(decode(key), decode(value));
    }

    params
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}
