//! # Señal de apagado
//! src/server/shutdown.rs
//!
//! El loop de `accept` bloquea el thread, así que pedir el apagado tiene
//! dos pasos: marcar el flag y abrir una conexión local que despierte al
//! `accept`. El acceptor revisa el flag después de cada conexión aceptada.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const WAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// Handle clonable para detener un `Server` desde otro thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    requested: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl ShutdownHandle {
    pub(crate) fn new(local_addr: SocketAddr) -> Self {
        // No se puede conectar a 0.0.0.0 / ::, usamos loopback
        let wake_ip = match local_addr.ip() {
            IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            ip => ip,
        };

        Self {
            requested: Arc::new(AtomicBool::new(false)),
            wake_addr: SocketAddr::new(wake_ip, local_addr.port()),
        }
    }

    /// Pide el apagado y despierta al acceptor
    ///
    /// Llamarlo más de una vez no tiene efecto.
    pub fn shutdown(&self) {
        if self.requested.swap(true, Ordering::SeqCst) {
            return;
        }

        info!("apagado solicitado");
        if let Err(e) = TcpStream::connect_timeout(&self.wake_addr, WAKE_TIMEOUT) {
            warn!(addr = %self.wake_addr, error = %e, "no se pudo despertar al acceptor");
        }
    }

    /// Indica si ya se pidió el apagado
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_wake_addr_uses_loopback() {
        let handle = ShutdownHandle::new("0.0.0.0:8080".parse().unwrap());
        assert_eq!(handle.wake_addr, "127.0.0.1:8080".parse().unwrap());

        let handle = ShutdownHandle::new("[::]:9000".parse().unwrap());
        assert_eq!(handle.wake_addr, "[::1]:9000".parse().unwrap());
    }

    #[test]
    fn test_shutdown_wakes_blocked_accept() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let handle = ShutdownHandle::new(listener.local_addr().unwrap());
        assert!(!handle.is_requested());

        handle.clone().shutdown();
        handle.shutdown();

        // La conexión de wake-up ya está en el backlog
        let (_stream, _) = listener.accept().unwrap();
        assert!(handle.is_requested());
    }
}
