//! # Servidor TCP con pool de workers
//! src/server/tcp.rs
//!
//! El thread dueño del `Server` sólo acepta conexiones; cada una se encola
//! en el `ThreadPool` y la atiende un worker. Un error de `accept` se
//! registra y el loop sigue.

use super::connection::{handle_connection, ConnectionContext};
use super::{RequestCounter, ShutdownHandle};
use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::pool::ThreadPool;
use crate::router::Router;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use tracing::{info, warn};

/// Servidor HTTP concurrente
pub struct Server {
    config: Config,
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
    pool: ThreadPool,
    counter: RequestCounter,
    shutdown: ShutdownHandle,
}

impl Server {
    /// Valida la configuración, crea el pool y abre el socket
    ///
    /// Cualquier error aquí es un fallo de arranque.
    pub fn bind(config: Config) -> Result<Self> {
        config.validate().map_err(ServerError::InvalidConfig)?;

        let address = config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
        let local_addr = listener.local_addr()?;

        let pool = ThreadPool::new(config.workers)?;

        let mut router = Router::new();
        if let Some(dir) = &config.static_dir {
            router.set_static_dir(dir);
        }

        info!(%local_addr, workers = pool.worker_count(), "servidor escuchando");

        Ok(Self {
            config,
            listener,
            local_addr,
            router,
            pool,
            counter: RequestCounter::new(),
            shutdown: ShutdownHandle::new(local_addr),
        })
    }

    /// Router para registrar rutas antes de `run`
    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Contador de requests compartido con los handlers
    pub fn request_counter(&self) -> RequestCounter {
        self.counter.clone()
    }

    /// Número de workers del pool
    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }

    /// Dirección real del socket (útil con puerto 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle para detener `run` desde otro thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Loop de aceptación
    ///
    /// Bloquea hasta que se pida el apagado; entonces deja de aceptar,
    /// espera a que el pool termine las conexiones ya encoladas y retorna.
    pub fn run(self) -> Result<()> {
        let Server {
            config,
            listener,
            local_addr,
            router,
            mut pool,
            counter,
            shutdown,
        } = self;

        let context = Arc::new(ConnectionContext {
            router,
            counter,
            max_request_size: config.max_request_size,
            read_timeout: config.read_timeout(),
        });

        info!(%local_addr, "aceptando conexiones");

        for stream in listener.incoming() {
            if shutdown.is_requested() {
                break;
            }

            match stream {
                Ok(stream) => {
                    let context = Arc::clone(&context);
                    pool.enqueue(move || handle_connection(stream, &context));
                }
                Err(e) => {
                    warn!(error = %e, "error al aceptar conexión");
                }
            }
        }

        info!(pending = pool.pending(), "deteniendo servidor");
        pool.shutdown();
        info!(requests = context.counter.get(), "servidor detenido");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Request, Response};
    use std::io::{Read, Write};
    use std::net::TcpStream;
    use std::thread;

    fn test_config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: 2,
            ..Config::default()
        }
    }

    fn send(addr: SocketAddr, raw: &[u8]) -> String {
        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(raw).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_bind_rejects_invalid_config() {
        let config = Config {
            workers: 0,
            ..test_config()
        };

        assert!(matches!(Server::bind(config), Err(ServerError::InvalidConfig(_))));
    }

    #[test]
    fn test_bind_fails_on_used_port() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let config = Config {
            port: taken.local_addr().unwrap().port(),
            ..test_config()
        };

        assert!(matches!(Server::bind(config), Err(ServerError::Bind { .. })));
    }

    #[test]
    fn test_run_serves_and_shuts_down() {
        let mut server = Server::bind(test_config()).unwrap();
        server
            .router_mut()
            .get("/ping", |_req: &Request| Response::new().with_body("pong"));

        let addr = server.local_addr();
        let counter = server.request_counter();
        let handle = server.shutdown_handle();
        let running = thread::spawn(move || server.run());

        let text = send(addr, b"GET /ping HTTP/1.1\r\n\r\n");
        assert!(text.ends_with("\r\n\r\npong"));

        handle.shutdown();
        running.join().unwrap().unwrap();

        // La conexión de wake-up no cuenta como request
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_shutdown_before_run_returns() {
        let server = Server::bind(test_config()).unwrap();
        server.shutdown_handle().shutdown();

        assert!(server.run().is_ok());
    }
}
