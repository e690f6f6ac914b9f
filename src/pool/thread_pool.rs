//! # Pool de Workers
//! src/pool/thread_pool.rs
//!
//! Número fijo de threads que consumen tareas de una cola FIFO compartida.
//!
//! ```text
//! enqueue() ──► [ VecDeque<Task> + Mutex + Condvar ] ──► worker-0 .. worker-N
//! ```
//!
//! - `enqueue` agrega al final y despierta a un solo worker; nunca bloquea
//!   más allá del lock ni rechaza tareas (cola sin límite).
//! - Cada worker espera hasta que haya tareas o se pida parar; si se pidió
//!   parar y la cola está vacía, termina.
//! - `shutdown` marca la parada, despierta a todos y hace `join` después de
//!   que vacíen la cola: ninguna tarea ya encolada se pierde.
//!
//! Una tarea que encola otra y luego espera su resultado puede bloquear el
//! pool si todos los workers están ocupados.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Unidad de trabajo: una closure sin argumentos
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Errores al construir el pool
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("thread pool needs at least one worker")]
    ZeroWorkers,

    #[error("failed to spawn worker {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Estado protegido por el mutex
struct QueueState {
    tasks: VecDeque<Task>,
    stopping: bool,
}

/// Cola compartida entre los workers y quien encola
struct Shared {
    state: Mutex<QueueState>,

    /// Se notifica cuando hay una tarea nueva o se pide parar
    available: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Un thread del pool
struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
}

/// Pool de tamaño fijo con cola FIFO sin límite
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<Worker>,
}

impl ThreadPool {
    /// Crea el pool y arranca `size` workers
    ///
    /// # Ejemplo
    /// ```
    /// use pool_http_server::pool::ThreadPool;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let mut pool = ThreadPool::new(2).unwrap();
    /// let done = Arc::new(AtomicUsize::new(0));
    ///
    /// for _ in 0..4 {
    ///     let done = Arc::clone(&done);
    ///     pool.enqueue(move || { done.fetch_add(1, Ordering::SeqCst); });
    /// }
    ///
    /// pool.shutdown();
    /// assert_eq!(done.load(Ordering::SeqCst), 4);
    /// ```
    pub fn new(size: usize) -> Result<Self, PoolError> {
        if size == 0 {
            return Err(PoolError::ZeroWorkers);
        }

        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                stopping: false,
            }),
            available: Condvar::new(),
        });

        let mut pool = Self {
            shared,
            workers: Vec::with_capacity(size),
        };

        for id in 0..size {
            let shared = Arc::clone(&pool.shared);
            let spawned = thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || Self::worker_loop(id, shared));

            match spawned {
                Ok(handle) => pool.workers.push(Worker {
                    id,
                    handle: Some(handle),
                }),
                Err(source) => {
                    // Los workers ya creados se detienen en el Drop de `pool`
                    return Err(PoolError::Spawn { index: id, source });
                }
            }
        }

        Ok(pool)
    }

    /// Encola una tarea y despierta a un worker
    pub fn enqueue<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut state = self.shared.lock();
            if state.stopping {
                warn!("tarea descartada: el pool se está deteniendo");
                return;
            }
            state.tasks.push_back(Box::new(task));
        }
        self.shared.available.notify_one();
    }

    /// Número de workers (fijo durante toda la vida del pool)
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Tareas encoladas que ningún worker tomó todavía
    pub fn pending(&self) -> usize {
        self.shared.lock().tasks.len()
    }

    /// Detiene el pool esperando a que se vacíe la cola
    ///
    /// Es idempotente; también se llama desde `Drop`.
    pub fn shutdown(&mut self) {
        {
            let mut state = self.shared.lock();
            state.stopping = true;
        }
        self.shared.available.notify_all();

        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                if handle.join().is_err() {
                    error!(worker = worker.id, "worker terminó con panic");
                }
            }
        }
    }

    /// Loop principal del worker
    fn worker_loop(id: usize, shared: Arc<Shared>) {
        debug!(worker = id, "worker iniciado");

        loop {
            let task = {
                let mut state = shared.lock();
                while state.tasks.is_empty() && !state.stopping {
                    state = shared
                        .available
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }

                match state.tasks.pop_front() {
                    Some(task) => task,
                    // Parando y sin tareas pendientes
                    None => break,
                }
            };

            if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
                error!(worker = id, "una tarea terminó con panic");
            }
        }

        debug!(worker = id, "worker detenido");
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
