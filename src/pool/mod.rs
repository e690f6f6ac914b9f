//! # Pool de Threads
//! src/pool/mod.rs
//!
//! Los workers se crean una sola vez al construir el servidor; cada
//! conexión aceptada se convierte en una tarea de la cola compartida.

pub mod thread_pool;

pub use thread_pool::{PoolError, Task, ThreadPool};
