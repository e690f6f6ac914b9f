//! # Contador de Requests
//! src/server/counter.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Contador global de conexiones atendidas
///
/// Se incrementa una vez por conexión aceptada, antes de parsear, así que
/// también cuenta los requests inválidos. Los clones comparten el valor.
#[derive(Debug, Clone, Default)]
pub struct RequestCounter {
    inner: Arc<AtomicU64>,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incrementa y retorna el nuevo valor
    pub fn increment(&self) -> u64 {
        self.inner.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Valor actual
    pub fn get(&self) -> u64 {
        self.inner.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_value() {
        let counter = RequestCounter::new();
        let clone = counter.clone();

        assert_eq!(counter.increment(), 1);
        assert_eq!(clone.increment(), 2);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_concurrent_increments() {
        let counter = RequestCounter::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = counter.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.increment();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.get(), 8000);
    }
}
