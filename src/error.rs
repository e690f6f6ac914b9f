//! # Errores del servidor
//! src/error.rs
//!
//! Errores de arranque: son fatales y hacen que el proceso termine con
//! código distinto de cero. Los errores de una conexión individual
//! (`server::ConnectionError`) nunca llegan hasta aquí.

use crate::pool::PoolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
