//! # Response Envelope
//!
//! The JSON shape results are rendered in, so that an HTTP layer can sit on top of the service
//! without reshaping data:
//!
//! ```text
//! {"status": "success", "data": {...}}
//! {"status": "fail", "message": "Insufficient stock for product_7: requested 5, available 2"}
//! {"status": "error", "message": "Actor communication error: Actor closed"}
//! ```
//!
//! `fail` is used for client errors (4xx), `error` for server errors (5xx).

use serde::Serialize;
use std::fmt::Display;

/// Errors that map onto an HTTP status code.
pub trait HttpStatus {
    fn status_code(&self) -> u16;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success { data: T },
    Fail { message: String },
    Error { message: String },
}

/// Status for a plain successful read or update.
pub const OK: u16 = 200;
/// Status for a successful create.
pub const CREATED: u16 = 201;
/// Status for a successful delete.
pub const NO_CONTENT: u16 = 204;

impl<T> Envelope<T> {
    /// Wraps a result, returning the status code alongside the envelope.
    pub fn from_result<E>(result: Result<T, E>) -> (u16, Self)
    where
        E: HttpStatus + Display,
    {
        Self::with_status(result, OK)
    }

    /// Like [`from_result`](Self::from_result), answering `201` on success.
    pub fn created<E>(result: Result<T, E>) -> (u16, Self)
    where
        E: HttpStatus + Display,
    {
        Self::with_status(result, CREATED)
    }

    /// Like [`from_result`](Self::from_result), answering `204` on success.
    pub fn deleted<E>(result: Result<T, E>) -> (u16, Self)
    where
        E: HttpStatus + Display,
    {
        Self::with_status(result, NO_CONTENT)
    }

    /// Wraps a result; `success` is the status reported when it is `Ok`. Errors always carry
    /// their own status code.
    pub fn with_status<E>(result: Result<T, E>, success: u16) -> (u16, Self)
    where
        E: HttpStatus + Display,
    {
        match result {
            Ok(data) => (success, Envelope::Success { data }),
            Err(e) => {
                let status = e.status_code();
                let message = e.to_string();
                if status >= 500 {
                    (status, Envelope::Error { message })
                } else {
                    (status, Envelope::Fail { message })
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
