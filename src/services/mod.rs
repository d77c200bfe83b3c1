//! Services Layer
//!
//! Pure business logic without the HTTP layer. Handlers in `api` call into
//! these functions and translate `ServiceError` into status codes.

pub mod friend_service;
pub mod habit_service;
pub mod points_service;
pub mod reel_service;

use std::fmt;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    /// Database read or write failure
    Database(String),
    /// Resource not found (or not owned by the caller)
    NotFound,
    /// Validation error with message
    Validation(String),
    /// Badge already in the caller's collection
    AlreadyOwned,
    /// Balance too low for the requested purchase
    InsufficientPoints { balance: i64, price: i64 },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Database(msg) => write!(f, "Database error: {}", msg),
            ServiceError::NotFound => write!(f, "Resource not found"),
            ServiceError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::AlreadyOwned => write!(f, "Badge already owned"),
            ServiceError::InsufficientPoints { balance, price } => {
                write!(f, "Insufficient points: balance {} < price {}", balance, price)
            }
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}
