//! Custom error types for the common library
//!
//! This module defines application-specific error types that can be used
//! throughout the application.

use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while establishing the database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] MongoError),

    /// Error occurred while executing a database command
    #[error("Database command error: {0}")]
    Command(#[source] MongoError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
