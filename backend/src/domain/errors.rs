//! # Application Errors
//!
//! The unified error taxonomy handed to presentation clients. Store and
//! network failures keep their own types and are wrapped here; each carries
//! a user-displayable title and message.

use thiserror::Error;

use crate::network::error::NetworkError;
use crate::storage::error::StoreError;

/// User-displayable description of an error
pub trait ErrorAlert {
    fn alert_title(&self) -> String;
    fn alert_message(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn title(&self) -> String {
        match self {
            AppError::Network(error) => error.alert_title(),
            AppError::Store(error) => error.alert_title(),
            AppError::Validation(_) => "Validation Error".to_string(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::Network(error) => error.alert_message(),
            AppError::Store(error) => error.alert_message(),
            AppError::Validation(message) => message.clone(),
        }
    }
}
