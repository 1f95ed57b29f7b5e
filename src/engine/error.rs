//! Engine errors and user-visible notices

use crate::domain::{DomainError, ItemId};

use super::forms::FieldError;
use super::mode::Mode;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Input rejected before contacting the store; the form holds the details
    Validation(Vec<FieldError>),
    /// Store call failed; the mirror keeps its last loaded state
    Store(DomainError),
    /// Operation not available in the current mode
    WrongMode { required: Mode },
    /// Market-mode pricing needs a current market
    MarketNotSelected,
    /// The item is not in the mirror
    ItemNotFound(ItemId),
    /// The user declined a confirmation
    Cancelled,
}

pub type EngineResult<T> = Result<T, EngineError>;

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Validation(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "Invalid input: {}", messages.join(" | "))
            }
            EngineError::Store(e) => write!(f, "Store error: {}", e),
            EngineError::WrongMode { required } => write!(f, "Only available in {} mode", required),
            EngineError::MarketNotSelected => write!(f, "Select a market first"),
            EngineError::ItemNotFound(id) => write!(f, "Item {} not found", id),
            EngineError::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<DomainError> for EngineError {
    fn from(e: DomainError) -> Self {
        EngineError::Store(e)
    }
}

/// Message shown to the user after a failed store call
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// What the user was doing, e.g. "add item"
    pub action: &'static str,
    pub message: String,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to {}: {}", self.action, self.message)
    }
}
