use thiserror::Error;

use crate::domain::product::ProductId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock { product_id: ProductId, requested: u32, available: u32 },
    #[error("product with ID {0} not found")]
    NotFound(ProductId),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("catalog failure: {0}")]
    Catalog(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, error_class: &'static str },
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("internal error: {message}")]
    Internal { message: String, error_class: &'static str },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "The request could not be processed. Check inputs and try again.",
            Self::NotFound { .. } => "The requested product does not exist in the catalog.",
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::BadRequest { error_class, .. } | Self::Internal { error_class, .. } => *error_class,
            Self::NotFound { .. } => "not_found",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Internal { .. } => 2,
            Self::NotFound { .. } => 3,
            Self::BadRequest { .. } => 4,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::NotFound { message }
            | Self::Internal { message, .. } => message,
        }
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error @ DomainError::NotFound(_)) => {
                Self::NotFound { message: error.to_string() }
            }
            ApplicationError::Domain(error @ DomainError::InsufficientStock { .. }) => {
                Self::BadRequest { message: error.to_string(), error_class: "insufficient_stock" }
            }
            ApplicationError::Domain(error @ DomainError::InvariantViolation(_)) => {
                Self::BadRequest { message: error.to_string(), error_class: "domain_validation" }
            }
            ApplicationError::Catalog(message) => {
                Self::Internal { message, error_class: "catalog_load" }
            }
            ApplicationError::Configuration(message) => {
                Self::Internal { message, error_class: "config_validation" }
            }
        }
    }
}

impl From<DomainError> for InterfaceError {
    fn from(value: DomainError) -> Self {
        ApplicationError::from(value).into()
    }
}
