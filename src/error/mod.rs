pub mod domain_error;

use thiserror::Error;

use self::domain_error::DomainError;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("Domain Error. Error: '{0}'.")]
    Domain(DomainError),
    #[error("Internal Error. Error: '{0}'.")]
    Internal(String),
    #[error("Persistence Error. Error: '{0}'.")]
    Persistence(String),
}

impl Error {
    pub fn log_and_create_internal(message: &str) -> Error {
        log::error!("{message}");
        Error::Internal(message.to_string())
    }

    /// Rejected actions leave the game untouched, the caller may safely ignore them.
    pub fn is_ignorable(&self) -> bool {
        match self {
            Error::Domain(_) => true,
            Error::Internal(_) => false,
            Error::Persistence(_) => true,
        }
    }
}

impl From<DomainError> for Error {
    fn from(error: DomainError) -> Self {
        Error::Domain(error)
    }
}
