use crate::types::Action;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulevoError {
    #[error("{0} read before any fitness assessment set it")]
    UnsetProperty(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No individuals in the niche for default action {0}")]
    EmptyNiche(Action),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RulevoError>;
