use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    
    #[error("Chain data unavailable: {0}")]
    ChainData(String),
    
    #[error("Rule store error: {0}")]
    RuleStore(String),
    
    #[error("Configuration error: {0}")]
    Config(String),
    
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
