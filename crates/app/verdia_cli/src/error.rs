use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("{}", .0)]
    Api(#[from] verdia_client::ApiError),

    #[error("{}", .0)]
    Session(#[from] verdia_core::session::SessionError),

    #[error("Json::{:?}: {}", .0, .0)]
    Json(#[from] serde_json::Error),
}
