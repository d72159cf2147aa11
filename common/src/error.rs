//! Error type shared by the classifier, sorter and analyzer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("model error: {0}")]
    Model(#[from] ort::Error),

    #[error("tensor shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("folder not found: {0}")]
    FolderNotFound(String),

    #[error("inference error: {0}")]
    Inference(String),
}

pub type Result<T> = std::result::Result<T, Error>;
