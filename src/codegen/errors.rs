//! Code generation errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CodegenError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        CodegenError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CodegenError::Schema(err) => err.code().code(),
            CodegenError::Io { .. } => "SVO_CODEGEN_IO",
        }
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;
