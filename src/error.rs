use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a run before any statistic is computed.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed sheet {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("sheet '{sheet}' not found in {}", .path.display())]
    SheetNotFound { sheet: String, path: PathBuf },
}
