use thiserror::Error;

/// Errors raised while talking to the Megaverse service or interpreting its data
#[derive(Debug, Error)]
pub enum MegaverseError {
    #[error("Coordinate out of bounds: row={row}, column={column} (grid is {rows}x{columns})")]
    OutOfBounds {
        row: i64,
        column: i64,
        rows: usize,
        columns: usize,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote call failed (HTTP {status}): {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("Unrecognized cell kind: {0}")]
    UnrecognizedCellKind(String),

    #[error("Ragged goal grid: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Goal map is empty")]
    EmptyGoalMap,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MegaverseError {
    /// Create a new OutOfBounds error
    pub fn out_of_bounds(row: i64, column: i64, rows: usize, columns: usize) -> Self {
        Self::OutOfBounds {
            row,
            column,
            rows,
            columns,
        }
    }

    /// Create a new RemoteStatus error
    pub fn remote_status(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteStatus {
            status,
            body: body.into(),
        }
    }
}

/// Result type alias for Megaverse operations
pub type Result<T> = std::result::Result<T, MegaverseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MegaverseError::out_of_bounds(-1, 4, 11, 11);
        assert_eq!(
            err.to_string(),
            "Coordinate out of bounds: row=-1, column=4 (grid is 11x11)"
        );

        let err = MegaverseError::remote_status(429, "Too Many Requests");
        assert_eq!(
            err.to_string(),
            "Remote call failed (HTTP 429): Too Many Requests"
        );
    }
}
