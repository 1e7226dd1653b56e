use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Position {position} out of range ({live} live records)")]
    OutOfRange { position: usize, live: usize },

    #[error("Comment with ID {comment_id} not found or does not belong to user with ID {owner_id}")]
    NotFoundOrNotOwned { comment_id: u32, owner_id: u32 },

    #[error("Store is full ({capacity} records)")]
    CapacityExceeded { capacity: usize },

    #[error("User {0} already exists")]
    UserAlreadyExists(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Admin password does not match")]
    Unauthorized,

    #[error("Failed to hash password")]
    Hashing,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the console should keep the session alive after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Io(_))
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
