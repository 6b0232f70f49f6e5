use thiserror::Error;

/// Why a raw value was rejected by one of the field validators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty.")]
    EmptyName,

    #[error("Phone number cannot be empty.")]
    EmptyPhone,

    #[error("Phone number must be {expected} digits, got {found}: '{raw}'.")]
    PhoneLength {
        raw: String,
        expected: usize,
        found: usize,
    },

    #[error("Email address cannot be empty.")]
    EmptyEmail,

    #[error("Invalid email format '{0}'. Use format: user@domain.com")]
    EmailFormat(String),

    #[error("Invalid birthday '{0}'. Use DD.MM.YYYY format.")]
    BirthdayFormat(String),

    #[error("Address cannot be empty.")]
    EmptyAddress,

    #[error("Note text cannot be empty.")]
    EmptyNoteText,
}

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Contact '{0}' not found.")]
    ContactNotFound(String),

    #[error("Note '{0}' not found.")]
    NoteNotFound(String),

    #[error("Phone {0} not found.")]
    PhoneNotFound(String),

    #[error("Phone number '{0}' already exists for this contact.")]
    DuplicatePhone(String),

    #[error("Error: [{command}] command requires {requirement}.")]
    MissingArgs {
        command: &'static str,
        requirement: &'static str,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{}", unknown_command_message(.token, .suggestions))]
    UnknownCommand {
        token: String,
        suggestions: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

fn unknown_command_message(token: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("Unknown command '{}'. Type 'help' to see available commands.", token)
    } else {
        format!(
            "Unknown command '{}'. Did you mean: {}?",
            token,
            suggestions.join(", ")
        )
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
