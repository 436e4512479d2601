use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration {id} failed: {message}")]
    MigrationError { id: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("{entity} with id {id} was not found")]
    EntityNotFound { entity: &'static str, id: i64 },

    #[error("{message}")]
    CardBlocked { message: String },

    #[error("Card {card_id} is already finished")]
    CardFinished { card_id: i64 },

    #[error("{message}")]
    IllegalState { message: String },
}

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Database,
    Input,
    BusinessRule,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BoardError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::DatabaseError(_) | Self::MigrationError { .. } => ErrorCategory::Database,
            Self::ValidationError { .. } | Self::EntityNotFound { .. } => ErrorCategory::Input,
            Self::CardBlocked { .. } | Self::CardFinished { .. } | Self::IllegalState { .. } => {
                ErrorCategory::BusinessRule
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 被業務規則拒絕的操作不影響資料
            Self::CardBlocked { .. } | Self::CardFinished { .. } => ErrorSeverity::Medium,
            Self::IllegalState { .. }
            | Self::ValidationError { .. }
            | Self::EntityNotFound { .. }
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::DatabaseError(_) | Self::MigrationError { .. } | Self::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::DatabaseError(_) => {
                "Check that the database file is reachable and that DB_URL points to it".to_string()
            }
            Self::MigrationError { id, .. } => format!(
                "Migration {} does not match the schema ledger; restore the database or inspect `taskboard migrate --status`",
                id
            ),
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
            Self::SerializationError(_) => "Retry without --json to see the raw output".to_string(),
            Self::ConfigError { .. } | Self::MissingConfigError { .. } => {
                "Review taskboard.toml or pass --database-url".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of `{}` in the configuration", field)
            }
            Self::ValidationError { field, .. } => format!("Provide a valid {}", field),
            Self::EntityNotFound { entity, .. } => {
                format!("List existing records to find a valid {} id", entity.to_lowercase())
            }
            Self::CardBlocked { .. } => {
                "Use `taskboard card unblock` / `card block` to change the block state first".to_string()
            }
            Self::CardFinished { .. } => "Finished or cancelled cards cannot change anymore".to_string(),
            Self::IllegalState { .. } => {
                "Check that the card and the selected board belong together".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "The database could not complete the operation".to_string(),
            Self::MigrationError { id, .. } => {
                format!("The database schema could not be migrated ({})", id)
            }
            other => other.to_string(),
        }
    }

    /// 依嚴重程度決定程式結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rule_errors_are_medium() {
        let blocked = BoardError::CardBlocked {
            message: "card 1 is blocked".to_string(),
        };
        assert_eq!(blocked.category(), ErrorCategory::BusinessRule);
        assert_eq!(blocked.severity(), ErrorSeverity::Medium);
        assert_eq!(blocked.exit_code(), 2);

        let finished = BoardError::CardFinished { card_id: 4 };
        assert_eq!(finished.exit_code(), 2);
        assert_eq!(finished.to_string(), "Card 4 is already finished");
    }

    #[test]
    fn test_not_found_message() {
        let err = BoardError::EntityNotFound { entity: "Card", id: 9 };
        assert_eq!(err.to_string(), "Card with id 9 was not found");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("card"));
    }

    #[test]
    fn test_database_errors_are_critical() {
        let err = BoardError::DatabaseError(sqlx::Error::RowNotFound);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.user_friendly_message(),
            "The database could not complete the operation"
        );
    }
}
