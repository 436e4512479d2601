use crate::utils::error::{BoardError, Result};
use url::Url;

/// 資料表中文字欄位的最大長度 (VARCHAR(255))
pub const MAX_TEXT_LENGTH: usize = 255;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_database_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BoardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "Database URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "sqlite" => Ok(()),
            scheme => Err(BoardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported database scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BoardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BoardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BoardError::validation(
            field_name,
            "value cannot be empty or whitespace-only",
        ));
    }
    validate_max_length(field_name, value, MAX_TEXT_LENGTH)
}

pub fn validate_max_length(field_name: &str, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max {
        return Err(BoardError::validation(
            field_name,
            format!("value has {} characters, the limit is {}", length, max),
        ));
    }
    Ok(())
}

pub fn validate_positive_id(field_name: &str, id: i64) -> Result<()> {
    if id <= 0 {
        return Err(BoardError::validation(
            field_name,
            format!("id must be positive, got {}", id),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_database_url() {
        assert!(validate_database_url("database.url", "sqlite://taskboard.db").is_ok());
        assert!(validate_database_url("database.url", "sqlite::memory:").is_ok());
        assert!(validate_database_url("database.url", "").is_err());
        assert!(validate_database_url("database.url", "not a url").is_err());
        assert!(validate_database_url("database.url", "mysql://localhost/board").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "Sprint 12").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
        assert!(validate_non_empty_string("name", &"x".repeat(256)).is_err());
        assert!(validate_non_empty_string("name", &"é".repeat(255)).is_ok());
    }

    #[test]
    fn test_validate_positive_id() {
        assert!(validate_positive_id("card_id", 1).is_ok());
        assert!(validate_positive_id("card_id", 0).is_err());
        assert!(validate_positive_id("card_id", -3).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("max_connections", 5u32, 1, 100).is_ok());
        assert!(validate_range("max_connections", 0u32, 1, 100).is_err());
        assert!(validate_range("max_connections", 101u32, 1, 100).is_err());
    }
}
