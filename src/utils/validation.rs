use crate::utils::error::{ClientError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ClientError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ClientError::MissingParameter {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_list<T>(field_name: &str, value: &Option<Vec<T>>) -> Result<()> {
    match value {
        Some(items) if !items.is_empty() => Ok(()),
        _ => Err(ClientError::MissingParameter {
            field: field_name.to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidParameter {
            field: field_name.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Exactly one of the two ids must be given, as the network services locate the start element by one of them.
pub fn validate_one_of(
    first_name: &str,
    first: Option<i64>,
    second_name: &str,
    second: Option<i64>,
) -> Result<()> {
    match (first, second) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (None, None) => Err(ClientError::MissingParameter {
            field: format!("{} or {}", first_name, second_name),
        }),
        (Some(_), Some(_)) => Err(ClientError::InvalidParameter {
            field: format!("{}/{}", first_name, second_name),
            reason: "only one of them may be set".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("server.url", "https://example.com").is_ok());
        assert!(validate_url("server.url", "http://example.com/iserver").is_ok());
        assert!(validate_url("server.url", "").is_err());
        assert!(validate_url("server.url", "invalid-url").is_err());
        assert!(validate_url("server.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("server.timeout_seconds", 30, 1, 600).is_ok());
        assert!(validate_range("server.timeout_seconds", 0, 1, 600).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("edgeID", Some(1), "nodeID", None).is_ok());
        assert!(validate_one_of("edgeID", None, "nodeID", Some(2)).is_ok());
        assert!(matches!(
            validate_one_of("edgeID", None, "nodeID", None),
            Err(ClientError::MissingParameter { .. })
        ));
        assert!(matches!(
            validate_one_of("edgeID", Some(1), "nodeID", Some(2)),
            Err(ClientError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_list() {
        assert!(validate_non_empty_list("datasetNames", &Some(vec!["Roads"])).is_ok());
        assert!(validate_non_empty_list::<String>("datasetNames", &Some(vec![])).is_err());
        assert!(validate_non_empty_list::<String>("datasetNames", &None).is_err());
    }
}
