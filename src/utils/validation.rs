use crate::utils::error::{RebootError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(RebootError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(RebootError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(RebootError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// The movements CSV must exist before anything is planned.
pub fn validate_input_file(field_name: &str, path: &str) -> Result<()> {
    validate_non_empty_string(field_name, path)?;

    let metadata = std::fs::metadata(path).map_err(|e| RebootError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: path.to_string(),
        reason: format!("Cannot access file: {}", e),
    })?;
    if !metadata.is_file() {
        return Err(RebootError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path is not a regular file".to_string(),
        });
    }
    Ok(())
}

/// The output directory is created on demand, but an existing file in its place is an error.
pub fn validate_output_dir(field_name: &str, path: &str) -> Result<()> {
    validate_non_empty_string(field_name, path)?;

    if std::path::Path::new(path).is_file() {
        return Err(RebootError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path points at a file, expected a directory".to_string(),
        });
    }
    Ok(())
}

/// Primary and comparison pitch types must name different segments.
pub fn validate_distinct_pitch_types(field_name: &str, primary: &str, comparison: &str) -> Result<()> {
    if primary == comparison {
        return Err(RebootError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: comparison.to_string(),
            reason: "Comparison pitch type must differ from the primary pitch type".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(RebootError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RebootError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RebootError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects `${VAR}` placeholders that survived environment substitution.
pub fn validate_resolved(field_name: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(RebootError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Environment variable reference was not resolved".to_string(),
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
        return Err(RebootError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api.base_url", "https://api.rebootmotion.com").is_ok());
        assert!(validate_url("api.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("api.base_url", "").is_err());
        assert!(validate_url("api.base_url", "invalid-url").is_err());
        assert!(validate_url("api.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("api.timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("api.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_input_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_input_file("input.csv_path", file.path().to_str().unwrap()).is_ok());
        assert!(validate_input_file("input.csv_path", dir.path().to_str().unwrap()).is_err());
        assert!(validate_input_file("input.csv_path", "/nonexistent/movements.csv").is_err());
        assert!(validate_input_file("input.csv_path", " ").is_err());
    }

    #[test]
    fn test_validate_output_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_output_dir("output.path", dir.path().to_str().unwrap()).is_ok());
        assert!(validate_output_dir("output.path", "./not-created-yet").is_ok());
        assert!(validate_output_dir("output.path", file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_validate_distinct_pitch_types() {
        assert!(validate_distinct_pitch_types("analysis.comparison_pitch_type", "Fastball", "Curveball").is_ok());
        assert!(validate_distinct_pitch_types("analysis.comparison_pitch_type", "Fastball", "Fastball").is_err());
    }

    #[test]
    fn test_validate_resolved() {
        assert!(validate_resolved("api.api_key", "abc123").is_ok());
        assert!(validate_resolved("api.api_key", "${API_KEY}").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("api.api_key", &missing),
            Err(RebootError::MissingConfigError { .. })
        ));
        let present = Some("key".to_string());
        assert_eq!(validate_required_field("api.api_key", &present).unwrap(), "key");
    }
}
