use crate::domain::ports::OutputFormat;
use crate::utils::error::{PricingError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Output formats must be non-empty and distinct; each one maps to a single output file.
pub fn validate_output_formats(field_name: &str, formats: &[OutputFormat]) -> Result<()> {
    if formats.is_empty() {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: format!(
                "At least one format is required. Valid formats: {}",
                OutputFormat::NAMES.join(", ")
            ),
        });
    }

    for (i, format) in formats.iter().enumerate() {
        if formats[..i].contains(format) {
            return Err(PricingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.file_name().to_string(),
                reason: "Each output format may be listed only once".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PricingError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// Unwraps a field of an input record, reporting absence as `MissingField`.
pub fn require_record_field<T>(field_name: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| PricingError::MissingField {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PricingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "./data").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "da\0ta").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input.path", "data/input.json", &["json"]).is_ok());
        assert!(validate_file_extension("input.path", "data/input.csv", &["json"]).is_err());
        assert!(validate_file_extension("input.path", "data/input", &["json"]).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.formats", "csv", &["json", "csv"]).is_ok());
        assert!(validate_one_of("output.formats", "xml", &["json", "csv"]).is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        assert!(validate_output_formats("output.formats", &[OutputFormat::Json, OutputFormat::Csv]).is_ok());
        assert!(validate_output_formats("output.formats", &[]).is_err());

        match validate_output_formats(
            "output.formats",
            &[OutputFormat::Json, OutputFormat::Csv, OutputFormat::Json],
        ) {
            Err(PricingError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "output.formats");
                assert_eq!(value, "output.json");
            }
            other => panic!("expected InvalidConfigValueError, got {:?}", other),
        }
    }

    #[test]
    fn test_require_record_field_reports_missing_field() {
        assert_eq!(require_record_field("distance", Some(12)).unwrap(), 12);

        match require_record_field::<u32>("distance", None) {
            Err(PricingError::MissingField { field }) => assert_eq!(field, "distance"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("bundle.zip".to_string());
        assert_eq!(
            validate_required_field("output.compression.filename", &present).unwrap(),
            "bundle.zip"
        );
        assert!(validate_required_field::<String>("output.compression.filename", &None).is_err());
    }
}
