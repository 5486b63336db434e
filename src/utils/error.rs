use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Rental record is missing required field '{field}'")]
    MissingField { field: String },

    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidField {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Rental {rental_id} ends on {end} before it starts on {start}")]
    InvalidRentalPeriod {
        rental_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Unknown option of name '{name}'")]
    UnknownOption { name: String },

    #[error("Car with id {car_id} for rental {rental_id} not found")]
    CarNotFound { car_id: u64, rental_id: u64 },

    #[error("Commissionable cost of {commissionable_cost} for {days} days too low to cover fees")]
    InsufficientCommission { commissionable_cost: i64, days: u32 },

    #[error("Price of rental {rental_id} is too large to represent")]
    AmountOverflow { rental_id: u64 },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Business,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PricingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PricingError::MissingField { .. }
            | PricingError::InvalidField { .. }
            | PricingError::InvalidRentalPeriod { .. }
            | PricingError::UnknownOption { .. }
            | PricingError::CarNotFound { .. }
            | PricingError::AmountOverflow { .. }
            | PricingError::SerializationError(_) => ErrorCategory::Input,
            PricingError::InsufficientCommission { .. } => ErrorCategory::Business,
            PricingError::ConfigError { .. }
            | PricingError::ConfigValidationError { .. }
            | PricingError::InvalidConfigValueError { .. }
            | PricingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PricingError::ZipError(_) | PricingError::CsvError(_) | PricingError::IoError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Business => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PricingError::MissingField { field } => {
                format!("Add the '{}' field to every rental in the input file", field)
            }
            PricingError::InvalidField { field, .. } => {
                format!("Fix the '{}' value; dates must be formatted as YYYY-MM-DD", field)
            }
            PricingError::InvalidRentalPeriod { rental_id, .. } => format!(
                "Check the dates of rental {}: end_date must not precede start_date",
                rental_id
            ),
            PricingError::UnknownOption { .. } => {
                "Use one of the known option types: gps, baby_seat, additional_insurance"
                    .to_string()
            }
            PricingError::CarNotFound { car_id, .. } => {
                format!("Add car {} to the input or fix the rental's car_id", car_id)
            }
            PricingError::AmountOverflow { rental_id } => format!(
                "Check the car prices and distance of rental {}; amounts are integer minor units",
                rental_id
            ),
            PricingError::InsufficientCommission { .. } => {
                "Raise the car's price or rerun with the skip policy to continue past this rental"
                    .to_string()
            }
            PricingError::SerializationError(_) => {
                "Make sure the input file is valid JSON with cars, rentals and options".to_string()
            }
            PricingError::ConfigError { .. }
            | PricingError::ConfigValidationError { .. }
            | PricingError::InvalidConfigValueError { .. }
            | PricingError::MissingConfigError { .. } => {
                "Review the configuration file or command-line flags".to_string()
            }
            PricingError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            PricingError::ZipError(_) | PricingError::CsvError(_) => {
                "Retry without compression or with fewer output formats".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid input data: {}", self),
            ErrorCategory::Business => format!("Rental could not be priced: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
