pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{pipeline::PricingPipeline, pricing::price, runner::PricingRunner};
pub use crate::domain::model::{Car, OptionType, Rental, RentalOption, RentalPrice, RentalRequest};
pub use crate::utils::error::{PricingError, Result};
