pub mod assembly;
pub mod pipeline;
pub mod pricing;
pub mod runner;
pub mod settlement;

pub use crate::domain::input::InputData;
pub use crate::domain::model::{PricingReport, RentalPrice, RentalRequest};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
