//! Raw input records as they appear in the JSON fixtures, and their conversion into
//! validated domain records.

use crate::domain::model::{Car, CarId, OptionId, OptionType, Rental, RentalId, RentalOption};
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::require_record_field;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDocument {
    pub cars: Vec<RawCar>,
    pub rentals: Vec<RawRental>,
    // older fixtures predate options
    #[serde(default)]
    pub options: Vec<RawOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCar {
    pub id: CarId,
    pub price_per_day: i64,
    pub price_per_km: i64,
}

/// Every field is optional here so that absence surfaces as `MissingField`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRental {
    pub id: Option<RentalId>,
    pub car_id: Option<CarId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub distance: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOption {
    pub id: OptionId,
    pub rental_id: RentalId,
    #[serde(rename = "type")]
    pub option_type: String,
}

impl From<RawCar> for Car {
    fn from(raw: RawCar) -> Self {
        Car::new(raw.id, raw.price_per_day, raw.price_per_km)
    }
}

impl TryFrom<RawRental> for Rental {
    type Error = PricingError;

    fn try_from(raw: RawRental) -> Result<Self> {
        let id = require_record_field("id", raw.id)?;
        let car_id = require_record_field("car_id", raw.car_id)?;
        let start_date = require_record_field("start_date", raw.start_date)?;
        let end_date = require_record_field("end_date", raw.end_date)?;
        let distance = require_record_field("distance", raw.distance)?;

        Rental::new(
            id,
            car_id,
            parse_date("start_date", &start_date)?,
            parse_date("end_date", &end_date)?,
            distance,
        )
    }
}

impl TryFrom<RawOption> for RentalOption {
    type Error = PricingError;

    fn try_from(raw: RawOption) -> Result<Self> {
        let option_type = OptionType::from_name(&raw.option_type)?;
        Ok(RentalOption::new(raw.id, raw.rental_id, option_type))
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| PricingError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Validated input: cars indexed by id, rentals in input order, options grouped by rental.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputData {
    pub cars: HashMap<CarId, Car>,
    pub rentals: Vec<Rental>,
    pub options: HashMap<RentalId, Vec<RentalOption>>,
}

impl InputData {
    pub fn from_document(document: InputDocument) -> Result<Self> {
        let cars = document
            .cars
            .into_iter()
            .map(|raw| {
                let car = Car::from(raw);
                (car.id, car)
            })
            .collect();

        let rentals = document
            .rentals
            .into_iter()
            .map(Rental::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut options: HashMap<RentalId, Vec<RentalOption>> = HashMap::new();
        for raw in document.options {
            let option = RentalOption::try_from(raw)?;
            options.entry(option.rental_id).or_default().push(option);
        }

        Ok(Self {
            cars,
            rentals,
            options,
        })
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let document: InputDocument = serde_json::from_slice(bytes)?;
        Self::from_document(document)
    }
}
