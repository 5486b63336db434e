use crate::domain::input::InputData;
use crate::domain::model::{Car, CarId, Rental, RentalId, RentalOption, RentalRequest};
use crate::utils::error::{PricingError, Result};
use std::collections::HashMap;

/// In-memory join of cars, rentals and options.
#[derive(Debug, Clone, Default)]
pub struct Database {
    cars: HashMap<CarId, Car>,
    rentals: Vec<Rental>,
    options: HashMap<RentalId, Vec<RentalOption>>,
}

impl Database {
    pub fn new(
        cars: HashMap<CarId, Car>,
        rentals: Vec<Rental>,
        options: HashMap<RentalId, Vec<RentalOption>>,
    ) -> Self {
        Self {
            cars,
            rentals,
            options,
        }
    }

    pub fn rentals(&self) -> &[Rental] {
        &self.rentals
    }

    pub fn request_for<'a>(&'a self, rental: &'a Rental) -> Result<RentalRequest<'a>> {
        let car = self
            .cars
            .get(&rental.car_id())
            .ok_or(PricingError::CarNotFound {
                car_id: rental.car_id(),
                rental_id: rental.id(),
            })?;
        let options = self
            .options
            .get(&rental.id())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        Ok(RentalRequest::new(rental, car, options))
    }

    /// One request per rental, in input order; a dangling car reference fails only its rental.
    pub fn requests(&self) -> impl Iterator<Item = (RentalId, Result<RentalRequest<'_>>)> + '_ {
        self.rentals
            .iter()
            .map(move |rental| (rental.id(), self.request_for(rental)))
    }

    /// All requests, failing at the first rental whose car is missing.
    pub fn rental_requests(&self) -> Result<Vec<RentalRequest<'_>>> {
        self.rentals
            .iter()
            .map(|rental| self.request_for(rental))
            .collect()
    }
}

impl From<InputData> for Database {
    fn from(data: InputData) -> Self {
        Self::new(data.cars, data.rentals, data.options)
    }
}
