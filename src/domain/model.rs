use crate::utils::error::{PricingError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type CarId = u64;
pub type RentalId = u64;
pub type OptionId = u64;

/// Assistance is charged per rental day, in minor currency units.
pub const ASSISTANCE_FEE_PER_DAY: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    pub price_per_day: i64,
    pub price_per_km: i64,
}

impl Car {
    pub fn new(id: CarId, price_per_day: i64, price_per_km: i64) -> Self {
        Self {
            id,
            price_per_day,
            price_per_km,
        }
    }
}

/// A booked rental. The period is validated on construction, so `rental_days` is always >= 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    id: RentalId,
    car_id: CarId,
    start: NaiveDate,
    end: NaiveDate,
    distance: u32,
}

impl Rental {
    pub fn new(
        id: RentalId,
        car_id: CarId,
        start: NaiveDate,
        end: NaiveDate,
        distance: u32,
    ) -> Result<Self> {
        if end < start {
            return Err(PricingError::InvalidRentalPeriod {
                rental_id: id,
                start,
                end,
            });
        }

        Ok(Self {
            id,
            car_id,
            start,
            end,
            distance,
        })
    }

    pub fn id(&self) -> RentalId {
        self.id
    }

    pub fn car_id(&self) -> CarId {
        self.car_id
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Number of billed days, counting the end day.
    pub fn rental_days(&self) -> u32 {
        // end >= start holds, and the NaiveDate range spans far fewer than u32::MAX days
        (self.end - self.start).num_days() as u32 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayableTo {
    Owner,
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Gps,
    BabySeat,
    AdditionalInsurance,
}

impl OptionType {
    pub const ALL: [OptionType; 3] = [
        OptionType::Gps,
        OptionType::BabySeat,
        OptionType::AdditionalInsurance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OptionType::Gps => "gps",
            OptionType::BabySeat => "baby_seat",
            OptionType::AdditionalInsurance => "additional_insurance",
        }
    }

    pub fn price_per_day(self) -> i64 {
        match self {
            OptionType::Gps => 500,
            OptionType::BabySeat => 200,
            OptionType::AdditionalInsurance => 1000,
        }
    }

    pub fn payable_to(self) -> PayableTo {
        match self {
            OptionType::Gps | OptionType::BabySeat => PayableTo::Owner,
            OptionType::AdditionalInsurance => PayableTo::Platform,
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|option_type| option_type.name() == name)
            .ok_or_else(|| PricingError::UnknownOption {
                name: name.to_string(),
            })
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One option selected for a rental.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalOption {
    pub id: OptionId,
    pub rental_id: RentalId,
    pub option_type: OptionType,
}

impl RentalOption {
    pub fn new(id: OptionId, rental_id: RentalId, option_type: OptionType) -> Self {
        Self {
            id,
            rental_id,
            option_type,
        }
    }
}

/// A rental joined with its car and selected options, ready to be priced.
#[derive(Debug, Clone, Copy)]
pub struct RentalRequest<'a> {
    pub rental: &'a Rental,
    pub car: &'a Car,
    pub options: &'a [RentalOption],
}

impl<'a> RentalRequest<'a> {
    pub fn new(rental: &'a Rental, car: &'a Car, options: &'a [RentalOption]) -> Self {
        Self {
            rental,
            car,
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalPrice {
    pub id: RentalId,
    pub total_price: i64,
    pub insurance_fee: i64,
    pub assistance_fee: i64,
    /// Platform margin: commission left after insurance and assistance, plus platform options.
    pub drivy_fee: i64,
    pub options: Vec<RentalOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Driver,
    Owner,
    Insurance,
    Assistance,
    #[serde(rename = "drivy")]
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Debit,
    Credit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub who: Party,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: i64,
}

impl Transaction {
    pub fn debit(who: Party, amount: i64) -> Self {
        Self {
            who,
            kind: TransactionKind::Debit,
            amount,
        }
    }

    pub fn credit(who: Party, amount: i64) -> Self {
        Self {
            who,
            kind: TransactionKind::Credit,
            amount,
        }
    }
}

/// A rental the batch left out under the skip policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRental {
    pub rental_id: RentalId,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct PricingReport {
    pub prices: Vec<RentalPrice>,
    pub rejected: Vec<RejectedRental>,
}
