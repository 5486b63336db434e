//! Pricing engine.
//!
//! Pure functions over validated records. All amounts are integer minor currency units;
//! every percentage is applied as `amount * percent / 100`, truncating toward zero.

use crate::domain::model::{
    Car, PayableTo, Rental, RentalOption, RentalPrice, RentalRequest, ASSISTANCE_FEE_PER_DAY,
};
use crate::utils::error::{PricingError, Result};

/// Share of the commissionable cost kept as commission.
pub const COMMISSION_PERCENT: i64 = 30;
/// Share of the commissionable cost owed to the insurer, taken out of the commission.
pub const INSURANCE_PERCENT: i64 = 15;

struct DayTier {
    first_day: u32,
    last_day: Option<u32>,
    percent: i64,
}

impl DayTier {
    fn days_in(&self, days: u32) -> u32 {
        if days < self.first_day {
            return 0;
        }
        let last = self.last_day.map_or(days, |last| last.min(days));
        last - self.first_day + 1
    }
}

const DAY_TIERS: [DayTier; 4] = [
    DayTier {
        first_day: 1,
        last_day: Some(1),
        percent: 100,
    },
    DayTier {
        first_day: 2,
        last_day: Some(4),
        percent: 90,
    },
    DayTier {
        first_day: 5,
        last_day: Some(10),
        percent: 70,
    },
    DayTier {
        first_day: 11,
        last_day: None,
        percent: 50,
    },
];

/// Exact `amount * percent / 100` for `percent` in `0..=100`, without forming the full product.
fn percent_of(amount: i64, percent: i64) -> i64 {
    amount / 100 * percent + amount % 100 * percent / 100
}

/// Day-based cost with the degressive discount curve. Each tier is floored on its own.
///
/// Returns `None` when the cost does not fit in an `i64`.
pub fn degressive_day_price(days: u32, base_price: i64) -> Option<i64> {
    DAY_TIERS.iter().try_fold(0i64, |total, tier| {
        let tier_cost = base_price.checked_mul(i64::from(tier.days_in(days)))?;
        total.checked_add(percent_of(tier_cost, tier.percent))
    })
}

pub fn mileage_price(distance: u32, price_per_km: i64) -> Option<i64> {
    i64::from(distance).checked_mul(price_per_km)
}

/// The part of a rental price the platform takes commission on: mileage plus day cost.
pub fn commissionable_cost(rental: &Rental, car: &Car) -> Option<i64> {
    mileage_price(rental.distance(), car.price_per_km)?
        .checked_add(degressive_day_price(rental.rental_days(), car.price_per_day)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionParts {
    pub commission: i64,
    pub insurance: i64,
    pub assistance: i64,
}

impl CommissionParts {
    /// What the platform keeps once insurance and assistance are paid.
    pub fn platform_retained(&self) -> i64 {
        self.commission - self.insurance - self.assistance
    }
}

pub fn commission_parts(commissionable_cost: i64, days: u32) -> Result<CommissionParts> {
    let commission = percent_of(commissionable_cost, COMMISSION_PERCENT);
    let insurance = percent_of(commissionable_cost, INSURANCE_PERCENT);
    let assistance = i64::from(days) * ASSISTANCE_FEE_PER_DAY;

    if assistance > insurance {
        return Err(PricingError::InsufficientCommission {
            commissionable_cost,
            days,
        });
    }

    Ok(CommissionParts {
        commission,
        insurance,
        assistance,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionCosts {
    pub owner: i64,
    pub platform: i64,
}

pub fn option_costs(options: &[RentalOption], days: u32) -> Option<OptionCosts> {
    let days = i64::from(days);
    options
        .iter()
        .try_fold(OptionCosts::default(), |mut costs, option| {
            let cost = option.option_type.price_per_day().checked_mul(days)?;
            let payee = match option.option_type.payable_to() {
                PayableTo::Owner => &mut costs.owner,
                PayableTo::Platform => &mut costs.platform,
            };
            *payee = payee.checked_add(cost)?;
            Some(costs)
        })
}

pub fn price(request: &RentalRequest<'_>) -> Result<RentalPrice> {
    let days = request.rental.rental_days();
    let overflow = || PricingError::AmountOverflow {
        rental_id: request.rental.id(),
    };

    let commissionable = commissionable_cost(request.rental, request.car).ok_or_else(overflow)?;
    let parts = commission_parts(commissionable, days)?;
    let options = option_costs(request.options, days).ok_or_else(overflow)?;

    let total_price = commissionable
        .checked_add(options.owner)
        .and_then(|total| total.checked_add(options.platform))
        .ok_or_else(overflow)?;
    let drivy_fee = parts
        .platform_retained()
        .checked_add(options.platform)
        .ok_or_else(overflow)?;

    Ok(RentalPrice {
        id: request.rental.id(),
        total_price,
        insurance_fee: parts.insurance,
        assistance_fee: parts.assistance,
        drivy_fee,
        options: request.options.to_vec(),
    })
}

/// Prices a rental that has no options.
pub fn price_rental(rental: &Rental, car: &Car) -> Result<RentalPrice> {
    price(&RentalRequest::new(rental, car, &[]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OptionType;
    use chrono::NaiveDate;

    fn rental_of_days(id: u64, days: u32, distance: u32) -> Rental {
        let start = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 11, days).unwrap();
        Rental::new(id, 1, start, end, distance).unwrap()
    }

    #[test]
    fn test_price_calculation_single_rental() {
        let rental = rental_of_days(2, 1, 10);
        let car = Car::new(1, 1000, 10);

        let price = price_rental(&rental, &car).unwrap();

        assert_eq!(price.id, 2);
        assert_eq!(price.total_price, 1100);
    }

    #[test]
    fn test_price_calculation_decreasing_price_per_day() {
        let car = Car::new(1, 1000, 0);
        let cases = [
            (1, 1000),
            (2, 1900),  // 1000 + 900
            (5, 4400),  // 1000 + 3*900 + 700
            (11, 8400), // 1000 + 3*900 + 6*700 + 500
        ];

        for (days, expected) in cases {
            let rental = rental_of_days(1, days, 0);
            assert_eq!(
                price_rental(&rental, &car).unwrap().total_price,
                expected,
                "{} days",
                days
            );
        }
    }

    #[test]
    fn test_day_tiers_are_floored_separately() {
        // 999 * 0.9 * 3 = 2697.3, 999 * 0.7 * 1 = 699.3
        assert_eq!(degressive_day_price(5, 999), Some(999 + 2697 + 699));
        assert_eq!(degressive_day_price(1, 0), Some(0));
    }

    #[test]
    fn test_computes_commission() {
        let rental = rental_of_days(2, 1, 0);
        let car = Car::new(1, 10000, 0);

        let price = price_rental(&rental, &car).unwrap();

        assert_eq!(price.insurance_fee, 1500); // 15% of price
        assert_eq!(price.assistance_fee, 100); // 100 per day
        assert_eq!(price.drivy_fee, 1400); // remainder of 30% of price
    }

    #[test]
    fn test_fails_if_commission_is_exceeding_rental_price() {
        let rental = rental_of_days(2, 1, 0);
        // 1 euro per day means the assistance fee alone exceeds the insurance share
        let car = Car::new(1, 100, 0);

        match price_rental(&rental, &car) {
            Err(PricingError::InsufficientCommission {
                commissionable_cost,
                days,
            }) => {
                assert_eq!(commissionable_cost, 100);
                assert_eq!(days, 1);
            }
            other => panic!("expected InsufficientCommission, got {:?}", other),
        }
    }

    #[test]
    fn test_assistance_equal_to_insurance_is_accepted() {
        // 15% of 667 is 100, exactly one day of assistance
        let parts = commission_parts(667, 1).unwrap();
        assert_eq!(parts.insurance, 100);
        assert_eq!(parts.assistance, 100);
        assert_eq!(parts.platform_retained(), 0);

        assert!(commission_parts(666, 1).is_err());
    }

    #[test]
    fn test_considers_options() {
        let car = Car::new(1, 1000, 10);
        let rental = rental_of_days(2, 4, 100);
        let base_price = 4700;

        let cases = [
            (OptionType::Gps, 2000),
            (OptionType::BabySeat, 800),
            (OptionType::AdditionalInsurance, 4000),
        ];

        for (option_type, extra_cost) in cases {
            let options = [RentalOption::new(1, 2, option_type)];
            let request = RentalRequest::new(&rental, &car, &options);

            assert_eq!(
                price(&request).unwrap().total_price,
                base_price + extra_cost,
                "{}",
                option_type
            );
        }
    }

    #[test]
    fn test_option_routing() {
        let car = Car::new(1, 1000, 10);
        let rental = rental_of_days(2, 4, 100);
        let without_options = price_rental(&rental, &car).unwrap();

        let owner_options = [
            RentalOption::new(1, 2, OptionType::Gps),
            RentalOption::new(2, 2, OptionType::BabySeat),
        ];
        let with_owner = price(&RentalRequest::new(&rental, &car, &owner_options)).unwrap();
        assert_eq!(with_owner.drivy_fee, without_options.drivy_fee);
        assert_eq!(with_owner.insurance_fee, without_options.insurance_fee);

        let platform_options = [RentalOption::new(3, 2, OptionType::AdditionalInsurance)];
        let with_platform = price(&RentalRequest::new(&rental, &car, &platform_options)).unwrap();
        assert_eq!(with_platform.drivy_fee, without_options.drivy_fee + 4000);
        assert_eq!(with_platform.options, platform_options.to_vec());
    }

    #[test]
    fn test_option_costs_groups_by_payee() {
        let options = [
            RentalOption::new(1, 1, OptionType::Gps),
            RentalOption::new(2, 1, OptionType::AdditionalInsurance),
            RentalOption::new(3, 1, OptionType::BabySeat),
        ];

        assert_eq!(
            option_costs(&options, 3),
            Some(OptionCosts {
                owner: 2100,
                platform: 3000
            })
        );
        assert_eq!(option_costs(&[], 3), Some(OptionCosts::default()));
    }

    #[test]
    fn test_percent_of_matches_full_product() {
        for amount in [0, 1, 99, 100, 667, 999, 123_457] {
            for percent in [15, 30, 50, 70, 90, 100] {
                assert_eq!(percent_of(amount, percent), amount * percent / 100);
            }
        }
        assert_eq!(percent_of(i64::MAX, 100), i64::MAX);
        assert_eq!(percent_of(i64::MAX, 30), (i128::from(i64::MAX) * 30 / 100) as i64);
    }

    #[test]
    fn test_large_car_price_over_a_long_rental() {
        // 1e17 + 3e17 * 0.9 + 6e17 * 0.7 + 20e17 * 0.5
        let rental = rental_of_days(4, 30, 0);
        let car = Car::new(1, 100_000_000_000_000_000, 0);

        let price = price_rental(&rental, &car).unwrap();

        assert_eq!(price.total_price, 1_790_000_000_000_000_000);
        assert_eq!(price.insurance_fee, 268_500_000_000_000_000);
        assert_eq!(price.assistance_fee, 3000);
        assert_eq!(price.drivy_fee, 537_000_000_000_000_000 - 268_500_000_000_000_000 - 3000);
    }

    #[test]
    fn test_oversized_car_price_is_rejected_without_panicking() {
        let rental = rental_of_days(4, 3, 0);
        let car = Car::new(1, i64::MAX / 2, 0);

        match price_rental(&rental, &car) {
            Err(PricingError::AmountOverflow { rental_id }) => assert_eq!(rental_id, 4),
            other => panic!("expected AmountOverflow, got {:?}", other),
        }
        assert_eq!(degressive_day_price(3, i64::MAX / 2), None);
    }

    #[test]
    fn test_large_price_that_fits_is_exact() {
        // 2e16 * (1 + 3*0.9 + 6*0.7) = 2e16 * 7.9
        let rental = rental_of_days(5, 10, 0);
        let car = Car::new(1, 20_000_000_000_000_000, 0);

        let price = price_rental(&rental, &car).unwrap();

        assert_eq!(price.total_price, 158_000_000_000_000_000);
        assert_eq!(price.insurance_fee, 23_700_000_000_000_000);
    }

    #[test]
    fn test_oversized_mileage_is_rejected() {
        let rental = rental_of_days(6, 1, u32::MAX);
        let car = Car::new(1, 1000, i64::MAX / 2);

        assert!(matches!(
            price_rental(&rental, &car),
            Err(PricingError::AmountOverflow { rental_id: 6 })
        ));
    }
}
