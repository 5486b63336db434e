//! Renders priced rentals as ledger transactions and commission breakdowns.

use crate::domain::model::{OptionType, Party, RentalId, RentalPrice, Transaction};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalTransactions {
    pub id: RentalId,
    pub options: Vec<OptionType>,
    pub actions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commission {
    pub insurance_fee: i64,
    pub assistance_fee: i64,
    pub drivy_fee: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceComponents {
    pub id: RentalId,
    pub price: i64,
    pub commission: Commission,
}

/// Top-level output document: `{"rentals": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct RentalsDocument<T> {
    pub rentals: Vec<T>,
}

/// Row of the CSV price report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    pub id: RentalId,
    pub price: i64,
    pub insurance_fee: i64,
    pub assistance_fee: i64,
    pub drivy_fee: i64,
    pub owner_credit: i64,
}

/// Whatever the driver pays that is not owed to insurance, assistance or the platform.
pub fn owner_credit(price: &RentalPrice) -> i64 {
    price.total_price - price.insurance_fee - price.assistance_fee - price.drivy_fee
}

pub fn transactions(price: &RentalPrice) -> Vec<Transaction> {
    vec![
        Transaction::debit(Party::Driver, price.total_price),
        Transaction::credit(Party::Owner, owner_credit(price)),
        Transaction::credit(Party::Insurance, price.insurance_fee),
        Transaction::credit(Party::Assistance, price.assistance_fee),
        Transaction::credit(Party::Platform, price.drivy_fee),
    ]
}

pub fn rental_transactions(price: &RentalPrice) -> RentalTransactions {
    RentalTransactions {
        id: price.id,
        options: price.options.iter().map(|o| o.option_type).collect(),
        actions: transactions(price),
    }
}

pub fn price_components(price: &RentalPrice) -> PriceComponents {
    PriceComponents {
        id: price.id,
        price: price.total_price,
        commission: Commission {
            insurance_fee: price.insurance_fee,
            assistance_fee: price.assistance_fee,
            drivy_fee: price.drivy_fee,
        },
    }
}

pub fn price_row(price: &RentalPrice) -> PriceRow {
    PriceRow {
        id: price.id,
        price: price.total_price,
        insurance_fee: price.insurance_fee,
        assistance_fee: price.assistance_fee,
        drivy_fee: price.drivy_fee,
        owner_credit: owner_credit(price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RentalOption, TransactionKind};

    fn sample_price() -> RentalPrice {
        RentalPrice {
            id: 1,
            total_price: 3700,
            insurance_fee: 450,
            assistance_fee: 100,
            drivy_fee: 350,
            options: vec![
                RentalOption::new(1, 1, OptionType::Gps),
                RentalOption::new(2, 1, OptionType::BabySeat),
            ],
        }
    }

    #[test]
    fn test_transactions_split_total_price() {
        let actions = transactions(&sample_price());

        assert_eq!(
            actions,
            vec![
                Transaction::debit(Party::Driver, 3700),
                Transaction::credit(Party::Owner, 2800),
                Transaction::credit(Party::Insurance, 450),
                Transaction::credit(Party::Assistance, 100),
                Transaction::credit(Party::Platform, 350),
            ]
        );

        let credited: i64 = actions
            .iter()
            .filter(|t| t.kind == TransactionKind::Credit)
            .map(|t| t.amount)
            .sum();
        assert_eq!(credited, 3700);
    }

    #[test]
    fn test_rental_transactions_json() {
        let json = serde_json::to_value(rental_transactions(&sample_price())).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "options": ["gps", "baby_seat"],
                "actions": [
                    {"who": "driver", "type": "debit", "amount": 3700},
                    {"who": "owner", "type": "credit", "amount": 2800},
                    {"who": "insurance", "type": "credit", "amount": 450},
                    {"who": "assistance", "type": "credit", "amount": 100},
                    {"who": "drivy", "type": "credit", "amount": 350}
                ]
            })
        );
    }

    #[test]
    fn test_price_components_json() {
        let json = serde_json::to_value(price_components(&sample_price())).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "price": 3700,
                "commission": {
                    "insurance_fee": 450,
                    "assistance_fee": 100,
                    "drivy_fee": 350
                }
            })
        );
    }

    #[test]
    fn test_price_row_carries_owner_credit() {
        let row = price_row(&sample_price());
        assert_eq!(row.owner_credit, 2800);
        assert_eq!(row.price, 3700);
    }
}
