use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cart::Cart;
use crate::domain::product::ProductId;
use crate::errors::DomainError;
use crate::shop::catalog::Catalog;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
}

pub trait PricingEngine {
    fn price(&self, cart: &Cart, catalog: &Catalog) -> Result<PricingResult, DomainError>;
}

/// Sums one unit price per cart entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatPricingEngine;

impl PricingEngine for FlatPricingEngine {
    fn price(&self, cart: &Cart, catalog: &Catalog) -> Result<PricingResult, DomainError> {
        price_cart(cart, catalog)
    }
}

pub fn price_cart(cart: &Cart, catalog: &Catalog) -> Result<PricingResult, DomainError> {
    let lines = cart
        .items()
        .iter()
        .map(|product_id| {
            catalog.get(*product_id).map(|product| PricedLine {
                product_id: product.id(),
                name: product.name().to_string(),
                unit_price: product.price(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let total = lines
        .iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.unit_price))
        .ok_or_else(|| DomainError::InvariantViolation("cart total overflows".to_string()))?;

    Ok(PricingResult { lines, total })
}

/// Two-decimal rendering used for every monetary value shown to a shopper.
pub fn format_amount(amount: Decimal) -> String {
    let rounded =
        amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
