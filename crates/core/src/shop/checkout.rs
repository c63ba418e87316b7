use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cart::Cart;
use crate::errors::DomainError;
use crate::shop::catalog::Catalog;
use crate::shop::pricing::{PricedLine, PricingEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub lines: Vec<PricedLine>,
    pub item_count: usize,
    pub total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    EmptyCart,
    Completed(CheckoutReceipt),
}

/// Totals the cart and empties it. Catalog stock is never touched.
///
/// An empty cart yields [`CheckoutOutcome::EmptyCart`] without pricing. If any
/// entry fails to resolve the cart is left as it was.
pub fn checkout<P: PricingEngine>(
    engine: &P,
    cart: &mut Cart,
    catalog: &Catalog,
) -> Result<CheckoutOutcome, DomainError> {
    if cart.is_empty() {
        return Ok(CheckoutOutcome::EmptyCart);
    }

    let pricing = engine.price(cart, catalog)?;
    let receipt =
        CheckoutReceipt { item_count: pricing.lines.len(), lines: pricing.lines, total: pricing.total };
    cart.clear();

    Ok(CheckoutOutcome::Completed(receipt))
}
