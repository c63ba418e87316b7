use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variant payload carried on top of the shared product fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    Base,
    Electronic { warranty_period: String },
    Clothing { size: String },
}

impl ProductKind {
    /// Variant-specific attributes appended after the common ones.
    pub fn attributes(&self) -> Vec<ProductAttribute> {
        match self {
            Self::Base => Vec::new(),
            Self::Electronic { warranty_period } => {
                vec![ProductAttribute::text("Warranty", warranty_period)]
            }
            Self::Clothing { size } => vec![ProductAttribute::text("Size", size)],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Text(String),
    Amount(Decimal),
    Count(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductAttribute {
    pub label: &'static str,
    pub value: AttributeValue,
}

impl ProductAttribute {
    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: AttributeValue::Text(value.into()) }
    }

    pub fn amount(label: &'static str, value: Decimal) -> Self {
        Self { label, value: AttributeValue::Amount(value) }
    }

    pub fn count(label: &'static str, value: u32) -> Self {
        Self { label, value: AttributeValue::Count(value) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    quantity_in_stock: u32,
    #[serde(flatten)]
    kind: ProductKind,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        quantity_in_stock: u32,
        kind: ProductKind,
    ) -> Result<Self, DomainError> {
        if price < Decimal::ZERO {
            return Err(DomainError::InvariantViolation(format!(
                "product {id} price must not be negative (got {price})"
            )));
        }

        Ok(Self { id, name: name.into(), price, quantity_in_stock, kind })
    }

    /// Unsigned whole-unit prices satisfy the price invariant by construction.
    pub(crate) fn with_whole_price(
        id: ProductId,
        name: impl Into<String>,
        price: u32,
        quantity_in_stock: u32,
        kind: ProductKind,
    ) -> Self {
        Self { id, name: name.into(), price: Decimal::from(price), quantity_in_stock, kind }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity_in_stock(&self) -> u32 {
        self.quantity_in_stock
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Common attributes in display order followed by the variant's own.
    pub fn describe(&self) -> Vec<ProductAttribute> {
        let mut attributes = vec![
            ProductAttribute::count("Product ID", self.id.0),
            ProductAttribute::text("Name", &self.name),
            ProductAttribute::amount("Price", self.price),
            ProductAttribute::count("Stock", self.quantity_in_stock),
        ];
        attributes.extend(self.kind.attributes());
        attributes
    }

    /// All-or-nothing: on error the stock is left untouched.
    pub fn reduce_stock(&mut self, quantity: u32) -> Result<(), DomainError> {
        if quantity > self.quantity_in_stock {
            return Err(DomainError::InsufficientStock {
                product_id: self.id,
                requested: quantity,
                available: self.quantity_in_stock,
            });
        }

        self.quantity_in_stock -= quantity;
        Ok(())
    }
}
