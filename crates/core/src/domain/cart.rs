use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartState {
    Empty,
    NonEmpty,
}

/// Session-scoped selection of catalog products.
///
/// Entries are product identifiers resolved through the catalog on demand, so
/// the same product may appear more than once and each entry counts as one
/// unit at checkout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<ProductId>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product_id: ProductId) {
        self.items.push(product_id);
    }

    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> CartState {
        if self.items.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
