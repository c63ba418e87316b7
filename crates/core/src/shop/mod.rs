pub mod catalog;
pub mod checkout;
pub mod pricing;

use tracing::{debug, info};

use crate::domain::cart::Cart;
use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

use self::{
    catalog::Catalog,
    checkout::CheckoutOutcome,
    pricing::{format_amount, FlatPricingEngine, PricingEngine},
};

/// The single catalog and cart a shopper works against for the life of the
/// process.
pub struct ShopSession<P = FlatPricingEngine> {
    catalog: Catalog,
    cart: Cart,
    pricing_engine: P,
}

impl ShopSession<FlatPricingEngine> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_pricing_engine(catalog, FlatPricingEngine)
    }
}

impl<P: PricingEngine> ShopSession<P> {
    pub fn with_pricing_engine(catalog: Catalog, pricing_engine: P) -> Self {
        Self { catalog, cart: Cart::new(), pricing_engine }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn list_products(&self) -> &[Product] {
        self.catalog.list()
    }

    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<&Product, DomainError> {
        let product = match self.catalog.get(product_id) {
            Ok(product) => product,
            Err(error) => {
                debug!(
                    event_name = "shop.cart.add_rejected",
                    product_id = product_id.0,
                    error = %error,
                    "product lookup failed"
                );
                return Err(error);
            }
        };

        self.cart.add(product_id);
        info!(
            event_name = "shop.cart.item_added",
            product_id = product_id.0,
            cart_len = self.cart.len(),
            "product added to cart"
        );
        Ok(product)
    }

    pub fn view_cart(&self) -> Result<Vec<&Product>, DomainError> {
        self.cart.items().iter().map(|product_id| self.catalog.get(*product_id)).collect()
    }

    pub fn checkout(&mut self) -> Result<CheckoutOutcome, DomainError> {
        let outcome = checkout::checkout(&self.pricing_engine, &mut self.cart, &self.catalog)?;

        match &outcome {
            CheckoutOutcome::EmptyCart => {
                debug!(event_name = "shop.checkout.empty_cart", "checkout requested on empty cart");
            }
            CheckoutOutcome::Completed(receipt) => {
                info!(
                    event_name = "shop.checkout.completed",
                    item_count = receipt.item_count,
                    total = %format_amount(receipt.total),
                    "checkout completed"
                );
            }
        }

        Ok(outcome)
    }

    /// Returns the remaining stock. Checkout never calls this.
    pub fn reduce_stock(&mut self, product_id: ProductId, quantity: u32) -> Result<u32, DomainError> {
        let product =
            self.catalog.find_mut(product_id).ok_or(DomainError::NotFound(product_id))?;
        product.reduce_stock(quantity)?;

        info!(
            event_name = "shop.stock.reduced",
            product_id = product_id.0,
            quantity,
            remaining = product.quantity_in_stock(),
            "product stock reduced"
        );
        Ok(product.quantity_in_stock())
    }
}
