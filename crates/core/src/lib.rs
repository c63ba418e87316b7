pub mod config;
pub mod domain;
pub mod errors;
pub mod shop;

pub use domain::cart::{Cart, CartState};
pub use domain::product::{AttributeValue, Product, ProductAttribute, ProductId, ProductKind};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use shop::catalog::{Catalog, CatalogError};
pub use shop::checkout::{CheckoutOutcome, CheckoutReceipt};
pub use shop::pricing::{format_amount, FlatPricingEngine, PricingEngine};
pub use shop::ShopSession;
