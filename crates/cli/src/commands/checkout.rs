use shopcart_core::config::AppConfig;
use shopcart_core::{Catalog, CheckoutOutcome, InterfaceError, ProductId, ShopSession};

use crate::commands::CommandResult;
use crate::render;

const COMMAND: &str = "checkout";

/// Adds every id to a fresh cart, then checks out once.
///
/// The first malformed or unknown id aborts the run before any total is
/// computed.
pub fn run(config: &AppConfig, catalog: Catalog, product_ids: &[impl AsRef<str>]) -> CommandResult {
    let mut session = ShopSession::new(catalog);

    for raw_id in product_ids {
        let raw_id = raw_id.as_ref();
        let Ok(id) = raw_id.trim().parse::<u32>() else {
            return CommandResult::from_interface(
                COMMAND,
                &InterfaceError::BadRequest {
                    message: format!("invalid product ID `{raw_id}`"),
                    error_class: "bad_request",
                },
            );
        };

        if let Err(error) = session.add_to_cart(ProductId(id)) {
            return CommandResult::from_interface(COMMAND, &InterfaceError::from(error));
        }
    }

    match session.checkout() {
        Ok(CheckoutOutcome::EmptyCart) => CommandResult::failure(
            COMMAND,
            "empty_cart",
            "Your cart is empty. Cannot checkout.",
            4,
        ),
        Ok(CheckoutOutcome::Completed(receipt)) => CommandResult::success(
            COMMAND,
            format!(
                "checked out {} item(s); total amount {}",
                receipt.item_count,
                render::amount(&config.shop.currency_label, receipt.total)
            ),
        ),
        Err(error) => CommandResult::from_interface(COMMAND, &InterfaceError::from(error)),
    }
}
