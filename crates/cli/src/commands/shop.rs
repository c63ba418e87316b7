use std::io::{self, BufRead, Write};
use std::str::FromStr;

use shopcart_core::config::ShopConfig;
use shopcart_core::{
    CheckoutOutcome, DomainError, InterfaceError, PricingEngine, ProductId, ShopSession,
};
use tracing::{debug, warn};

use crate::render;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    ListProducts,
    AddToCart,
    ViewCart,
    Checkout,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1" => Ok(Self::ListProducts),
            "2" => Ok(Self::AddToCart),
            "3" => Ok(Self::ViewCart),
            "4" => Ok(Self::Checkout),
            "5" => Ok(Self::Exit),
            other => Err(other.to_string()),
        }
    }
}

/// Runs the menu loop until the shopper exits or input is exhausted.
pub fn run<P, R, W>(
    session: &mut ShopSession<P>,
    config: &ShopConfig,
    input: R,
    output: &mut W,
) -> io::Result<()>
where
    P: PricingEngine,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{}", render::menu(&config.store_name))?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(output)?;
            break;
        };

        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(raw) => {
                debug!(event_name = "shop.menu.invalid_choice", input = %raw, "unrecognised menu choice");
                writeln!(output, "Invalid choice. Please try again.")?;
                continue;
            }
        };

        match choice {
            MenuChoice::ListProducts => {
                writeln!(output, "\n--- Available Products ---")?;
                write!(
                    output,
                    "{}",
                    render::product_blocks(session.list_products(), &config.currency_label)
                )?;
            }
            MenuChoice::AddToCart => {
                write!(output, "Enter Product ID to add to cart: ")?;
                output.flush()?;

                let Some(raw_id) = lines.next().transpose()? else {
                    writeln!(output)?;
                    break;
                };
                add_to_cart(session, raw_id.trim(), output)?;
            }
            MenuChoice::ViewCart => view_cart(session, config, output)?,
            MenuChoice::Checkout => checkout(session, config, output)?,
            MenuChoice::Exit => break,
        }
    }

    writeln!(output, "Exiting the system. Goodbye!")?;
    output.flush()
}

fn add_to_cart<P: PricingEngine, W: Write>(
    session: &mut ShopSession<P>,
    raw_id: &str,
    output: &mut W,
) -> io::Result<()> {
    let Ok(id) = raw_id.parse::<u32>() else {
        return writeln!(output, "Invalid product ID.");
    };

    match session.add_to_cart(ProductId(id)) {
        Ok(_) => writeln!(output, "Product added to cart successfully."),
        Err(DomainError::NotFound(product_id)) => {
            writeln!(output, "Product with ID {product_id} not found.")
        }
        Err(error) => {
            warn!(event_name = "shop.cart.add_failed", error = %error, "unexpected add failure");
            writeln!(output, "{}", InterfaceError::from(error).user_message())
        }
    }
}

fn view_cart<P: PricingEngine, W: Write>(
    session: &ShopSession<P>,
    config: &ShopConfig,
    output: &mut W,
) -> io::Result<()> {
    if session.cart().is_empty() {
        return writeln!(output, "Your cart is empty.");
    }

    match session.view_cart() {
        Ok(products) => {
            writeln!(output, "\n--- Shopping Cart ---")?;
            write!(output, "{}", render::product_blocks(products, &config.currency_label))
        }
        Err(error) => {
            warn!(event_name = "shop.cart.view_failed", error = %error, "cart entry did not resolve");
            writeln!(output, "Could not display cart: {error}")
        }
    }
}

fn checkout<P: PricingEngine, W: Write>(
    session: &mut ShopSession<P>,
    config: &ShopConfig,
    output: &mut W,
) -> io::Result<()> {
    match session.checkout() {
        Ok(CheckoutOutcome::EmptyCart) => writeln!(output, "Your cart is empty. Cannot checkout."),
        Ok(CheckoutOutcome::Completed(receipt)) => {
            writeln!(
                output,
                "Total Amount: {}",
                render::amount(&config.currency_label, receipt.total)
            )?;
            writeln!(output, "Thank you for your purchase!")
        }
        Err(error) => {
            warn!(event_name = "shop.checkout.failed", error = %error, "checkout failed");
            writeln!(output, "Checkout failed: {error}")
        }
    }
}
