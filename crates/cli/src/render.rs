use shopcart_core::{format_amount, AttributeValue, Product};

pub const SEPARATOR: &str = "----------------------";

pub fn menu(store_name: &str) -> String {
    format!(
        "\n--- {store_name} ---\n\
         1. View Products\n\
         2. Add Product to Cart\n\
         3. View Cart\n\
         4. Checkout\n\
         5. Exit\n\
         Enter your choice: "
    )
}

pub fn amount(currency_label: &str, value: rust_decimal::Decimal) -> String {
    format!("{currency_label} {}", format_amount(value))
}

/// One `Label: value` line per attribute.
pub fn product(product: &Product, currency_label: &str) -> String {
    product
        .describe()
        .into_iter()
        .map(|attribute| {
            let value = match attribute.value {
                AttributeValue::Text(text) => text,
                AttributeValue::Amount(value) => amount(currency_label, value),
                AttributeValue::Count(count) => count.to_string(),
            };
            format!("{}: {value}", attribute.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn product_blocks<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    currency_label: &str,
) -> String {
    products
        .into_iter()
        .map(|item| format!("{}\n{SEPARATOR}\n", product(item, currency_label)))
        .collect()
}
