//! Catalog browsing.

use anyhow::Result;
use dulce_commerce::cart::NullRenderer;
use dulce_commerce::search::{parse_menu, Selection, NO_PRODUCTS_HINT, NO_PRODUCTS_MESSAGE};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::product_badge;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let selection = Selection {
        category: parse_menu(&args.category)?,
        price: parse_menu(&args.price)?,
        sort: args.sort.parse()?,
    };

    let (mut session, _) = ctx.open_session(NullRenderer)?;
    let browser = session.browser_mut();
    browser.apply(selection);
    browser.go_to_page(args.page);
    let results = browser.current();

    if results.pagination.page != args.page {
        ctx.output.warn(&format!(
            "Page {} does not exist, showing page {}",
            args.page, results.pagination.page
        ));
    }

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    ctx.output
        .header(&format!("Productos ({})", selection.sort.display_name()));

    if results.is_empty() {
        ctx.output.info(NO_PRODUCTS_MESSAGE);
        ctx.output.note(NO_PRODUCTS_HINT);
        return Ok(());
    }

    for product in &results.items {
        let id = format!("#{}", product.id.0);
        let badge = product_badge(product.badge.as_deref());
        ctx.output.table_row(
            &[
                id.as_str(),
                product.name.as_str(),
                product.price.as_str(),
                product.category.display_name(),
                badge.as_str(),
            ],
            &[4, 24, 9, 9, 0],
        );
        ctx.output.note(&product.description);
    }

    println!();
    ctx.output.info(&format!(
        "{} ({} productos)",
        results.pagination.label(),
        results.pagination.total
    ));

    Ok(())
}
