//! Product search.

use anyhow::Result;
use dulce_commerce::cart::NullRenderer;
use dulce_commerce::search::{highlight, NO_RESULTS_HINT, NO_RESULTS_TITLE};

use super::SearchArgs;
use crate::context::Context;
use crate::output::{highlight_marks, product_badge};

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let term = args.term.join(" ");
    let (session, _) = ctx.open_session(NullRenderer)?;
    let outcome = session.search(&term);

    if ctx.output.is_json() {
        ctx.output.json(&outcome);
        return Ok(());
    }

    if outcome.show_no_results() {
        ctx.output.warn(NO_RESULTS_TITLE);
        ctx.output.note(NO_RESULTS_HINT);
        return Ok(());
    }

    match outcome.summary() {
        Some(summary) => ctx.output.header(&summary),
        None => ctx.output.header("Todos los productos"),
    }

    let (open, close) = highlight_marks();
    for hit in &outcome.hits {
        let product = hit.product;
        let name = highlight(&product.name, &hit.name_spans, open, close);
        ctx.output.list_item(&format!(
            "#{} {} {} {}",
            product.id.0,
            name,
            product.price,
            product_badge(product.badge.as_deref())
        ));
        ctx.output
            .note(&highlight(&product.description, &hit.description_spans, open, close));
    }

    Ok(())
}
