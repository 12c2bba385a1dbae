//! Shopping cart commands.

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use dialoguer::Confirm;
use dulce_cache::FileStore;
use dulce_commerce::cart::{Decrease, NavBadge, Receipt, TextRenderer, EMPTY_CART_MESSAGE};
use dulce_storefront::StorefrontSession;
use serde::Serialize;

use super::{line_index, CartArgs, CartCommand};
use crate::context::Context;

type Session = StorefrontSession<FileStore, (TextRenderer, NavBadge)>;

/// Order confirmation printed after checkout.
#[derive(Serialize)]
struct PlacedOrder<'a> {
    placed_at: DateTime<Utc>,
    message: String,
    #[serde(flatten)]
    receipt: &'a Receipt,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let (mut session, _) = ctx.open_session((TextRenderer::new(), NavBadge::new()))?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { product } => {
            let outcome = session
                .add_to_cart(&product)
                .with_context(|| format!("Cannot add '{}'", product))?;
            ctx.output.debug(&format!(
                "Línea {}: {} unidad(es)",
                outcome.index + 1,
                outcome.quantity
            ));
            for notification in session.notifier().visible() {
                ctx.output.notification(&notification);
            }
        }
        CartCommand::Increase { line } => {
            let quantity = session.increase(line_index(line)?)?;
            ctx.output
                .success(&format!("Línea {}: {} unidad(es)", line, quantity));
        }
        CartCommand::Decrease { line } => match session.decrease(line_index(line)?)? {
            Decrease::Decremented { quantity } => ctx
                .output
                .success(&format!("Línea {}: {} unidad(es)", line, quantity)),
            Decrease::Removed(item) => ctx
                .output
                .success(&format!("{} eliminado del carrito", item.name)),
        },
        CartCommand::Remove { line } => {
            let item = session.remove(line_index(line)?)?;
            ctx.output
                .success(&format!("{} eliminado del carrito", item.name));
        }
        CartCommand::Checkout { yes } => return checkout(&mut session, yes, ctx),
    }

    show(&session, ctx)
}

fn show(session: &Session, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&session.cart().view()?);
        return Ok(());
    }

    let (text, badge) = session.cart().renderer();
    ctx.output.header(&format!("Carrito ({})", badge.tooltip));
    for line in text.lines() {
        ctx.output.list_item(line);
    }
    ctx.output.kv("Total", text.total());

    Ok(())
}

fn checkout(session: &mut Session, yes: bool, ctx: &Context) -> Result<()> {
    if session.cart().store().cart().is_empty() {
        ctx.output.warn(EMPTY_CART_MESSAGE);
        return Ok(());
    }

    show(session, ctx)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("¿Confirmar compra?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Compra cancelada");
            return Ok(());
        }
    }

    let receipt = session.checkout()?;
    let order = PlacedOrder {
        placed_at: Utc::now(),
        message: receipt.confirmation_message(),
        receipt: &receipt,
    };

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    for notification in session.notifier().visible() {
        ctx.output.notification(&notification);
    }
    ctx.output.success(&order.message);
    ctx.output.kv("Unidades", &receipt.item_count.to_string());
    ctx.output.kv(
        "Fecha",
        &order.placed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );

    Ok(())
}
