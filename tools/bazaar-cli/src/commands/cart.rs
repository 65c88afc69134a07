//! Cart commands.

use anyhow::{bail, Result};
use bazaar_client::views::CartView;
use bazaar_client::BazaarClient;
use bazaar_commerce::ProductId;

use super::{fail, CartArgs, CartCommand};
use crate::context::Context;
use crate::output::price_tag;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let cart = client.cart();

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => cart.refresh().await.map_err(|e| fail(ctx, e))?,
        CartCommand::Add {
            product_id,
            quantity,
        } => {
            if quantity < 1 {
                bail!("Quantity must be at least 1");
            }
            let product_id = ProductId::new(product_id);
            let Some(product) = client
                .catalog()
                .product(&product_id)
                .await
                .map_err(|e| fail(ctx, e))?
            else {
                bail!("Product '{}' not found", product_id);
            };
            cart.add(product.to_line_item(quantity))
                .await
                .map_err(|e| fail(ctx, e))?;
            ctx.output
                .success(&format!("Added {} x {}", quantity, product.name));
        }
        CartCommand::Set {
            product_id,
            quantity,
        } => {
            cart.update(&ProductId::new(product_id), quantity)
                .await
                .map_err(|e| fail(ctx, e))?;
        }
        CartCommand::Remove { product_id } => {
            cart.remove(&ProductId::new(product_id))
                .await
                .map_err(|e| fail(ctx, e))?;
        }
        CartCommand::Clear => {
            cart.clear().await.map_err(|e| fail(ctx, e))?;
            ctx.output.success("Cart cleared.");
        }
    }

    client.persist_guest_cart()?;
    show(&client, ctx)
}

fn show(client: &BazaarClient, ctx: &Context) -> Result<()> {
    let view = CartView::from_state(&client.state().cart)?;

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    if let Some(error) = &view.error {
        ctx.output.warn(error);
    }

    ctx.output.header("Cart");
    if view.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "NAME", "QTY", "SUBTOTAL", "UNIT PRICE"], &[12, 32, 4, 12, 0]);
    for line in &view.lines {
        let unit = price_tag(
            &line.unit_price,
            line.original_price.as_deref(),
            line.discount_badge.as_deref(),
        );
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.name,
                &line.quantity.to_string(),
                &line.subtotal,
                &unit,
            ],
            &[12, 32, 4, 12, 0],
        );
    }

    ctx.output.info("");
    ctx.output.kv("items", &view.total_item_count.to_string());
    ctx.output.kv("total", &view.total_amount);
    if let Some(savings) = &view.total_savings {
        ctx.output.kv("you save", savings);
    }

    Ok(())
}
