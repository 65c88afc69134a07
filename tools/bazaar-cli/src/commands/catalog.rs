//! Catalog browsing commands.

use anyhow::{bail, Result};
use bazaar_client::views::{CategoryNav, CategoryTile, ProductCard, ReviewSummary};
use bazaar_client::Route;
use bazaar_commerce::{CategoryId, ProductId, SubCategoryId};

use super::{fail, ProductsArgs};
use crate::context::Context;
use crate::output::{price_tag, stars};

/// List categories with their subcategories and cover images.
pub async fn categories(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let categories = client
        .catalog()
        .categories()
        .await
        .map_err(|e| fail(ctx, e))?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    if categories.is_empty() {
        ctx.output.info("No categories found.");
        return Ok(());
    }

    let covers = client.catalog().cover_images(&categories).await;
    let tiles = CategoryTile::build_all(&categories, &covers);
    let nav = CategoryNav::new(&categories, &Route::home());

    ctx.output.header("Categories");
    for (entry, tile) in nav.entries.iter().zip(&tiles) {
        ctx.output.list_item(&format!("{} ({})", entry.name, tile.id));
        ctx.output.kv("link", &entry.route.to_string());
        if let Some(image) = &tile.image_url {
            ctx.output.kv("image", image);
        }
        for child in &entry.children {
            ctx.output.kv("  sub", &format!("{}  {}", child.name, child.route));
        }
    }

    Ok(())
}

/// List products, or show one.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    if let Some(id) = args.id {
        return product(&ProductId::new(id), ctx).await;
    }

    let client = ctx.client()?;
    let category = args.category.map(CategoryId::new);
    let subcategory = args.subcategory.map(SubCategoryId::new);

    let products = client
        .catalog()
        .products(category.as_ref(), subcategory.as_ref())
        .await
        .map_err(|e| fail(ctx, e))?;

    let cart = client.state().cart.cart;
    let cards: Vec<ProductCard> = products
        .iter()
        .map(|p| ProductCard::new(p, cart.get(&p.id).map_or(0, |line| line.quantity)))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&cards);
        return Ok(());
    }

    let title = match &category {
        Some(category) => {
            // Titles come from the category list; fall back to the raw id.
            let categories = client.catalog().categories().await.unwrap_or_default();
            let route = Route::category(category.clone(), subcategory.clone());
            let nav = CategoryNav::new(&categories, &route);
            let crumbs = nav.breadcrumb();
            if crumbs.is_empty() {
                category.to_string()
            } else {
                crumbs.join(" / ")
            }
        }
        None => "All products".to_string(),
    };
    ctx.output.header(&title);

    if cards.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    ctx.output.table_row(&["ID", "NAME", "IN CART", "PRICE"], &[12, 32, 8, 0]);
    for card in &cards {
        let in_cart = if card.in_cart > 0 {
            card.in_cart.to_string()
        } else {
            "-".to_string()
        };
        let price = price_tag(
            &card.price,
            card.original_price.as_deref(),
            card.discount_badge.as_deref(),
        );
        ctx.output
            .table_row(&[card.id.as_str(), &card.name, &in_cart, &price], &[12, 32, 8, 0]);
    }

    Ok(())
}

async fn product(id: &ProductId, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let Some(product) = client.catalog().product(id).await.map_err(|e| fail(ctx, e))? else {
        bail!("Product '{}' not found", id);
    };
    let reviews = match client.reviews().reviews(id).await {
        Ok(reviews) => reviews,
        Err(e) => {
            ctx.output.debug(&format!("Reviews unavailable: {}", e));
            Vec::new()
        }
    };

    let in_cart = client.state().cart.cart.get(id).map_or(0, |line| line.quantity);
    let card = ProductCard::new(&product, in_cart);
    let summary = ReviewSummary::new(&reviews);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": card,
            "description": product.description,
            "reviews": summary,
        }));
        return Ok(());
    }

    ctx.output.header(&card.name);
    ctx.output.kv(
        "price",
        &price_tag(
            &card.price,
            card.original_price.as_deref(),
            card.discount_badge.as_deref(),
        ),
    );
    if let Some(description) = &product.description {
        ctx.output.kv("description", description);
    }
    if let Some(image) = &card.image_url {
        ctx.output.kv("image", image);
    }
    if card.in_cart > 0 {
        ctx.output.kv("in cart", &card.in_cart.to_string());
    }
    ctx.output
        .kv("rating", &format!("{} {}", stars(summary.stars), summary.headline()));

    Ok(())
}
