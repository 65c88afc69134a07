//! Review commands.

use anyhow::Result;
use bazaar_client::views::{ReviewSummary, NO_REVIEWS_MESSAGE};
use bazaar_commerce::review::ReviewDraft;
use bazaar_commerce::ProductId;

use super::{fail, ReviewsArgs, ReviewsCommand};
use crate::context::Context;
use crate::output::stars;

/// Run the reviews command.
pub async fn run(args: ReviewsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ReviewsCommand::List { product_id } => list(&ProductId::new(product_id), ctx).await,
        ReviewsCommand::Write {
            product_id,
            rating,
            comment,
        } => write(&ProductId::new(product_id), ReviewDraft::new(rating, comment), ctx).await,
    }
}

async fn list(product_id: &ProductId, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let reviews = client
        .reviews()
        .reviews(product_id)
        .await
        .map_err(|e| fail(ctx, e))?;

    if ctx.output.is_json() {
        ctx.output.json(&reviews);
        return Ok(());
    }

    let summary = ReviewSummary::new(&reviews);
    ctx.output.header(&format!("Reviews for {}", product_id));
    if reviews.is_empty() {
        ctx.output.info(NO_REVIEWS_MESSAGE);
        return Ok(());
    }

    ctx.output.info(&format!("{} {}", stars(summary.stars), summary.headline()));
    for review in &reviews {
        let author = review.author.as_deref().unwrap_or("Anonymous");
        let date = review
            .created_at
            .map(|at| at.format("%d %b %Y").to_string())
            .unwrap_or_default();
        ctx.output.info("");
        ctx.output
            .list_item(&format!("{} {}  {}", stars(review.rating), author, date));
        ctx.output.kv("comment", &review.comment);
    }

    Ok(())
}

async fn write(product_id: &ProductId, draft: ReviewDraft, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let created = client
        .reviews()
        .submit(product_id, &draft)
        .await
        .map_err(|e| fail(ctx, e))?;

    if ctx.output.is_json() {
        ctx.output.json(&created);
        return Ok(());
    }

    ctx.output.success("Review submitted. Thank you!");
    Ok(())
}
