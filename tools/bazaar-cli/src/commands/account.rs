//! Login, registration, password reset and logout.

use anyhow::Result;
use bazaar_auth::{Credentials, PasswordReset, Registration};
use bazaar_client::Reconciliation;

use super::{fail, ForgotPasswordArgs, LoginArgs, RegisterArgs};
use crate::context::Context;

pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let outcome = client
        .auth()
        .login(&Credentials::new(args.username, args.password))
        .await
        .map_err(|e| fail(ctx, e))?;
    client.persist_guest_cart()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "role": outcome.role,
            "redirect": outcome.redirect.to_string(),
            "cart": client.state().cart,
        }));
        return Ok(());
    }

    ctx.output.success(&format!("Logged in as {}", outcome.role));
    match outcome.reconciliation {
        Some(Reconciliation::Merged { lines }) => ctx.output.info(&format!(
            "Guest cart merged into your account ({} line(s))",
            lines
        )),
        Some(Reconciliation::Fetched { lines }) => {
            ctx.output.info(&format!("Loaded your cart ({} line(s))", lines))
        }
        Some(Reconciliation::Skipped) => {}
        None => {
            let error = client.state().cart.error.unwrap_or_default();
            ctx.output.warn(&format!("Could not sync your cart: {}", error));
        }
    }
    ctx.output.debug(&format!("Redirect: {}", outcome.redirect));

    Ok(())
}

pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let registration = Registration {
        name: args.name,
        email: args.email,
        mobile: args.mobile,
        password: args.password,
    };
    let next = client
        .auth()
        .register(&registration)
        .await
        .map_err(|e| fail(ctx, e))?;

    ctx.output.success("Account created. You can now log in.");
    ctx.output.debug(&format!("Redirect: {}", next));
    Ok(())
}

pub async fn forgot_password(args: ForgotPasswordArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let message = client
        .auth()
        .forgot_password(&PasswordReset::new(args.email))
        .await
        .map_err(|e| fail(ctx, e))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "message": message }));
    } else {
        ctx.output.success(&message);
    }
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    if !client.state().auth.is_logged_in {
        ctx.output.info("Not logged in.");
        return Ok(());
    }

    client.auth().logout().map_err(|e| fail(ctx, e))?;
    client.persist_guest_cart()?;
    ctx.output.success("Logged out.");
    Ok(())
}
