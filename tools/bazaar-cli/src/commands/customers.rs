//! Admin customer list.

use anyhow::{bail, Result};
use bazaar_client::views::{CustomerTable, ViewState, NO_CUSTOMERS_MESSAGE};
use bazaar_client::Gated;

use super::{fail, CustomersArgs};
use crate::context::Context;

const WIDTHS: [usize; 5] = [24, 28, 12, 14, 8];

/// Run the customers command.
pub async fn run(args: CustomersArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    if let Gated::Redirect(route) = client
        .customers()
        .customers()
        .await
        .map_err(|e| fail(ctx, e))?
    {
        bail!("Admins only. Log in as an admin to continue ({}).", route);
    }

    let term = args.search.unwrap_or_default();
    let table = match CustomerTable::build(&client.state().customers, &term) {
        ViewState::Ready(table) => table,
        ViewState::Empty => {
            ctx.output.info(NO_CUSTOMERS_MESSAGE);
            return Ok(());
        }
        ViewState::Error(message) => bail!(message),
        ViewState::Loading => bail!("Customer list is still loading"),
    };

    if ctx.output.is_json() {
        ctx.output.json(&table);
        return Ok(());
    }

    ctx.output.header("Customers");
    ctx.output
        .table_row(&["NAME", "EMAIL", "MOBILE", "CITY", "PIN"], &WIDTHS);
    for row in &table.rows {
        ctx.output.table_row(
            &[&row.name, &row.email, &row.mobile, &row.city, &row.pin],
            &WIDTHS,
        );
    }
    ctx.output.info("");
    ctx.output
        .info(&format!("Showing {} of {} customer(s)", table.rows.len(), table.total));

    Ok(())
}
