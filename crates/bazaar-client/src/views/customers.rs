//! Admin customer table.

use super::ViewState;
use crate::store::ListState;
use bazaar_commerce::customer::{filter_customers, Customer};
use serde::Serialize;

/// Shown when the list or the search comes back empty.
pub const NO_CUSTOMERS_MESSAGE: &str = "No customers found.";

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRow {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
    pub pin: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            mobile: customer.mobile.clone(),
            city: customer.city.clone(),
            pin: customer.pin.clone(),
        }
    }
}

/// Customer table filtered by the search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerTable {
    pub rows: Vec<CustomerRow>,
    /// Rows before filtering.
    pub total: usize,
}

impl CustomerTable {
    /// Build the table for `term`. A search that matches nothing is `Empty`.
    pub fn build(list: &ListState<Customer>, term: &str) -> ViewState<CustomerTable> {
        match ViewState::from_list(list, |customers| CustomerTable {
            rows: filter_customers(customers, term)
                .into_iter()
                .map(CustomerRow::from)
                .collect(),
            total: customers.len(),
        }) {
            ViewState::Ready(table) if table.rows.is_empty() => ViewState::Empty,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ListState<Customer> {
        let mut list = ListState::default();
        list.succeed(vec![
            Customer {
                city: "Pune".to_string(),
                email: "asha@example.com".to_string(),
                ..Customer::named("1", "Asha")
            },
            Customer {
                city: "Delhi".to_string(),
                pin: "110001".to_string(),
                ..Customer::named("2", "Ravi")
            },
        ]);
        list
    }

    #[test]
    fn test_search_pune() {
        let view = CustomerTable::build(&list(), "pune");
        let table = view.ready().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "Asha");
        assert_eq!(table.total, 2);
    }

    #[test]
    fn test_blank_term_keeps_all() {
        let view = CustomerTable::build(&list(), "   ");
        assert_eq!(view.ready().unwrap().rows.len(), 2);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert_eq!(CustomerTable::build(&list(), "mumbai"), ViewState::Empty);
    }
}
