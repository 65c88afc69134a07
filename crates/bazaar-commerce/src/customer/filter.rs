//! Customer search filter.

use super::Customer;
use serde::{Deserialize, Serialize};

/// Fields the customer search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerField {
    Name,
    Email,
    Mobile,
    City,
    Pin,
}

impl CustomerField {
    /// Every searchable field, in display order.
    pub const ALL: [CustomerField; 5] = [
        CustomerField::Name,
        CustomerField::Email,
        CustomerField::Mobile,
        CustomerField::City,
        CustomerField::Pin,
    ];
}

impl Customer {
    /// Case-insensitive substring match of `term` against any searchable field.
    ///
    /// A blank term matches every customer.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        CustomerField::ALL
            .iter()
            .any(|f| self.field(*f).to_lowercase().contains(&needle))
    }
}

/// Keep the customers matching `term`, preserving order.
pub fn filter_customers<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    customers.iter().filter(|c| c.matches(term)).collect()
}
