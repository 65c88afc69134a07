//! Admin customer directory.

mod filter;

pub use filter::{filter_customers, CustomerField};

use crate::ids::CustomerId;
use serde::{Deserialize, Serialize};

/// A row in the admin customer list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    /// Customer identifier.
    pub id: CustomerId,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Mobile number.
    pub mobile: String,
    /// City.
    pub city: String,
    /// Postal PIN code.
    pub pin: String,
}

impl Customer {
    /// Create a customer row with only a name; other fields empty.
    pub fn named(id: impl Into<CustomerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Value of one searchable field.
    pub fn field(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::Name => &self.name,
            CustomerField::Email => &self.email,
            CustomerField::Mobile => &self.mobile,
            CustomerField::City => &self.city,
            CustomerField::Pin => &self.pin,
        }
    }
}
