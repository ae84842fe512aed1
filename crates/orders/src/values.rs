//! Value objects embedded in a taxi order.
//!
//! All fields are optional: an absent first name is how an unassigned driver
//! reads, an absent destination is how a freshly created order reads.

use serde::{Deserialize, Serialize};

use taxi_core::value_object;

/// Join the present parts with a single space.
fn join_present<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts.into_iter().flatten().collect::<Vec<_>>().join(" ")
}

/// Person name (client or driver).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Name {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

value_object!(Name { first_name, last_name });

impl Name {
    pub fn new(
        first_name: Option<impl Into<String>>,
        last_name: Option<impl Into<String>>,
    ) -> Self {
        Self {
            first_name: first_name.map(Into::into),
            last_name: last_name.map(Into::into),
        }
    }

    pub const fn empty() -> Self {
        Self {
            first_name: None,
            last_name: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }

    /// `"First Last"`, skipping absent parts.
    pub fn formatted(&self) -> String {
        join_present([self.first_name.as_deref(), self.last_name.as_deref()])
    }
}

/// Street address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub building: Option<String>,
}

value_object!(Address { street, building });

impl Address {
    pub fn new(street: Option<impl Into<String>>, building: Option<impl Into<String>>) -> Self {
        Self {
            street: street.map(Into::into),
            building: building.map(Into::into),
        }
    }

    pub const fn empty() -> Self {
        Self {
            street: None,
            building: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.building.is_none()
    }

    /// `"Street Building"`, skipping absent parts.
    pub fn formatted(&self) -> String {
        join_present([self.street.as_deref(), self.building.as_deref()])
    }
}

/// Car descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Car {
    pub model: Option<String>,
    pub plate_number: Option<String>,
    pub color: Option<String>,
}

value_object!(Car { model, plate_number, color });

impl Car {
    pub fn new(
        model: Option<impl Into<String>>,
        plate_number: Option<impl Into<String>>,
        color: Option<impl Into<String>>,
    ) -> Self {
        Self {
            model: model.map(Into::into),
            plate_number: plate_number.map(Into::into),
            color: color.map(Into::into),
        }
    }

    pub const fn empty() -> Self {
        Self {
            model: None,
            plate_number: None,
            color: None,
        }
    }
}
