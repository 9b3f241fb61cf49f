use serde::Serialize;
use std::fmt;

use super::{Field, FieldValue};

/// One field that differs between the committed state and a fresh refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateChange {
    pub field: Field,
    /// The new value, already committed
    pub value: FieldValue,
}

impl StateChange {
    pub fn new(field: Field, value: FieldValue) -> Self {
        Self { field, value }
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.field, self.value)
    }
}
