mod endpoints;
mod setting;

pub use endpoints::*;
pub use setting::*;

/// Outcome of looking a property up by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Property {
    /// A known property; its value may still be unset.
    Found(Option<String>),
    Unknown,
}

impl Property {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Property::Unknown)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Property::Found(value) => value.as_deref(),
            Property::Unknown => None,
        }
    }
}
