//! Tagged, attributed records: the serialized form of trade items

use crate::error::{ParleyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// One serialized trade item: an element tag plus string attributes.
///
/// Records are transport-agnostic; offer documents carry them as JSON.
/// Decoding a record is purely structural; domain validity is a
/// separate, explicit check by the consumer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl Record {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Required attribute lookup
    pub fn attr(&self, name: &str) -> Result<&str> {
        self.attrs
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ParleyError::MissingAttribute {
                tag: self.tag.clone(),
                attribute: name.to_string(),
            })
    }

    /// Parse a required attribute into any `FromStr` type
    pub fn parse_attr<T: FromStr>(&self, name: &str) -> Result<T> {
        let raw = self.attr(name)?;
        raw.parse().map_err(|_| ParleyError::MalformedAttribute {
            attribute: name.to_string(),
            value: raw.to_string(),
        })
    }
}
