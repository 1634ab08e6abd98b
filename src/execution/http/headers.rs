//! HTTP Headers Utility
//!
//! Header merging for client defaults and per-call overrides.
//!
//! Merging never edits a source in place: every merge builds a fresh
//! `HeaderMap`, so a client's default headers are never changed by a call.

use crate::error::{ClientError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// A single header override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOverride {
    /// Replace every earlier value with this one.
    Set(String),
    /// Replace every earlier value with all of these, kept in order.
    ///
    /// `reqwest` sends each value as its own header line. Transports that can
    /// only carry one value per name keep the last one.
    SetAll(Vec<String>),
    /// Delete the header, including a value inherited from the defaults.
    Remove,
}

/// Ordered list of header overrides. Names are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOverrides {
    entries: Vec<(String, HeaderOverride)>,
}

impl HeaderOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, HeaderOverride::Set(value.into()));
        self
    }

    pub fn set_all<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push(name, HeaderOverride::SetAll(values));
        self
    }

    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.push(name, HeaderOverride::Remove);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: HeaderOverride) {
        self.entries.push((name.into(), value));
    }

    /// Append `other` after `self`, so its entries win.
    pub fn extend(&mut self, other: &HeaderOverrides) {
        self.entries.extend(other.entries.iter().cloned());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderOverride)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderOverrides
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut overrides = HeaderOverrides::new();
        for (k, v) in iter {
            overrides.push(k, HeaderOverride::Set(v.into()));
        }
        overrides
    }
}

/// One input to [`merge_headers`].
#[derive(Debug, Clone, Copy)]
pub enum HeaderSource<'a> {
    /// A header collection. Each name it contains replaces earlier values.
    Map(&'a HeaderMap),
    Overrides(&'a HeaderOverrides),
}

impl<'a> From<&'a HeaderMap> for HeaderSource<'a> {
    fn from(map: &'a HeaderMap) -> Self {
        HeaderSource::Map(map)
    }
}

impl<'a> From<&'a HeaderOverrides> for HeaderSource<'a> {
    fn from(overrides: &'a HeaderOverrides) -> Self {
        HeaderSource::Overrides(overrides)
    }
}

/// Merge header sources in order into a new collection.
///
/// Absent sources (`None`) are skipped. Later sources win per header name.
///
/// # Example
/// ```rust,ignore
/// let defaults = /* HeaderMap with content-type */;
/// let call = HeaderOverrides::new().remove("Content-Type").set("X-Trace", "1");
/// let merged = merge_headers([Some((&defaults).into()), Some(HeaderSource::Overrides(&call))])?;
/// ```
pub fn merge_headers<'a, I>(sources: I) -> Result<HeaderMap>
where
    I: IntoIterator<Item = Option<HeaderSource<'a>>>,
{
    let mut merged = HeaderMap::new();
    for source in sources.into_iter().flatten() {
        match source {
            HeaderSource::Map(map) => {
                for name in map.keys() {
                    merged.remove(name);
                    for value in map.get_all(name) {
                        merged.append(name.clone(), value.clone());
                    }
                }
            }
            HeaderSource::Overrides(overrides) => apply_overrides(&mut merged, overrides)?,
        }
    }
    Ok(merged)
}

/// Apply overrides to a mutable HeaderMap (mutable version of [`merge_headers`]).
pub fn apply_overrides(base: &mut HeaderMap, overrides: &HeaderOverrides) -> Result<()> {
    for (name, value) in overrides.iter() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::InvalidHeader(format!("Invalid header name '{name}': {e}")))?;
        match value {
            HeaderOverride::Set(v) => {
                base.insert(name, header_value(v)?);
            }
            HeaderOverride::SetAll(values) => {
                base.remove(&name);
                for v in values {
                    base.append(name.clone(), header_value(v)?);
                }
            }
            HeaderOverride::Remove => {
                base.remove(&name);
            }
        }
    }
    Ok(())
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ClientError::InvalidHeader(format!("Invalid header value '{value}': {e}")))
}
