//! Header access capability.
//!
//! The authenticator never sees a concrete request type. Hosts hand it
//! anything implementing [`HeaderLookup`]; implementations are provided for
//! axum's `HeaderMap` and for plain string maps.

use axum::http::HeaderMap;
use std::collections::HashMap;

/// Values recorded for a header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValues<'a> {
    One(&'a str),
    Many(Vec<&'a str>),
}

impl<'a> HeaderValues<'a> {
    /// First value, if any. Only this one is considered for authentication.
    pub fn first(&self) -> Option<&'a str> {
        match self {
            HeaderValues::One(value) => Some(value),
            HeaderValues::Many(values) => values.first().copied(),
        }
    }
}

/// Case-insensitive header lookup.
///
/// `Sync` so a borrowed lookup can be held across await points in handlers.
pub trait HeaderLookup: Sync {
    /// Values for `name`, matched case-insensitively. `None` when absent.
    fn lookup(&self, name: &str) -> Option<HeaderValues<'_>>;
}

impl HeaderLookup for HeaderMap {
    fn lookup(&self, name: &str) -> Option<HeaderValues<'_>> {
        // Values stop at the first non-UTF-8 one; an unreadable first value
        // yields no values at all.
        let values: Vec<&str> = self
            .get_all(name.to_ascii_lowercase().as_str())
            .iter()
            .map_while(|value| value.to_str().ok())
            .collect();

        match values.len() {
            0 => None,
            1 => values.first().copied().map(HeaderValues::One),
            _ => Some(HeaderValues::Many(values)),
        }
    }
}

impl HeaderLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<HeaderValues<'_>> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| HeaderValues::One(value.as_str()))
    }
}

impl HeaderLookup for HashMap<String, Vec<String>> {
    fn lookup(&self, name: &str) -> Option<HeaderValues<'_>> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| HeaderValues::Many(values.iter().map(String::as_str).collect()))
    }
}
