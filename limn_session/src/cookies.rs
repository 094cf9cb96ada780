// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Environment map and cookie reconciliation.
//!
//! The session keeps a small string-to-string environment that mirrors
//! browser cookies. [`reconcile_cookies`] computes the cookie headers that
//! bring the browser in line with the environment; it must run before any
//! body output, since cookie headers cannot follow content.

use tracing::debug;

/// The reserved session-identifier cookie. Reconciliation never touches it.
pub const SESSION_COOKIE: &str = "LIMNSESSIONID";

/// Cookies added by reconciliation live effectively forever.
const PERSISTENT_MAX_AGE: u64 = 60 * 60 * 24 * 365 * 10;

/// The session-local environment property map, insertion ordered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    entries: Vec<(String, String)>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an entry, replacing any existing value under the same name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            *existing = value;
        } else {
            self.entries.push((name.to_owned(), value));
        }
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Removes an entry by name. Returns `true` if it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| n != name);
        self.entries.len() != before
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// One outgoing `Set-Cookie` instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetCookie {
    /// The cookie name.
    pub name: String,
    /// The cookie value; empty when expiring.
    pub value: String,
    /// Max age in seconds; zero expires the cookie.
    pub max_age: u64,
}

/// Reconciles the environment against the cookies the request carried.
///
/// Request cookies with no matching environment entry are expired, except
/// the reserved [`SESSION_COOKIE`]. Environment entries with no matching
/// cookie (or a stale value) are written with a very long max age.
#[must_use]
pub fn reconcile_cookies(
    environment: &Environment,
    request_cookies: &[(String, String)],
) -> Vec<SetCookie> {
    let mut out = Vec::new();
    for (name, _) in request_cookies {
        if name == SESSION_COOKIE || environment.get(name).is_some() {
            continue;
        }
        debug!(cookie = %name, "expiring cookie with no environment entry");
        out.push(SetCookie {
            name: name.clone(),
            value: String::new(),
            max_age: 0,
        });
    }
    for (name, value) in environment.iter() {
        let sent = request_cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str());
        if sent == Some(value) {
            continue;
        }
        out.push(SetCookie {
            name: name.to_owned(),
            value: value.to_owned(),
            max_age: PERSISTENT_MAX_AGE,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| ((*n).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn unmatched_cookie_is_expired() {
        let env = Environment::new();
        let cookies = reconcile_cookies(&env, &jar(&[("stale", "x")]));
        assert_eq!(
            cookies,
            [SetCookie {
                name: "stale".into(),
                value: String::new(),
                max_age: 0,
            }]
        );
    }

    #[test]
    fn session_cookie_is_never_touched() {
        let env = Environment::new();
        let cookies = reconcile_cookies(&env, &jar(&[(SESSION_COOKIE, "abc123")]));
        assert!(cookies.is_empty());
    }

    #[test]
    fn missing_entry_becomes_persistent_cookie() {
        let mut env = Environment::new();
        env.set("theme", "dark");
        let cookies = reconcile_cookies(&env, &[]);
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "theme");
        assert_eq!(cookies[0].value, "dark");
        assert!(cookies[0].max_age > 0);
    }

    #[test]
    fn matching_cookie_is_left_alone_and_stale_value_rewritten() {
        let mut env = Environment::new();
        env.set("theme", "dark");
        env.set("lang", "en");
        let cookies = reconcile_cookies(&env, &jar(&[("theme", "dark"), ("lang", "fr")]));
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "lang");
        assert_eq!(cookies[0].value, "en");
    }

    #[test]
    fn environment_set_replaces() {
        let mut env = Environment::new();
        env.set("a", "1");
        env.set("a", "2");
        assert_eq!(env.get("a"), Some("2"));
        assert!(env.remove("a"));
        assert!(!env.remove("a"));
    }
}
