//! Well-known collection aliases.

use std::collections::BTreeMap;

use crate::store::SecretStore;
use tracing::debug;

/// The aliases every lookup tries, in display order.
pub const KNOWN_ALIASES: [&str; 3] = ["default", "login", "session"];

/// Alias bindings, both alias → path and path → aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    forward: BTreeMap<String, String>,
    reverse: BTreeMap<String, Vec<String>>,
}

impl AliasMap {
    /// Look up each known alias once.
    ///
    /// An alias that is unbound, or that the service refuses to resolve,
    /// is simply left out.
    pub fn resolve(store: &dyn SecretStore) -> Self {
        let mut map = Self::default();
        for alias in KNOWN_ALIASES {
            match store.alias_target(alias) {
                Ok(Some(path)) => map.bind(alias, &path),
                Ok(None) => debug!(alias, "alias is not bound"),
                Err(e) => debug!(alias, error = %e, "alias lookup failed"),
            }
        }
        map
    }

    pub fn bind(&mut self, alias: &str, path: &str) {
        self.forward.insert(alias.to_string(), path.to_string());
        let aliases = self.reverse.entry(path.to_string()).or_default();
        if !aliases.iter().any(|a| a == alias) {
            aliases.push(alias.to_string());
            aliases.sort();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Alias → collection path, sorted by alias.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward.iter().map(|(a, p)| (a.as_str(), p.as_str()))
    }

    /// Aliases bound to a collection path.
    pub fn aliases_of(&self, path: &str) -> &[String] {
        self.reverse.get(path).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_lookup_collects_shared_paths() {
        let mut map = AliasMap::default();
        map.bind("login", "/c/login");
        map.bind("default", "/c/login");
        map.bind("session", "/c/session");

        assert_eq!(map.aliases_of("/c/login"), ["default", "login"]);
        assert_eq!(map.aliases_of("/c/session"), ["session"]);
        assert!(map.aliases_of("/c/other").is_empty());
        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            vec![
                ("default", "/c/login"),
                ("login", "/c/login"),
                ("session", "/c/session")
            ]
        );
    }

    #[test]
    fn test_rebinding_does_not_duplicate() {
        let mut map = AliasMap::default();
        map.bind("default", "/c/a");
        map.bind("default", "/c/a");
        assert_eq!(map.aliases_of("/c/a"), ["default"]);
    }
}
