//! Per-compilation table alias bookkeeping. One `AliasTable` is created per
//! walker, grows monotonically while the query tree is walked, and is handed
//! back to the caller so the row-hydration layer knows which `alias_column`
//! groups belong to which selector.

/// Insertion-ordered map from selector scope key to alias token (`n0`, `n1`,
/// ...). Keys are selector names, or the empty string for the sole implicit
/// selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The alias for `scope_key`, allocating the next sequential token on
    /// first use. The first-ever allocation is always `n0`.
    pub fn alias_for(&mut self, scope_key: &str) -> String {
        if let Some((_, token)) = self.entries.iter().find(|(key, _)| key == scope_key) {
            return token.clone();
        }
        let token = format!("n{}", self.entries.len());
        self.entries.push((scope_key.to_string(), token.clone()));
        token
    }

    /// The scope key that owns `n0`, if any alias was allocated yet.
    pub fn first_scope_key(&self) -> Option<&str> {
        self.entries.first().map(|(key, _)| key.as_str())
    }

    pub fn get(&self, scope_key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == scope_key)
            .map(|(_, token)| token.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `(scope_key, token)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, token)| (key.as_str(), token.as_str()))
    }

    /// Alias tokens in allocation order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, token)| token.as_str())
    }
}
