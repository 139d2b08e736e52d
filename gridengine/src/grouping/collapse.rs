use std::collections::BTreeSet;

use log::debug;

/// Group keys currently drawn collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseSet {
    keys: BTreeSet<String>,
}

impl CollapseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `key`. The empty key never names a group and is
    /// ignored. Returns true if the set changed.
    pub fn toggle(&mut self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        if !self.keys.remove(key) {
            self.keys.insert(key.to_string());
            debug!("Collapsed group '{}'", key);
        } else {
            debug!("Expanded group '{}'", key);
        }
        true
    }

    /// Remove every key in `keys`. Returns how many were present.
    pub fn force_expand<I, S>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let removed = keys
            .into_iter()
            .filter(|key| self.keys.remove(key.as_ref()))
            .count();
        if removed > 0 {
            debug!("Force-expanded {} group(s)", removed);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Keys in sorted order.
    pub fn to_vec(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for CollapseSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter
                .into_iter()
                .map(Into::into)
                .filter(|k: &String| !k.is_empty())
                .collect(),
        }
    }
}
