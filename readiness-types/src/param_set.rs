use std::collections::BTreeMap;

/// A flat set of raw string parameters, as persisted.
///
/// Setting an empty value removes the parameter, so an empty string and an
/// absent parameter are never distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    params: BTreeMap<String, String>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter; an empty value removes it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if value.is_empty() {
            self.params.remove(&name);
        } else {
            self.params.insert(name, value);
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.params.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Iterate in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.set(name, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_removes() {
        let mut params = ParamSet::new().with("slo_exists", "1");
        params.set("slo_exists", "");
        assert!(params.is_empty());
    }

    #[test]
    fn collect_skips_empty_values() {
        let params: ParamSet = [("a", "1"), ("b", "")].into_iter().collect();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("a"), Some("1"));
    }
}
