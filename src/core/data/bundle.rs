use std::collections::HashSet;

/// One declared message in a `$trs` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub key: String,
    /// Message text, empty when the value is not a plain string literal.
    pub message: String,
}

/// The `$trs` mapping of one component or mixin, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationBundle {
    entries: Vec<BundleEntry>,
}

impl TranslationBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `key`. A repeated key keeps its first position and takes the new message.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        let key = key.into();
        let message = message.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.message = message,
            None => self.entries.push(BundleEntry { key, message }),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn message(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.message.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every entry of `other` that is not declared here yet.
    pub fn merge(&mut self, other: &TranslationBundle) {
        for entry in &other.entries {
            if !self.contains(&entry.key) {
                self.entries.push(entry.clone());
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bundle = TranslationBundle::new();
        for (key, message) in iter {
            bundle.insert(key, message);
        }
        bundle
    }
}

/// Keys a unit may reference: its own bundle unioned with every resolved mixin bundle.
///
/// Built fresh for each unit and dropped when the unit is done.
#[derive(Debug, Clone, Default)]
pub struct EffectiveKeySet {
    keys: HashSet<String>,
}

impl EffectiveKeySet {
    pub fn new<'a>(
        local: &TranslationBundle,
        composed: impl IntoIterator<Item = &'a TranslationBundle>,
    ) -> Self {
        let mut keys: HashSet<String> = local.keys().map(str::to_string).collect();
        for bundle in composed {
            keys.extend(bundle.keys().map(str::to_string));
        }
        Self { keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_insert_keeps_declaration_order() {
        let mut bundle = TranslationBundle::new();
        bundle.insert("b", "B");
        bundle.insert("a", "A");
        bundle.insert("b", "B2");

        assert_eq!(bundle.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(bundle.message("b"), Some("B2"));
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn test_merge_does_not_override_local_messages() {
        let mut local: TranslationBundle = [("title", "Local")].into_iter().collect();
        let mixin: TranslationBundle = [("title", "Mixin"), ("extra", "Extra")]
            .into_iter()
            .collect();

        local.merge(&mixin);

        assert_eq!(local.message("title"), Some("Local"));
        assert!(local.contains("extra"));
    }

    #[test]
    fn test_effective_key_set_unions_composed_bundles() {
        let local: TranslationBundle = [("helloWorld", "Hello world")].into_iter().collect();
        let coach: TranslationBundle = [("someCoachStringLabel", "Label")].into_iter().collect();

        let keys = EffectiveKeySet::new(&local, [&coach]);

        assert!(keys.contains("helloWorld"));
        assert!(keys.contains("someCoachStringLabel"));
        assert!(!keys.contains("notDefined"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_effective_key_set_empty() {
        let keys = EffectiveKeySet::new(&TranslationBundle::new(), []);
        assert!(keys.is_empty());
    }
}
