use std::collections::HashMap;

/// Translation lookup keyed by `Namespace.ENTITY` identifiers.
///
/// Keys are matched case-insensitively; unknown keys fall back to the
/// default text supplied at the call site.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    entries: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    pub fn new(entries: HashMap<String, HashMap<String, String>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(namespace, values)| {
                let values = values
                    .into_iter()
                    .map(|(entity, text)| (entity.to_lowercase(), text))
                    .collect();
                (namespace.to_lowercase(), values)
            })
            .collect();
        Self { entries }
    }

    pub fn t(&self, key: &str, default: &str) -> String {
        key.split_once('.')
            .and_then(|(namespace, entity)| {
                self.entries
                    .get(&namespace.to_lowercase())?
                    .get(&entity.to_lowercase())
            })
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translations() -> Translations {
        let mut newsletter = HashMap::new();
        newsletter.insert("SubscribeTo".to_string(), "Abonnieren".to_string());
        let mut entries = HashMap::new();
        entries.insert("Newsletter".to_string(), newsletter);
        Translations::new(entries)
    }

    #[test]
    fn known_keys_are_translated_case_insensitively() {
        let t = translations();
        assert_eq!("Abonnieren", t.t("Newsletter.SubscribeTo", "Subscribe to"));
        assert_eq!("Abonnieren", t.t("newsletter.SUBSCRIBETO", "Subscribe to"));
    }

    #[test]
    fn unknown_keys_use_the_default() {
        let t = translations();
        assert_eq!("No", t.t("Newsletter.No", "No"));
        assert_eq!("Plain", t.t("NoNamespace", "Plain"));
    }
}
