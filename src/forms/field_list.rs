use serde::Serialize;

use super::{FormField, Tab, TabSet};

/// Ordered collection of form fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldList(Vec<FormField>);

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: FormField) {
        self.0.push(field);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormField> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the top-level fields, in order
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().filter_map(FormField::name).collect()
    }

    /// Add a tab to the named tab set, creating the tab set when missing
    pub fn add_tab(&mut self, tab_set: &str, tab: Tab) {
        for field in self.0.iter_mut() {
            if let FormField::TabSet(set) = field {
                if set.name == tab_set {
                    set.tabs.push(tab);
                    return;
                }
            }
        }
        self.0.push(FormField::TabSet(TabSet {
            name: tab_set.to_string(),
            tabs: vec![tab],
        }));
    }

    /// Look up a tab by its `TabSet.Tab` path
    pub fn tab(&self, path: &str) -> Option<&Tab> {
        let (set_name, tab_name) = path.split_once('.')?;
        self.0.iter().find_map(|field| match field {
            FormField::TabSet(set) if set.name == set_name => {
                set.tabs.iter().find(|tab| tab.name == tab_name)
            }
            _ => None,
        })
    }

    /// All fields carrying a value, depth first through composites and tabs
    pub fn data_fields(&self) -> Vec<&FormField> {
        let mut fields = Vec::new();
        collect_data_fields(self, &mut fields);
        fields
    }

    /// Find a data field by name anywhere in the tree
    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.data_fields()
            .into_iter()
            .find(|field| field.name() == Some(name))
    }
}

fn collect_data_fields<'a>(list: &'a FieldList, into: &mut Vec<&'a FormField>) {
    for field in list.iter() {
        match field {
            FormField::Composite(composite) => collect_data_fields(&composite.children, into),
            FormField::TabSet(set) => {
                for tab in &set.tabs {
                    collect_data_fields(&tab.fields, into);
                }
            }
            field if field.is_data_field() => into.push(field),
            _ => {}
        }
    }
}

impl FromIterator<FormField> for FieldList {
    fn from_iter<I: IntoIterator<Item = FormField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a FormField;
    type IntoIter = std::slice::Iter<'a, FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
