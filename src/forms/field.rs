use std::collections::BTreeMap;

use serde::Serialize;

use super::FieldList;

/// A single value/label pair offered by a multi-select control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Storage type of an extra column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtraKind {
    Varchar,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraColumn {
    pub name: String,
    pub kind: ExtraKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckboxSet {
    pub name: String,
    pub title: String,
    pub source: Vec<Choice>,
    pub checked: Vec<String>,
}

/// Multi-select whose rows carry extra per-row attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckboxSetWithExtra {
    pub name: String,
    pub title: String,
    pub source: Vec<Choice>,
    pub checked: Vec<String>,
    pub extra: Vec<ExtraColumn>,
    /// Column name -> row value -> cell value
    pub extra_values: BTreeMap<String, BTreeMap<String, String>>,
    /// Row value -> cells that cannot be edited
    pub disabled_cells: BTreeMap<String, Vec<String>>,
}

impl CheckboxSetWithExtra {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        source: Vec<Choice>,
        checked: Vec<String>,
        extra: Vec<ExtraColumn>,
        extra_values: BTreeMap<String, BTreeMap<String, String>>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            source,
            checked,
            extra,
            extra_values,
            disabled_cells: BTreeMap::new(),
        }
    }

    /// Lock the given cells of a row
    pub fn set_cell_disabled(&mut self, row: &str, cells: &[&str]) {
        let locked = self.disabled_cells.entry(row.to_string()).or_default();
        for cell in cells {
            if !locked.iter().any(|c| c == *cell) {
                locked.push(cell.to_string());
            }
        }
    }

    pub fn is_cell_disabled(&self, row: &str, cell: &str) -> bool {
        self.disabled_cells
            .get(row)
            .map(|cells| cells.iter().any(|c| c == cell))
            .unwrap_or(false)
    }

    pub fn extra_value(&self, column: &str, row: &str) -> Option<&str> {
        self.extra_values
            .get(column)
            .and_then(|values| values.get(row))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeField {
    pub children: FieldList,
    pub extra_classes: Vec<String>,
    pub hidden: bool,
}

impl CompositeField {
    pub fn new(children: Vec<FormField>) -> Self {
        Self {
            children: children.into_iter().collect(),
            extra_classes: Vec::new(),
            hidden: false,
        }
    }

    pub fn add_extra_class(mut self, class: impl Into<String>) -> Self {
        self.extra_classes.push(class.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub name: String,
    pub title: String,
    pub fields: FieldList,
}

impl Tab {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            fields: FieldList::default(),
        }
    }

    pub fn push(&mut self, field: FormField) {
        self.fields.push(field);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSet {
    pub name: String,
    pub tabs: Vec<Tab>,
}

/// A node of an editing or front-end form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormField {
    Header {
        name: String,
        title: String,
    },
    Text {
        name: String,
        title: String,
        value: Option<String>,
    },
    Email {
        name: String,
        title: String,
        value: Option<String>,
    },
    Checkbox {
        name: String,
        title: String,
        value: bool,
    },
    Hidden {
        name: String,
        value: String,
    },
    Literal {
        name: String,
        content: String,
    },
    HtmlEditor {
        name: String,
        title: String,
        value: Option<String>,
    },
    CheckboxSet(CheckboxSet),
    CheckboxSetWithExtra(CheckboxSetWithExtra),
    Composite(CompositeField),
    TabSet(TabSet),
}

impl FormField {
    pub fn text(name: &str, title: &str, value: Option<&str>) -> Self {
        Self::Text {
            name: name.into(),
            title: title.into(),
            value: value.map(String::from),
        }
    }

    pub fn email(name: &str, title: &str) -> Self {
        Self::Email {
            name: name.into(),
            title: title.into(),
            value: None,
        }
    }

    pub fn literal(name: &str, content: impl Into<String>) -> Self {
        Self::Literal {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Field name; composites are anonymous
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Header { name, .. }
            | Self::Text { name, .. }
            | Self::Email { name, .. }
            | Self::Checkbox { name, .. }
            | Self::Hidden { name, .. }
            | Self::Literal { name, .. }
            | Self::HtmlEditor { name, .. } => Some(name.as_str()),
            Self::CheckboxSet(set) => Some(set.name.as_str()),
            Self::CheckboxSetWithExtra(set) => Some(set.name.as_str()),
            Self::TabSet(set) => Some(set.name.as_str()),
            Self::Composite(_) => None,
        }
    }

    /// Human readable title, empty for fields without one
    pub fn title(&self) -> &str {
        match self {
            Self::Header { title, .. }
            | Self::Text { title, .. }
            | Self::Email { title, .. }
            | Self::Checkbox { title, .. }
            | Self::HtmlEditor { title, .. } => title.as_str(),
            Self::CheckboxSet(set) => set.title.as_str(),
            Self::CheckboxSetWithExtra(set) => set.title.as_str(),
            Self::Hidden { .. } | Self::Literal { .. } | Self::Composite(_) | Self::TabSet(_) => "",
        }
    }

    /// Label shown for the field: its title, or its name when untitled
    pub fn label(&self) -> &str {
        match self.title() {
            "" => self.name().unwrap_or_default(),
            title => title,
        }
    }

    /// Whether the field carries a submitted value
    pub fn is_data_field(&self) -> bool {
        !matches!(
            self,
            Self::Header { .. } | Self::Literal { .. } | Self::Composite(_) | Self::TabSet(_)
        )
    }
}
