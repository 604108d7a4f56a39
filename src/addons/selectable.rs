//! Select inputs for the addons toolbar.
//!
//! Each input lists options that lead to a catalog route when chosen.

use super::types::{AddonsModel, ResourceRequest};
use crate::route;

/// A single option of a select input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Display label.
    pub label: String,
    /// Request the option loads.
    pub value: ResourceRequest,
}

impl SelectOption {
    /// Returns the hash the option navigates to.
    #[must_use]
    pub fn target_hash(&self) -> String {
        route::catalog_hash(&self.value)
    }
}

/// A filter control on the addons toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectInput {
    /// Title shown when nothing is selected.
    pub title: &'static str,
    /// Available options.
    pub options: Vec<SelectOption>,
    /// Indices of the selected options.
    pub selected: Vec<usize>,
}

impl SelectInput {
    /// Returns the label to render in the collapsed control.
    #[must_use]
    pub fn label(&self) -> &str {
        self.selected
            .first()
            .and_then(|&i| self.options.get(i))
            .map_or(self.title, |o| o.label.as_str())
    }

    /// Returns the index of the first selected option.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.first().copied()
    }

    /// Returns the hash to navigate to when option `index` is chosen.
    #[must_use]
    pub fn on_select(&self, index: usize) -> Option<String> {
        self.options.get(index).map(SelectOption::target_hash)
    }
}

/// Builds the catalog and type select inputs for a model.
#[must_use]
pub fn selectable_inputs(model: &AddonsModel) -> Vec<SelectInput> {
    let catalogs = &model.selectable.catalogs;
    let catalog_input = SelectInput {
        title: "Select catalog",
        options: catalogs
            .iter()
            .map(|c| SelectOption {
                label: c.name.clone(),
                value: c.request.clone(),
            })
            .collect(),
        selected: catalogs
            .iter()
            .enumerate()
            .filter(|(_, c)| c.selected)
            .map(|(i, _)| i)
            .collect(),
    };

    let types = &model.selectable.types;
    let type_input = SelectInput {
        title: "Select type",
        options: types
            .iter()
            .map(|t| SelectOption {
                label: t.name.clone(),
                value: t.request.clone(),
            })
            .collect(),
        selected: types
            .iter()
            .enumerate()
            .filter(|(_, t)| t.selected)
            .map(|(i, _)| i)
            .collect(),
    };

    vec![catalog_input, type_input]
}
