//! Banner and version selection control model

use crate::config::{BANNER_ID, BannerLabels, SELECT_ID};
use crate::switcher::catalog::VersionCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Version token submitted on change
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// The version dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
    pub id: String,
    pub options: Vec<SelectOption>,
    pub disabled: bool,
}

impl SelectControl {
    /// Placeholder shown while the catalog is being fetched
    pub fn loading(labels: &BannerLabels) -> Self {
        Self {
            id: SELECT_ID.to_string(),
            options: vec![SelectOption {
                value: String::new(),
                label: labels.loading.clone(),
                selected: false,
            }],
            disabled: false,
        }
    }

    /// Replace all options with one per catalog entry, in catalog order.
    ///
    /// Only the entry equal to `current` is selected; with no match nothing is.
    pub fn populate(&mut self, catalog: &VersionCatalog, current: Option<&str>) {
        self.options.clear();
        self.disabled = false;
        self.options.extend(catalog.iter().map(|descriptor| SelectOption {
            value: descriptor.version.clone(),
            label: descriptor.name.clone(),
            selected: current == Some(descriptor.version.as_str()),
        }));
    }

    /// Degrade to a single disabled informational entry
    pub fn mark_unavailable(&mut self, labels: &BannerLabels) {
        self.options = vec![SelectOption {
            value: String::new(),
            label: labels.unavailable.clone(),
            selected: true,
        }];
        self.disabled = true;
    }

    /// Value the control displays: the selected option, else the first one
    pub fn selected_value(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.selected)
            .or_else(|| self.options.first())
            .map(|o| o.value.as_str())
    }

    pub fn selected_count(&self) -> usize {
        self.options.iter().filter(|o| o.selected).count()
    }
}

/// The persistent strip injected into the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: String,
    pub label: String,
    pub select: SelectControl,
}

impl Banner {
    pub fn new(labels: &BannerLabels) -> Self {
        Self {
            id: BANNER_ID.to_string(),
            label: labels.label.clone(),
            select: SelectControl::loading(labels),
        }
    }
}
