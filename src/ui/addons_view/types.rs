//! Addons screen types and enums.

use crate::addons::{Addon, AddonsModel, ResourceContent};

/// Maximum number of addon cards visible at once.
pub const MAX_DISPLAY_ADDONS: usize = 8;

/// Lines used by a single addon card.
pub const CARD_HEIGHT: u16 = 2;

/// What the content area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No catalogs configured and nothing selected.
    NoAddons,
    /// Catalogs exist but none is selected.
    NoSelect,
    /// The selected catalog failed to load.
    LoadFailed,
    /// The selected catalog is loading.
    Loading,
    /// The selected catalog is ready.
    List,
}

impl ViewState {
    /// Derives the view state from a model.
    #[must_use]
    pub fn of(model: &AddonsModel) -> Self {
        match &model.catalog_resource {
            None if model.selectable.catalogs.is_empty() => Self::NoAddons,
            None => Self::NoSelect,
            Some(resource) => match resource.content {
                ResourceContent::Err(_) => Self::LoadFailed,
                ResourceContent::Loading => Self::Loading,
                ResourceContent::Ready(_) => Self::List,
            },
        }
    }

    /// Returns the message shown instead of the list, if any.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::NoAddons => Some("No addons"),
            Self::NoSelect => Some("No select"),
            Self::LoadFailed => Some("Addons could not be loaded"),
            Self::Loading => Some("Loading"),
            Self::List => None,
        }
    }
}

/// Focused region of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddonsFocus {
    /// Addon list.
    #[default]
    List,
    /// Search bar.
    Search,
    /// Select input at the given index.
    Select(usize),
}

impl AddonsFocus {
    /// Moves to the next region: list, search, then each select input.
    #[must_use]
    pub fn next(self, select_count: usize) -> Self {
        match self {
            Self::List => Self::Search,
            Self::Search if select_count > 0 => Self::Select(0),
            Self::Search => Self::List,
            Self::Select(i) if i + 1 < select_count => Self::Select(i + 1),
            Self::Select(_) => Self::List,
        }
    }

    /// Moves to the previous region.
    #[must_use]
    pub fn prev(self, select_count: usize) -> Self {
        match self {
            Self::List if select_count > 0 => Self::Select(select_count - 1),
            Self::List => Self::Search,
            Self::Search => Self::List,
            Self::Select(0) => Self::Search,
            Self::Select(i) => Self::Select(i - 1),
        }
    }
}

/// Focused control inside the add-addon modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddAddonFocus {
    /// URL text field.
    #[default]
    Url,
    /// "Cancel" button.
    Cancel,
    /// "Add" button.
    Add,
}

impl AddAddonFocus {
    /// Cycles field, cancel, add.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Url => Self::Cancel,
            Self::Cancel => Self::Add,
            Self::Add => Self::Url,
        }
    }

    /// Cycles backwards.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Url => Self::Add,
            Self::Cancel => Self::Url,
            Self::Add => Self::Cancel,
        }
    }
}

/// Display helpers for an addon card.
#[derive(Debug, Clone, Copy)]
pub struct AddonCard<'a> {
    /// The addon.
    pub addon: &'a Addon,
}

impl<'a> AddonCard<'a> {
    /// Creates a card for an addon.
    #[must_use]
    pub fn new(addon: &'a Addon) -> Self {
        Self { addon }
    }

    /// Label of the toggle action.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.addon.installed {
            "Uninstall"
        } else {
            "Install"
        }
    }

    /// Installed indicator.
    #[must_use]
    pub fn status_indicator(&self) -> &'static str {
        if self.addon.installed { "[+]" } else { "[ ]" }
    }

    /// Version label ("v1.2.0"), empty if unknown.
    #[must_use]
    pub fn version_label(&self) -> String {
        let version = self.addon.manifest.version.trim();
        if version.is_empty() {
            String::new()
        } else {
            format!("v{}", version)
        }
    }

    /// Comma-separated content types.
    #[must_use]
    pub fn types_label(&self) -> String {
        self.addon.manifest.types.join(", ")
    }

    /// Description line, or a fallback when absent.
    #[must_use]
    pub fn description(&self) -> &'a str {
        self.addon.description().unwrap_or("No description")
    }
}
