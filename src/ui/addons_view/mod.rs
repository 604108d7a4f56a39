//! Addons screen UI module.
//!
//! Provides widgets and state management for the addons screen.
//!
//! # Components
//!
//! - `AddonsScreen`: Local UI state (search, modals, focus)
//! - `AddonsWidget`: Main rendering widget
//! - `types`: Enums and display types

mod state;
mod types;
mod widget;
mod widget_render;

pub use state::{ADD_ADDON_PLACEHOLDER, AddonsScreen, SEARCH_PLACEHOLDER};
pub use types::{
    AddAddonFocus, AddonCard, AddonsFocus, CARD_HEIGHT, MAX_DISPLAY_ADDONS, ViewState,
};
pub use widget::{AddonsWidget, BG_COLOR};
pub use widget_render::truncate_to_width;
