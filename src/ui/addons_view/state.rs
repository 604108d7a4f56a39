//! Addons screen state.
//!
//! Local, ephemeral UI state of the addons screen: search text, the
//! add-addon modal, the share target, focus and list navigation. The
//! model itself is owned by an `AddonsSource` and passed in per call.

use std::cell::Cell;

use super::types::{AddAddonFocus, AddonsFocus, MAX_DISPLAY_ADDONS, ViewState};
use crate::addons::{Addon, AddonsModel, ResourceContent, SelectInput};
use crate::route;
use crate::ui::text_input::TextInput;

/// Placeholder of the search bar.
pub const SEARCH_PLACEHOLDER: &str = "Search addons...";

/// Placeholder of the add-addon URL field.
pub const ADD_ADDON_PLACEHOLDER: &str = "Paste url...";

/// State manager for the addons screen.
#[derive(Debug, Clone)]
pub struct AddonsScreen {
    // Search state
    /// Free-text search.
    search: TextInput,

    // Add-addon modal
    /// Whether the add-addon modal is open.
    add_addon_open: bool,
    /// URL field of the add-addon modal.
    add_addon_url: TextInput,
    /// Focused control in the add-addon modal.
    add_addon_focus: AddAddonFocus,

    // Share modal
    /// Transport URL being shared, if the share modal is open.
    shared_transport_url: Option<String>,

    // Navigation state
    /// Focused region.
    focus: AddonsFocus,
    /// Highlighted index within the filtered list.
    selected_index: usize,
    /// Scroll offset for long lists.
    scroll_offset: Cell<usize>,
    /// Cards that fit the content area, updated on every draw.
    page_size: Cell<usize>,
    /// Highlighted option of the focused select input.
    select_cursor: usize,
}

impl Default for AddonsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl AddonsScreen {
    /// Creates a new screen state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search: TextInput::new(SEARCH_PLACEHOLDER),
            add_addon_open: false,
            add_addon_url: TextInput::new(ADD_ADDON_PLACEHOLDER),
            add_addon_focus: AddAddonFocus::default(),
            shared_transport_url: None,
            focus: AddonsFocus::default(),
            selected_index: 0,
            scroll_offset: Cell::new(0),
            page_size: Cell::new(MAX_DISPLAY_ADDONS),
            select_cursor: 0,
        }
    }

    /// Resets all local state after the route parameters changed.
    ///
    /// Clears the search, closes the add-addon modal and the share modal.
    pub fn reset(&mut self) {
        self.search.clear();
        self.close_add_addon();
        self.clear_shared();
        self.focus = AddonsFocus::List;
        self.selected_index = 0;
        self.scroll_offset.set(0);
        self.select_cursor = 0;
    }

    // =========================================================================
    // Render State
    // =========================================================================

    /// Returns what the content area shows for `model`.
    #[must_use]
    pub fn view_state(&self, model: &AddonsModel) -> ViewState {
        ViewState::of(model)
    }

    /// Returns the addons matching the search, in catalog order.
    #[must_use]
    pub fn filtered_addons<'m>(&self, model: &'m AddonsModel) -> Vec<&'m Addon> {
        let Some(ResourceContent::Ready(addons)) = model.catalog_resource.as_ref().map(|r| &r.content)
        else {
            return Vec::new();
        };

        let query = self.search.value();
        addons.iter().filter(|addon| addon.matches(query)).collect()
    }

    /// Returns visible addons with scroll applied.
    #[must_use]
    pub fn visible_addons<'m>(&self, model: &'m AddonsModel) -> Vec<(usize, &'m Addon)> {
        self.filtered_addons(model)
            .into_iter()
            .enumerate()
            .skip(self.scroll_offset.get())
            .take(self.page_size.get())
            .collect()
    }

    // =========================================================================
    // List Navigation
    // =========================================================================

    /// Returns the highlighted index.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Returns the scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset.get()
    }

    /// Returns how many cards are shown at once.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Records how many cards fit the content area and scrolls so the
    /// highlight stays among them. Called by the widget on each draw.
    pub fn fit_to_rows(&self, cards: usize) {
        self.page_size.set(cards.clamp(1, MAX_DISPLAY_ADDONS));
        self.update_scroll();
    }

    /// Pulls the highlight back inside the filtered list after the model
    /// changed under it.
    pub fn clamp_selection(&mut self, model: &AddonsModel) {
        let len = self.filtered_addons(model).len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
        let max_offset = len.saturating_sub(self.page_size.get());
        if self.scroll_offset.get() > max_offset {
            self.scroll_offset.set(max_offset);
        }
        self.update_scroll();
    }

    /// Returns true if the given index is highlighted.
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        index == self.selected_index
    }

    /// Moves the highlight up.
    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.update_scroll();
        }
    }

    /// Moves the highlight down.
    pub fn select_next(&mut self, model: &AddonsModel) {
        let max_index = self.filtered_addons(model).len().saturating_sub(1);
        if self.selected_index < max_index {
            self.selected_index += 1;
            self.update_scroll();
        }
    }

    /// Moves the highlight to the first addon.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.scroll_offset.set(0);
    }

    /// Moves the highlight to the last addon.
    pub fn select_last(&mut self, model: &AddonsModel) {
        let len = self.filtered_addons(model).len();
        if len > 0 {
            self.selected_index = len - 1;
            self.update_scroll();
        }
    }

    /// Updates scroll offset to keep the highlight visible.
    fn update_scroll(&self) {
        let page = self.page_size.get();
        let offset = self.scroll_offset.get();
        if self.selected_index < offset {
            self.scroll_offset.set(self.selected_index);
        } else if self.selected_index >= offset + page {
            self.scroll_offset.set(self.selected_index + 1 - page);
        }
    }

    /// Returns the highlighted addon.
    #[must_use]
    pub fn selected_addon<'m>(&self, model: &'m AddonsModel) -> Option<&'m Addon> {
        self.filtered_addons(model).get(self.selected_index).copied()
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Returns the search text.
    #[must_use]
    pub fn search(&self) -> &str {
        self.search.value()
    }

    /// Returns the search input.
    #[must_use]
    pub fn search_input(&self) -> &TextInput {
        &self.search
    }

    /// Replaces the search text and resets the highlight.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search.set_value(query);
        self.select_first();
    }

    /// Appends a character to the search and resets the highlight.
    pub fn search_insert_char(&mut self, c: char) {
        self.search.insert_char(c);
        self.select_first();
    }

    /// Removes the character before the cursor and resets the highlight.
    pub fn search_backspace(&mut self) {
        self.search.backspace();
        self.select_first();
    }

    /// Clears the search and resets the highlight.
    pub fn search_clear(&mut self) {
        self.search.clear();
        self.select_first();
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Returns the focused region.
    #[must_use]
    pub fn focus(&self) -> AddonsFocus {
        self.focus
    }

    /// Focuses a region.
    pub fn set_focus(&mut self, focus: AddonsFocus) {
        self.focus = focus;
        self.select_cursor = 0;
    }

    /// Focuses a region and points the option highlight at the selected option.
    pub fn focus_with_inputs(&mut self, focus: AddonsFocus, inputs: &[SelectInput]) {
        self.set_focus(focus);
        if let AddonsFocus::Select(i) = focus {
            self.select_cursor = inputs
                .get(i)
                .and_then(SelectInput::selected_index)
                .unwrap_or(0);
        }
    }

    /// Focuses the next region.
    pub fn focus_next(&mut self, inputs: &[SelectInput]) {
        self.focus_with_inputs(self.focus.next(inputs.len()), inputs);
    }

    /// Focuses the previous region.
    pub fn focus_prev(&mut self, inputs: &[SelectInput]) {
        self.focus_with_inputs(self.focus.prev(inputs.len()), inputs);
    }

    // =========================================================================
    // Select Inputs
    // =========================================================================

    /// Returns the highlighted option of the focused select input.
    #[must_use]
    pub fn select_cursor(&self) -> usize {
        self.select_cursor
    }

    /// Moves the option highlight forward, wrapping.
    pub fn select_cursor_next(&mut self, option_count: usize) {
        if option_count > 0 {
            self.select_cursor = (self.select_cursor + 1) % option_count;
        }
    }

    /// Moves the option highlight backward, wrapping.
    pub fn select_cursor_prev(&mut self, option_count: usize) {
        if option_count > 0 {
            self.select_cursor = (self.select_cursor + option_count - 1) % option_count;
        }
    }

    /// Returns the hash for the highlighted option of the focused input.
    #[must_use]
    pub fn apply_select(&self, inputs: &[SelectInput]) -> Option<String> {
        let AddonsFocus::Select(i) = self.focus else {
            return None;
        };
        inputs.get(i)?.on_select(self.select_cursor)
    }

    // =========================================================================
    // Add-addon Modal
    // =========================================================================

    /// Returns true if the add-addon modal is open.
    #[must_use]
    pub fn is_add_addon_open(&self) -> bool {
        self.add_addon_open
    }

    /// Opens the add-addon modal with an empty field.
    pub fn open_add_addon(&mut self) {
        self.add_addon_open = true;
        self.add_addon_url.clear();
        self.add_addon_focus = AddAddonFocus::Url;
    }

    /// Closes the add-addon modal.
    pub fn close_add_addon(&mut self) {
        self.add_addon_open = false;
        self.add_addon_url.clear();
        self.add_addon_focus = AddAddonFocus::Url;
    }

    /// Returns the URL field.
    #[must_use]
    pub fn add_addon_url(&self) -> &TextInput {
        &self.add_addon_url
    }

    /// Returns the URL field for editing.
    pub fn add_addon_url_mut(&mut self) -> &mut TextInput {
        &mut self.add_addon_url
    }

    /// Returns the focused modal control.
    #[must_use]
    pub fn add_addon_focus(&self) -> AddAddonFocus {
        self.add_addon_focus
    }

    /// Focuses the next modal control.
    pub fn add_addon_focus_next(&mut self) {
        self.add_addon_focus = self.add_addon_focus.next();
    }

    /// Focuses the previous modal control.
    pub fn add_addon_focus_prev(&mut self) {
        self.add_addon_focus = self.add_addon_focus.prev();
    }

    /// Returns the hash to navigate to when the add-addon form is submitted.
    ///
    /// The pasted URL is passed through unvalidated. Returns `None` if the
    /// modal is not open.
    #[must_use]
    pub fn submit_add_addon(&self, model: &AddonsModel) -> Option<String> {
        if !self.add_addon_open {
            return None;
        }
        Some(route::addon_details_hash(
            model.request(),
            self.add_addon_url.value(),
        ))
    }

    // =========================================================================
    // Toggle
    // =========================================================================

    /// Returns the hash that opens install/uninstall for an addon.
    #[must_use]
    pub fn toggle_addon(&self, model: &AddonsModel, transport_url: &str) -> String {
        route::addon_details_hash(model.request(), transport_url)
    }

    /// Returns the toggle hash for the highlighted addon.
    #[must_use]
    pub fn toggle_selected(&self, model: &AddonsModel) -> Option<String> {
        self.selected_addon(model)
            .map(|addon| self.toggle_addon(model, &addon.transport_url))
    }

    // =========================================================================
    // Share Modal
    // =========================================================================

    /// Returns the transport URL being shared.
    #[must_use]
    pub fn shared_transport_url(&self) -> Option<&str> {
        self.shared_transport_url.as_deref()
    }

    /// Opens the share modal for a transport URL.
    pub fn share(&mut self, transport_url: impl Into<String>) {
        self.shared_transport_url = Some(transport_url.into());
    }

    /// Opens the share modal for the highlighted addon.
    pub fn share_selected(&mut self, model: &AddonsModel) {
        if let Some(addon) = self.selected_addon(model) {
            let url = addon.transport_url.clone();
            self.share(url);
        }
    }

    /// Closes the share modal.
    pub fn clear_shared(&mut self) {
        self.shared_transport_url = None;
    }

    /// Returns true if any modal is open.
    #[must_use]
    pub fn has_modal(&self) -> bool {
        self.add_addon_open || self.shared_transport_url.is_some()
    }
}
