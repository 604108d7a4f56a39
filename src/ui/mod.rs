//! User interface module.
//!
//! Provides the addons screen widgets and the shared input and hint
//! components they are built from.

pub mod addons_view;
pub mod key_hint_bar;
pub mod text_input;

pub use addons_view::{AddonsScreen, AddonsWidget};
pub use key_hint_bar::{KeyHint, KeyHintBar, KeyHintStyle};
pub use text_input::TextInput;
