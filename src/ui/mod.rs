// UI module
// egui rendering of the console state

pub mod components;
pub mod dialogs;
pub mod layout;

pub use dialogs::Dialogs;
pub use layout::render_app_layout;
