// State management module
// Console state container, views, status messages, forms and confirmation

pub mod confirm;
pub mod console;
pub mod form;
pub mod status;
pub mod view;

pub use confirm::{delete_prompt, Confirm, Confirmation};
pub use console::{AnalyticsState, Console, ConsoleEvent, RepaintHook};
pub use form::StudentForm;
pub use status::{Severity, StatusMessage, STATUS_DISPLAY_WINDOW};
pub use view::{ActiveView, ViewAction};
