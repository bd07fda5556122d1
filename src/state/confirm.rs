// Confirmation capability
// Asked before destructive operations; the UI supplies the answer

/// Something that can approve or reject a destructive action
pub trait Confirm {
    /// Return true to let the action proceed
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A decision already collected from the user, e.g. by a modal dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Granted,
    Declined,
}

impl Confirm for Confirmation {
    fn confirm(&mut self, _prompt: &str) -> bool {
        matches!(self, Confirmation::Granted)
    }
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Prompt shown before deleting a student
pub fn delete_prompt(name: &str) -> String {
    format!("Are you sure you want to delete {}?", name)
}
