// Active view selection
// Declares which network action, if any, each view triggers when activated

/// The four mutually exclusive console views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActiveView {
    /// All students, fetched on activation
    #[default]
    List,
    /// New-student form
    Add,
    /// Search by name or id
    Search,
    /// Server-computed statistics, fetched on activation
    Analytics,
}

/// Side effect to run when a view becomes active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    LoadStudents,
    LoadAnalytics,
}

impl ActiveView {
    /// Every view, in tab order
    pub const ALL: [ActiveView; 4] = [
        ActiveView::List,
        ActiveView::Add,
        ActiveView::Search,
        ActiveView::Analytics,
    ];

    /// What activating this view should fetch
    pub fn on_activate(self) -> Option<ViewAction> {
        match self {
            ActiveView::List => Some(ViewAction::LoadStudents),
            ActiveView::Analytics => Some(ViewAction::LoadAnalytics),
            ActiveView::Add | ActiveView::Search => None,
        }
    }

    /// Tab label
    pub fn title(self) -> &'static str {
        match self {
            ActiveView::List => "View Students",
            ActiveView::Add => "Add Student",
            ActiveView::Search => "Search",
            ActiveView::Analytics => "Analytics",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_mapping() {
        assert_eq!(ActiveView::List.on_activate(), Some(ViewAction::LoadStudents));
        assert_eq!(
            ActiveView::Analytics.on_activate(),
            Some(ViewAction::LoadAnalytics)
        );
        assert_eq!(ActiveView::Add.on_activate(), None);
        assert_eq!(ActiveView::Search.on_activate(), None);
    }

    #[test]
    fn test_default_view_is_list() {
        assert_eq!(ActiveView::default(), ActiveView::List);
    }
}
