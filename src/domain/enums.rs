/// Top-level view shown in the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Pomodoro,
    Tasks,
    Notes,
    Expenses,
    Timetable,
}

impl Tab {
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Pomodoro => "Pomodoro",
            Tab::Tasks => "Tasks",
            Tab::Notes => "Notes",
            Tab::Expenses => "Expenses",
            Tab::Timetable => "Timetable",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[
            Tab::Pomodoro,
            Tab::Tasks,
            Tab::Notes,
            Tab::Expenses,
            Tab::Timetable,
        ]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Tab {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// An input form is open
    Form,
    /// Pomodoro settings modal
    Settings,
    /// Waiting for y/n on a delete
    ConfirmDelete,
    /// Typing into the notes search box
    Search,
}

/// Sub-view of the Expenses tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseView {
    Tracker,
    Budget,
    Analytics,
}

impl ExpenseView {
    pub fn name(&self) -> &'static str {
        match self {
            ExpenseView::Tracker => "Tracker",
            ExpenseView::Budget => "Budget",
            ExpenseView::Analytics => "Analytics",
        }
    }

    pub fn next(&self) -> ExpenseView {
        match self {
            ExpenseView::Tracker => ExpenseView::Budget,
            ExpenseView::Budget => ExpenseView::Analytics,
            ExpenseView::Analytics => ExpenseView::Tracker,
        }
    }
}
