use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub tabs_area: Rect,
    pub keybindings_area: Rect,
    pub content_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top: tab bar (3 rows) and keybindings (1 row)
/// - Middle: active tab content
/// - Bottom: status line (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Tab content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    MainLayout {
        tabs_area: chunks[0],
        keybindings_area: chunks[1],
        content_area: chunks[2],
        status_area: chunks[3],
    }
}

/// Split a pane into a main list (left) and a side panel (right)
pub fn split_main_side(area: Rect, main_percent: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(main_percent),
            Constraint::Percentage(100 - main_percent.min(100)),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Create a centered modal area `height` rows tall
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
