use crate::app::AppState;
use crate::domain::Tab;
use crate::ui::styles::{border_style, default_style, selected_style, title_style};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Tabs},
    Frame,
};

/// Render the top tab bar with the running timer on the right
pub fn render_tab_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::raw(format!("{} {}", i + 1, tab.name())))
        .collect();

    // Keep the countdown visible from every tab
    let timer = if app.pomodoro.is_active() {
        format!(" {} {} ", app.pomodoro.mode().name(), app.pomodoro.formatted_time())
    } else {
        String::from(" ")
    };

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(default_style())
        .highlight_style(selected_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" UniVerse ", title_style()))
                .title(Title::from(Span::styled(timer, title_style())).alignment(Alignment::Right)),
        );

    f.render_widget(tabs, area);
}
