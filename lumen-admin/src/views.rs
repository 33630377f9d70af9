//! Screen layout for the admin panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::nav::Page;
use crate::state::{App, Modal};
use crate::theme::notification_color;
use crate::widgets::{ConfirmModal, DataTableWidget};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);

    let view = app.page().view();
    DataTableWidget {
        title: app.active_page.title(),
        view: &view,
        selected: Some(app.page().selected()),
        theme: &app.theme,
    }
    .render(f, layout[1]);

    render_footer(f, app, layout[2]);

    if let Some(Modal::ConfirmDelete { key, .. }) = &app.modal {
        let message = format!("Delete {}?", key);
        ConfirmModal {
            title: "Are you sure you want to delete this item?",
            message: &message,
            style: Style::default().fg(app.theme.error),
        }
        .render(f, f.size());
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "LUMEN Admin ",
        Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD),
    )];
    for page in Page::all() {
        let style = if *page == app.active_page {
            Style::default()
                .fg(app.theme.bg)
                .bg(app.theme.primary)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        spans.push(Span::styled(format!(" {} ", page.title()), style));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = if app.search_active {
        "type to filter • Enter/Esc done"
    } else {
        "Tab page • 1-9 sort • ←/→ page • j/k move • / search • d delete • a/b actions • s sync • q quit"
    };
    let status = match app.notifications.last() {
        Some(note) => Line::from(Span::styled(
            format!("[{}] {}", note.level.label(), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        )),
        None => Line::from(""),
    };
    let paragraph = Paragraph::new(vec![
        status,
        Line::from(Span::styled(help, Style::default().fg(app.theme.text_dim))),
    ]);
    f.render_widget(paragraph, area);
}
