//! Centered yes/no confirmation box.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub struct ConfirmModal<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub style: Style,
}

impl<'a> ConfirmModal<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let popup = centered(area, 50, 7);
        let text = vec![
            Line::from(self.message),
            Line::from(""),
            Line::from("[y] confirm   [n] cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(self.style)
            .block(Block::default().title(self.title).borders(Borders::ALL));
        f.render_widget(Clear, popup);
        f.render_widget(paragraph, popup);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
