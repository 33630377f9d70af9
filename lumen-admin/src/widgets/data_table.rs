//! Ratatui rendering of a [`TableView`].

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::table::{PageItem, RowControl, SortDirection, TableRow, TableView};
use crate::theme::{action_style_color, AdminTheme};

pub struct DataTableWidget<'a> {
    pub title: &'a str,
    pub view: &'a TableView,
    pub selected: Option<usize>,
    pub theme: &'a AdminTheme,
}

impl<'a> DataTableWidget<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut constraints = Vec::new();
        if self.view.search.is_some() {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(3));
        if self.view.pagination.is_some() {
            constraints.push(Constraint::Length(1));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut next = 0;
        if let Some(term) = &self.view.search {
            self.render_search(f, chunks[next], term);
            next += 1;
        }
        self.render_table(f, chunks[next]);
        next += 1;
        if self.view.pagination.is_some() {
            f.render_widget(Paragraph::new(self.pagination_line()), chunks[next]);
        }
    }

    fn render_search(&self, f: &mut Frame<'_>, area: Rect, term: &str) {
        let text = if term.is_empty() {
            Span::styled("type / to search", Style::default().fg(self.theme.text_dim))
        } else {
            Span::styled(term.to_string(), Style::default().fg(self.theme.text))
        };
        let paragraph = Paragraph::new(Line::from(text))
            .block(Block::default().title("Search").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_table(&self, f: &mut Frame<'_>, area: Rect) {
        let mut header_cells: Vec<Cell> = self
            .view
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let indicator = match header.sorted {
                    Some(SortDirection::Asc) => " ▲",
                    Some(SortDirection::Desc) => " ▼",
                    None if header.sortable => " ·",
                    None => "",
                };
                let label = if header.sortable {
                    format!("{} {}{}", i + 1, header.label, indicator)
                } else {
                    header.label.clone()
                };
                Cell::from(label)
            })
            .collect();
        if self.view.has_actions {
            header_cells.push(Cell::from("Actions"));
        }
        let header = Row::new(header_cells).style(
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self.view.rows.iter().map(|row| self.row(row)).collect();

        let columns = self.view.headers.len() + usize::from(self.view.has_actions);
        let widths = vec![Constraint::Ratio(1, columns.max(1) as u32); columns.max(1)];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(self.title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border_focus)),
            )
            .highlight_style(Style::default().bg(self.theme.bg_highlight))
            .highlight_symbol("> ");

        let mut state = TableState::default();
        if !self.view.is_empty() {
            state.select(self.selected);
        }
        f.render_stateful_widget(table, area, &mut state);

        // The empty-state message spans the full table width.
        if let Some(TableRow::Empty { message, .. }) = self.view.rows.first() {
            let line = Rect {
                x: area.x + 1,
                y: area.y + 2,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            if line.y < area.y + area.height.saturating_sub(1) {
                let paragraph = Paragraph::new(message.clone())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(self.theme.text_dim));
                f.render_widget(paragraph, line);
            }
        }
    }

    fn row(&self, row: &TableRow) -> Row<'static> {
        match row {
            TableRow::Empty { .. } => Row::new(vec![Cell::from("")]),
            TableRow::Record {
                cells, controls, ..
            } => {
                let mut out: Vec<Cell> = cells.iter().map(|c| Cell::from(c.clone())).collect();
                if self.view.has_actions {
                    out.push(Cell::from(self.controls_line(controls)));
                }
                Row::new(out).style(Style::default().fg(self.theme.text))
            }
        }
    }

    fn controls_line(&self, controls: &[RowControl]) -> Line<'static> {
        let spans: Vec<Span> = controls
            .iter()
            .map(|control| {
                let style = match control {
                    RowControl::Delete { busy: true } => Style::default()
                        .fg(self.theme.text_dim)
                        .add_modifier(Modifier::ITALIC),
                    RowControl::Delete { busy: false } => Style::default().fg(self.theme.error),
                    RowControl::Custom { style, .. } => {
                        Style::default().fg(action_style_color(style.as_deref(), self.theme))
                    }
                    _ => Style::default().fg(self.theme.accent),
                };
                Span::styled(format!("[{}] ", control.label()), style)
            })
            .collect();
        Line::from(spans)
    }

    fn pagination_line(&self) -> Line<'static> {
        let Some(pagination) = &self.view.pagination else {
            return Line::default();
        };
        let enabled = Style::default().fg(self.theme.text);
        let disabled = Style::default().fg(self.theme.text_dim);

        let mut spans = vec![Span::styled(
            "‹ Prev ",
            if pagination.has_prev { enabled } else { disabled },
        )];
        for item in &pagination.pages {
            match item {
                PageItem::Page(n) if *n == pagination.current_page => spans.push(Span::styled(
                    format!("[{}] ", n),
                    Style::default()
                        .fg(self.theme.primary)
                        .add_modifier(Modifier::BOLD),
                )),
                PageItem::Page(n) => spans.push(Span::styled(format!("{} ", n), enabled)),
                PageItem::Ellipsis => spans.push(Span::styled("… ", disabled)),
            }
        }
        spans.push(Span::styled(
            "Next ›",
            if pagination.has_next { enabled } else { disabled },
        ));
        spans.push(Span::styled(
            format!("  {} items", pagination.total_items),
            disabled,
        ));
        Line::from(spans)
    }
}
