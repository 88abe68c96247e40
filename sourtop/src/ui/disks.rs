//! Per-filesystem table: device, mount, used/free/total and a colored use %.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::frame::{human, Frame};
use crate::ui::theme::{level_color, DIMMED, TABLE_HEADER};

/// Rows shown before the table is cut off.
const MAX_ROWS: usize = 5;

/// Borders + header + one line per disk (at least one, for the empty state).
pub fn height(frame: &Frame) -> u16 {
    frame.disks.len().clamp(1, MAX_ROWS) as u16 + 3
}

pub fn draw_disks(f: &mut ratatui::Frame<'_>, area: Rect, frame: &Frame) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Disks ({})", frame.disks.len()));

    let header = Row::new(vec!["Device", "Mount", "Used", "Free", "Total", "Use %"]).style(
        Style::default()
            .fg(TABLE_HEADER)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = if frame.disks.is_empty() {
        vec![Row::new(vec![Cell::from("no filesystems").style(Style::default().fg(DIMMED))])]
    } else {
        frame
            .disks
            .iter()
            .take(MAX_ROWS)
            .map(|d| {
                Row::new(vec![
                    Cell::from(d.device.clone()).style(Style::default().fg(Color::Cyan)),
                    Cell::from(d.mount.clone()).style(Style::default().fg(Color::Magenta)),
                    Cell::from(human(d.used)),
                    Cell::from(human(d.free)),
                    Cell::from(human(d.total)),
                    Cell::from(format!("{:>3.0}%", d.percent))
                        .style(Style::default().fg(level_color(d.level))),
                ])
            })
            .collect()
    };

    let widths = [
        Constraint::Min(16),
        Constraint::Min(12),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}
