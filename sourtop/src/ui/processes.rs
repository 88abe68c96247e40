//! Top processes table with per-cell coloring.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::frame::{Frame, UNAVAILABLE};
use crate::ui::theme::TABLE_HEADER;

const COLS: [Constraint; 5] = [
    Constraint::Length(3),  // #
    Constraint::Length(8),  // PID
    Constraint::Min(20),    // Name
    Constraint::Length(8),  // CPU %
    Constraint::Length(10), // Memory %
];

pub fn draw_top_processes(f: &mut ratatui::Frame<'_>, area: Rect, frame: &Frame) {
    let title = match frame.process_count {
        Some(total) => format!("Top {} Processes ({total} total)", frame.top_n),
        None => format!("Top {} Processes ({UNAVAILABLE})", frame.top_n),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let peak_cpu = frame
        .processes
        .iter()
        .map(|p| p.cpu_percent)
        .fold(0.0_f32, f32::max);

    let rows = frame.processes.iter().enumerate().map(|(i, p)| {
        let cpu_fg = match p.cpu_percent {
            x if x < 25.0 => Color::Green,
            x if x < 60.0 => Color::Yellow,
            _ => Color::Red,
        };
        let emphasis = if peak_cpu > 0.0 && (p.cpu_percent - peak_cpu).abs() < f32::EPSILON {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let mem = p
            .mem_percent
            .map(|m| format!("{m:.1}"))
            .unwrap_or_else(|| "-".into());
        Row::new(vec![
            Cell::from((i + 1).to_string()).style(Style::default().fg(Color::Cyan)),
            Cell::from(p.pid.to_string()).style(Style::default().fg(Color::DarkGray)),
            Cell::from(p.name.clone()),
            Cell::from(format!("{:>5.1}", p.cpu_percent)).style(Style::default().fg(cpu_fg)),
            Cell::from(mem),
        ])
        .style(emphasis)
    });

    let header = Row::new(vec!["#", "PID", "Name", "CPU %", "Memory %"]).style(
        Style::default()
            .fg(TABLE_HEADER)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, COLS.to_vec())
        .header(header)
        .column_spacing(1)
        .block(block);
    f.render_widget(table, area);
}
