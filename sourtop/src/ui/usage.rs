//! CPU / memory / disk usage bars, colored by threshold band.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::frame::{Frame, UsageBar};
use crate::ui::theme::{level_color, CPU_LABEL, DIMMED, DISK_LABEL, MEM_LABEL};

pub fn draw_usage(f: &mut ratatui::Frame<'_>, area: Rect, frame: &Frame) {
    let lines = vec![
        bar_line(&frame.cpu, CPU_LABEL),
        bar_line(&frame.memory, MEM_LABEL),
        bar_line(&frame.disk, DISK_LABEL),
    ];
    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Usage"));
    f.render_widget(p, area);
}

fn bar_line(bar: &UsageBar, label_color: ratatui::style::Color) -> Line<'static> {
    let label = Span::styled(
        format!("{:<7}", bar.label),
        Style::default()
            .fg(label_color)
            .add_modifier(Modifier::BOLD),
    );
    match (&bar.reading, bar.cells()) {
        (Some(r), Some(cells)) => Line::from(vec![
            label,
            Span::styled(cells, Style::default().fg(level_color(r.level))),
            Span::raw(format!(" {}", bar.readout())),
        ]),
        _ => Line::from(vec![
            label,
            Span::styled(bar.readout(), Style::default().fg(DIMMED)),
        ]),
    }
}
