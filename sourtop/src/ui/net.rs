//! Network upload/download readouts, auto-scaled.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Row, Table},
};

use crate::frame::{Frame, UNAVAILABLE};
use crate::ui::theme::TITLE;

pub fn draw_net(f: &mut ratatui::Frame<'_>, area: Rect, frame: &Frame) {
    let show = |r: Option<crate::frame::ScaledRate>| {
        r.map(|r| r.to_string()).unwrap_or_else(|| UNAVAILABLE.into())
    };
    let header = Row::new(vec!["Upload", "Download"]).style(
        Style::default()
            .fg(TITLE)
            .add_modifier(Modifier::BOLD),
    );
    let row = Row::new(vec![show(frame.upload), show(frame.download)]);
    let table = Table::new(
        vec![row],
        [Constraint::Percentage(50), Constraint::Percentage(50)],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Network"));
    f.render_widget(table, area);
}
