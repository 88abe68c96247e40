//! UI module root: lays out the dashboard and delegates each panel.

pub mod disks;
pub mod header;
pub mod net;
pub mod processes;
pub mod theme;
pub mod usage;

use ratatui::layout::{Constraint, Direction, Layout};

use crate::frame::Frame;

pub fn draw(f: &mut ratatui::Frame<'_>, frame: &Frame) {
    let area = f.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header + hint/notice
            Constraint::Length(5), // cpu / memory / disk bars
            Constraint::Length(4), // network
            Constraint::Length(disks::height(frame)), // filesystems
            Constraint::Min(5),    // top processes
        ])
        .split(area);

    header::draw_header(f, rows[0], frame);
    usage::draw_usage(f, rows[1], frame);
    net::draw_net(f, rows[2], frame);
    disks::draw_disks(f, rows[3], frame);
    processes::draw_top_processes(f, rows[4], frame);
}
