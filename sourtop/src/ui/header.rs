//! Top header with hostname, uptime, CPU temperature and clock.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::frame::{Frame, UNAVAILABLE};
use crate::ui::theme::TITLE;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, frame: &Frame) {
    let host = frame.hostname.as_deref().unwrap_or(UNAVAILABLE);
    let uptime = frame.uptime.as_deref().unwrap_or(UNAVAILABLE);
    let temp = frame
        .cpu_temp_c
        .map(|t| format!("CPU Temp: {t:.1}°C"))
        .unwrap_or_else(|| "CPU Temp: N/A".into());

    let title = Line::from(vec![
        Span::styled(
            "sourtop",
            Style::default()
                .fg(TITLE)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
        Span::raw(format!(
            " — {host} | Uptime: {uptime} | {temp} | {}",
            frame.captured_at.format("%H:%M:%S")
        )),
    ]);

    let second = match &frame.notice {
        Some(n) => Line::from(Span::styled(n.clone(), Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(
            "Press 'q' or Ctrl+C to exit.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    f.render_widget(Paragraph::new(vec![title, second]), area);
}
