//! TUI widget modules.

pub mod banner;
pub mod detail_drawer;
pub mod filter_panel;
pub mod gaps_view;
pub mod header;
pub mod keys_overlay;
pub mod landing;
pub mod manual_copy;
pub mod quick_start;
pub mod results_list;
pub mod search_bar;
pub mod status_bar;
pub mod tabs;
pub mod trends_view;

use ratatui::layout::{Constraint, Layout, Rect};

/// A popup of at most `width` x `height` cells, centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(row);
    center
}

/// Group digits with commas, e.g. `18240` -> `18,240`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(608), "608");
        assert_eq!(format_count(18_240), "18,240");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        let popup = centered_rect(20, 4, area);
        assert_eq!((popup.width, popup.height), (20, 4));
        assert_eq!((popup.x, popup.y), (10, 3));
        let big = centered_rect(100, 100, area);
        assert_eq!(big, area);
    }
}
