use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};

use flexscroll_core::Axis;

use crate::app::{cell_points, App};
use crate::theme::Theme;

/// Where the content sits relative to the strip, in cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripLayout {
    pub axis: Axis,
    /// Cells per item along the axis
    pub item_extent: u16,
    /// Position of the first item's leading edge, relative to the strip
    pub content_start: f64,
}

impl StripLayout {
    /// Layout for a component offset
    ///
    /// Content is centered in the viewport, then moved by `offset`; all
    /// inputs are points.
    pub fn new(
        axis: Axis,
        item_extent: u16,
        half_extent: f64,
        viewport_extent: f64,
        offset: f64,
    ) -> Self {
        let start_points = viewport_extent / 2.0 - half_extent + offset;
        Self {
            axis,
            item_extent,
            content_start: start_points / cell_points(axis),
        }
    }

    /// Item index under cell `cell` and the cell's position inside it
    pub fn item_at(&self, cell: u16, count: usize) -> Option<(usize, u16)> {
        let extent = f64::from(self.item_extent.max(1));
        let position = f64::from(cell) - self.content_start;
        if position < 0.0 {
            return None;
        }
        let index = (position / extent).floor() as usize;
        if index >= count {
            return None;
        }
        let within = (position - index as f64 * extent).floor() as u16;
        Some((index, within))
    }
}

/// The scrolled strip of numbered items
pub struct StripWidget;

impl StripWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let Some(half_extent) = app.scroll.half_extent() else {
            return;
        };
        let layout = StripLayout::new(
            app.axis(),
            app.config.demo.item_extent,
            half_extent,
            app.scroll.viewport_extent(),
            app.presented,
        );
        let items = app.loader.snapshot();
        Self::draw(frame.buffer_mut(), area, &items, &layout, &app.theme);
    }

    pub fn draw(buf: &mut Buffer, area: Rect, items: &[i64], layout: &StripLayout, theme: &Theme) {
        let (cells, across) = match layout.axis {
            Axis::Vertical => (area.height, area.width),
            Axis::Horizontal => (area.width, area.height),
        };
        let label_at = layout.item_extent / 2;

        for cell in 0..cells {
            let Some((index, within)) = layout.item_at(cell, items.len()) else {
                continue;
            };
            let value = items[index];
            let bg = if value.rem_euclid(2) == 0 {
                theme.cell
            } else {
                theme.cell_alt
            };

            for cross in 0..across {
                let (x, y) = position(layout.axis, area, cell, cross);
                if let Some(c) = buf.cell_mut((x, y)) {
                    c.set_bg(bg);
                }
            }

            let style = Style::default()
                .fg(theme.bg0)
                .bg(bg)
                .add_modifier(Modifier::BOLD);
            let label = value.to_string();
            match layout.axis {
                Axis::Vertical if within == label_at => {
                    let x = area.x + across.saturating_sub(label.len() as u16) / 2;
                    buf.set_stringn(x, area.y + cell, &label, usize::from(across), style);
                }
                Axis::Horizontal if within == 0 => {
                    let room = usize::from(cells - cell).min(usize::from(layout.item_extent));
                    buf.set_stringn(area.x + cell, area.y + across / 2, &label, room, style);
                }
                _ => {}
            }
        }
    }
}

fn position(axis: Axis, area: Rect, cell: u16, cross: u16) -> (u16, u16) {
    match axis {
        Axis::Vertical => (area.x + cross, area.y + cell),
        Axis::Horizontal => (area.x + cell, area.y + cross),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_edge_layout_begins_at_zero() {
        // half 750pt, viewport 600pt, start-edge offset 450pt
        let layout = StripLayout::new(Axis::Vertical, 5, 750.0, 600.0, 450.0);
        assert_eq!(layout.content_start, 0.0);
        assert_eq!(layout.item_at(0, 15), Some((0, 0)));
        assert_eq!(layout.item_at(7, 15), Some((1, 2)));
    }

    #[test]
    fn test_item_at_outside_content() {
        let layout = StripLayout {
            axis: Axis::Vertical,
            item_extent: 5,
            content_start: 3.0,
        };
        assert_eq!(layout.item_at(2, 4), None);
        assert_eq!(layout.item_at(3, 4), Some((0, 0)));
        assert_eq!(layout.item_at(23, 4), None);
    }

    #[test]
    fn test_draw_vertical_labels() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 6, 10);
        let mut buf = Buffer::empty(area);
        let layout = StripLayout {
            axis: Axis::Vertical,
            item_extent: 5,
            content_start: 0.0,
        };
        StripWidget::draw(&mut buf, area, &[7, 8], &layout, &theme);

        assert_eq!(buf[(0, 0)].bg, theme.cell_alt);
        assert_eq!(buf[(5, 5)].bg, theme.cell);
        // Label on the middle row of each item
        assert_eq!(buf[(2, 2)].symbol(), "7");
        assert_eq!(buf[(2, 7)].symbol(), "8");
    }

    #[test]
    fn test_draw_horizontal_clips_to_area() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);
        let layout = StripLayout {
            axis: Axis::Horizontal,
            item_extent: 5,
            content_start: -2.0,
        };
        StripWidget::draw(&mut buf, area, &[-10, 11], &layout, &theme);

        // First item is cut, second starts at column 3
        assert_eq!(buf[(0, 1)].bg, theme.cell);
        assert_eq!(buf[(3, 1)].symbol(), "1");
        assert_eq!(buf[(4, 1)].symbol(), "1");
        assert_eq!(buf[(7, 0)].bg, theme.cell_alt);
    }
}
