use tui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{config::Palette, timer::bar_width};

use super::{FACE_HEIGHT, MIN_HEIGHT, MIN_WIDTH};

const NAME_ROW: u16 = 1;
const BAR_ROW: u16 = 2;
const TIME_ROW: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fill {
    Partial(f64),
    Full,
}

/// The timer face: a bordered box with the name, the progress bar and a row
/// of times.
pub struct TimerWidget<'a> {
    name: &'a str,
    left: &'a str,
    right: &'a str,
    fill: Fill,
    palette: &'a Palette,
}

impl<'a> TimerWidget<'a> {
    pub fn running(
        name: &'a str,
        elapsed: &'a str,
        end_time: &'a str,
        fraction: f64,
        palette: &'a Palette,
    ) -> Self {
        Self {
            name,
            left: elapsed,
            right: end_time,
            fill: Fill::Partial(fraction),
            palette,
        }
    }

    pub fn finished(name: &'a str, end_time: &'a str, palette: &'a Palette) -> Self {
        Self {
            name,
            left: end_time,
            right: end_time,
            fill: Fill::Full,
            palette,
        }
    }
}

impl Widget for TimerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return;
        }

        let face = Rect::new(area.x, area.y, area.width, area.height.min(FACE_HEIGHT));
        Block::default()
            .borders(Borders::ALL)
            .style(self.palette.text)
            .border_style(self.palette.text)
            .render(face, buf);

        let inner = face.width - 2;
        let has_row = |row: u16| row < face.height - 1;

        if has_row(NAME_ROW) {
            let name_width = self.name.width();
            let left_mid = i64::from(face.width / 2) - (name_width / 2) as i64;
            if left_mid > 0 && left_mid as usize + name_width < usize::from(face.width) {
                buf.set_string(
                    face.x + left_mid as u16,
                    face.y + NAME_ROW,
                    self.name,
                    self.palette.text,
                );
            }
        }

        if has_row(BAR_ROW) {
            let (filled, filled_style) = match self.fill {
                Fill::Partial(fraction) => (bar_width(fraction, inner), self.palette.bar_filled),
                Fill::Full => (inner, self.palette.done),
            };
            let y = face.y + BAR_ROW;
            blank(buf, face.x + 1, y, filled, filled_style);
            blank(buf, face.x + 1 + filled, y, inner - filled, self.palette.bar_empty);
        }

        if has_row(TIME_ROW) {
            let y = face.y + TIME_ROW;
            buf.set_stringn(face.x + 1, y, self.left, usize::from(inner), self.palette.text);

            let left_end = 1 + self.left.width();
            let right_width = self.right.width();
            if let Some(x) = usize::from(face.width - 1).checked_sub(right_width) {
                if x >= left_end {
                    buf.set_string(face.x + x as u16, y, self.right, self.palette.text);
                }
            }
        }
    }
}

fn blank(buf: &mut Buffer, x: u16, y: u16, width: u16, style: Style) {
    if width > 0 {
        buf.set_string(x, y, " ".repeat(usize::from(width)), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui::style::Color;

    fn render(widget: TimerWidget, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol.clone())
            .collect()
    }

    #[test]
    fn running_face_layout() {
        let palette = Palette::default();
        let buf = render(
            TimerWidget::running("Tea", "00:02.50", "00:05.00", 0.5, &palette),
            20,
            5,
        );

        assert_eq!(row(&buf, 0), format!("┌{}┐", "─".repeat(18)));
        assert_eq!(row(&buf, 1), format!("│{}Tea{}│", " ".repeat(8), " ".repeat(7)));
        assert_eq!(row(&buf, 2), format!("│{}│", " ".repeat(18)));
        assert_eq!(row(&buf, 3), "│00:02.50  00:05.00│");
        assert_eq!(row(&buf, 4), format!("└{}┘", "─".repeat(18)));
    }

    #[test]
    fn bar_splits_into_filled_and_empty_segments() {
        let palette = Palette::default();
        let buf = render(
            TimerWidget::running("Tea", "00:02.50", "00:05.00", 0.5, &palette),
            20,
            5,
        );

        for x in 1..=9 {
            assert_eq!(buf.get(x, 2).bg, palette.bar_filled.bg.unwrap(), "cell {}", x);
        }
        for x in 10..=18 {
            assert_eq!(buf.get(x, 2).bg, palette.bar_empty.bg.unwrap(), "cell {}", x);
        }
        assert_eq!(buf.get(0, 2).bg, palette.text.bg.unwrap());
        assert_eq!(buf.get(19, 2).bg, palette.text.bg.unwrap());
    }

    #[test]
    fn empty_bar_at_start() {
        let palette = Palette::default();
        let buf = render(
            TimerWidget::running("Tea", "00.00", "00:05.00", 0.0, &palette),
            12,
            5,
        );
        for x in 1..=10 {
            assert_eq!(buf.get(x, 2).bg, palette.bar_empty.bg.unwrap());
        }
    }

    #[test]
    fn finished_face_fills_the_bar_and_repeats_end_time() {
        let palette = Palette::default();
        let buf = render(TimerWidget::finished("Tea", "00:05.00", &palette), 20, 5);

        assert_eq!(row(&buf, 3), "│00:05.00  00:05.00│");
        for x in 1..=18 {
            assert_eq!(buf.get(x, 2).bg, Color::Rgb(255, 255, 255));
        }
    }

    #[test]
    fn right_time_is_skipped_when_it_would_overlap() {
        let palette = Palette::default();
        let buf = render(
            TimerWidget::running("Tea", "00:02.50", "00:05.00", 0.5, &palette),
            12,
            5,
        );
        assert_eq!(row(&buf, 3), "│00:02.50  │");
    }

    #[test]
    fn right_time_touching_left_time_is_drawn() {
        let palette = Palette::default();
        let buf = render(TimerWidget::finished("T", "00:05.00", &palette), 18, 5);
        assert_eq!(row(&buf, 3), "│00:05.0000:05.00│");
    }

    #[test]
    fn long_names_are_left_out() {
        let palette = Palette::default();
        let buf = render(
            TimerWidget::running("A rather long timer name", "00.00", "01:00.00", 0.0, &palette),
            10,
            5,
        );
        assert_eq!(row(&buf, 1), format!("│{}│", " ".repeat(8)));
    }

    #[test]
    fn names_touching_the_border_are_left_out() {
        let palette = Palette::default();
        let buf = render(
            TimerWidget::running("ABCDEFGHIJKLMNOPQRS", "00.00", "01:00.00", 0.0, &palette),
            20,
            5,
        );
        assert_eq!(row(&buf, 1), format!("│{}│", " ".repeat(18)));

        let buf = render(
            TimerWidget::running("ABCDEFGHIJKLMNOPQR", "00.00", "01:00.00", 0.0, &palette),
            20,
            5,
        );
        assert_eq!(row(&buf, 1), "│ABCDEFGHIJKLMNOPQR│");
    }

    #[test]
    fn tiny_areas_are_left_untouched() {
        let palette = Palette::default();
        for (width, height) in [(3, 10), (80, 3), (0, 0)] {
            let area = Rect::new(0, 0, width, height);
            let buf = render(
                TimerWidget::running("Tea", "00.00", "00:05.00", 0.2, &palette),
                width,
                height,
            );
            assert_eq!(buf, Buffer::empty(area));
        }
    }

    #[test]
    fn four_rows_drop_the_time_row() {
        let palette = Palette::default();
        let buf = render(
            TimerWidget::running("Tea", "00:01.00", "00:05.00", 0.2, &palette),
            12,
            4,
        );
        assert_eq!(row(&buf, 3), format!("└{}┘", "─".repeat(10)));
        assert_eq!(buf.get(1, 2).bg, palette.bar_filled.bg.unwrap());
        assert_eq!(buf.get(3, 2).bg, palette.bar_empty.bg.unwrap());
    }

    #[test]
    fn face_only_uses_the_top_rows() {
        let palette = Palette::default();
        let buf = render(
            TimerWidget::running("Tea", "00.00", "00:05.00", 0.0, &palette),
            12,
            8,
        );
        assert_eq!(row(&buf, 5), " ".repeat(12));
        assert_eq!(buf.get(0, 6).bg, Color::Reset);
    }
}
