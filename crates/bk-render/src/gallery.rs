use bk_core::carousel::Carousel;
use bk_core::theme::ThemeStyle;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::paint::{lcg, put, rgb, rgb_dim, rgb_mix};

/// Horizontal gap between tiles, in cells.
const TILE_GAP: i32 = 2;

/// Draw the scrolling gallery strip.
///
/// The carousel state lives in virtual pixels; rendering resolves the
/// tile width against a virtual viewport of `area.width * px_per_cell`
/// pixels, then converts both tile width and offset to cells. Tiles
/// partially off-screen are clipped cell by cell; a zero-area strip or an
/// empty image list draws nothing.
pub fn draw_strip(
    buf: &mut Buffer,
    area: Rect,
    carousel: &Carousel,
    style: &ThemeStyle,
    px_per_cell: f32,
) {
    if area.width == 0 || area.height < 3 || carousel.images().is_empty() {
        return;
    }

    let viewport_px = f32::from(area.width) * px_per_cell;
    let item_px = carousel.item_width_px(viewport_px);
    let item_cells = ((item_px / px_per_cell).round() as i32).max(6);
    let offset_cells = carousel.offset_px() / px_per_cell;

    let count = carousel.images().len();
    for (idx, label) in carousel.render_list().iter().enumerate() {
        let x0 = (idx as f32 * item_cells as f32 + offset_cells).round() as i32;
        if x0 + item_cells <= 0 {
            continue;
        }
        if x0 >= i32::from(area.width) {
            break;
        }
        draw_tile(
            buf,
            area,
            x0,
            item_cells - TILE_GAP,
            label,
            idx % count,
            style,
        );
    }
}

/// One bordered gallery tile with a procedural fill and its label.
fn draw_tile(
    buf: &mut Buffer,
    area: Rect,
    x0: i32,
    width: i32,
    label: &str,
    n: usize,
    style: &ThemeStyle,
) {
    let height = i32::from(area.height);
    let border = rgb_dim(style.accent, 0.8);

    for y in 0..height {
        for x in 0..width {
            let (gx, gy) = (x0 + x, y);
            let on_edge = x == 0 || x == width - 1 || y == 0 || y == height - 1;
            if on_edge {
                let ch = match (x == 0 || x == width - 1, y == 0 || y == height - 1) {
                    (true, true) => corner_char(x == 0, y == 0),
                    (true, false) => '│',
                    _ => '─',
                };
                put(buf, area, gx, gy, ch, border);
            } else {
                // Procedural fill: per-tile seeded shade pattern in the
                // theme gradient, stable across frames.
                let seed = lcg(n as u32 ^ (x as u32).wrapping_mul(31) ^ (y as u32).wrapping_mul(97));
                let shade = match seed % 5 {
                    0 => '░',
                    1 => '▒',
                    _ => ' ',
                };
                if shade != ' ' {
                    let t = x as f32 / width.max(1) as f32;
                    put(buf, area, gx, gy, shade, rgb_mix(style.accent, style.accent_alt, t));
                }
            }
        }
    }

    // Centered label row: "#N" with the file reference underneath.
    let num = format!("#{}", n + 1);
    let mid = height / 2;
    put_centered(buf, area, x0, width, mid - 1, &num, rgb(style.text));
    put_centered(buf, area, x0, width, mid + 1, label, rgb_dim(style.text, 0.6));
}

fn put_centered(
    buf: &mut Buffer,
    area: Rect,
    x0: i32,
    width: i32,
    y: i32,
    text: &str,
    color: ratatui::style::Color,
) {
    let len = text.chars().count() as i32;
    if len > width - 2 {
        return;
    }
    let start = x0 + (width - len) / 2;
    for (i, ch) in text.chars().enumerate() {
        put(buf, area, start + i as i32, y, ch, color);
    }
}

fn corner_char(left: bool, top: bool) -> char {
    match (left, top) {
        (true, true) => '╭',
        (false, true) => '╮',
        (true, false) => '╰',
        (false, false) => '╯',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bk_core::carousel::CarouselTuning;

    #[test]
    fn zero_area_strip_is_a_noop() {
        let carousel = Carousel::gallery(25, CarouselTuning::default());
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        let style = bk_core::theme::Theme::Retro.style();
        draw_strip(&mut buf, area, &carousel, style, 8.0);
    }

    #[test]
    fn strip_draws_visible_tiles() {
        let mut carousel = Carousel::gallery(25, CarouselTuning::default());
        for _ in 0..100 {
            carousel.tick(8.0 * 80.0);
        }
        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);
        let style = bk_core::theme::Theme::Cosmic.style();
        draw_strip(&mut buf, area, &carousel, style, 8.0);

        let non_blank = buf
            .content
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .count();
        assert!(non_blank > 0, "visible tiles should paint cells");
    }
}
