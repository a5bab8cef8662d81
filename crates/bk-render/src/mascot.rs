use std::path::Path;

use anyhow::{Context, Result};
use bk_core::theme::ThemeStyle;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::paint::{put, rgb, rgb_dim};

/// Built-in fallback art when no mascot image is configured or loadable.
const ASCII_CAT: &[&str] = &[
    r"    /\_____/\    ",
    r"   /  o   o  \   ",
    r"  ( ==  ^  == )  ",
    r"   )         (   ",
    r"  (  BOBA CAT )  ",
    r" ( (  )   (  ) ) ",
    r"(__(__)___(__)__)",
];

/// One terminal cell of half-block art: top and bottom sub-pixel colors.
/// `None` means transparent (the backdrop shows through).
#[derive(Clone, Copy, Debug)]
struct HalfCell {
    top: Option<(u8, u8, u8)>,
    bottom: Option<(u8, u8, u8)>,
}

enum MascotKind {
    /// Image sampled to ▄ cells: top pixel = bg, bottom pixel = fg.
    HalfBlocks {
        width: u16,
        height: u16,
        cells: Vec<HalfCell>,
    },
    /// Built-in ASCII art, tinted by the theme accent.
    Ascii,
}

/// La mascotte du héros : image convertie en demi-blocs, ou chat ASCII
/// intégré. Flotte verticalement au rythme de `phase`.
pub struct Mascot {
    kind: MascotKind,
}

impl Mascot {
    /// Load from an optional image path, falling back to the built-in art.
    /// A missing or unreadable image degrades to the fallback with a log
    /// line, never an error.
    #[must_use]
    pub fn load(path: Option<&Path>, max_width: u16, max_height: u16) -> Self {
        if let Some(path) = path {
            match Self::from_image(path, max_width, max_height) {
                Ok(mascot) => return mascot,
                Err(e) => log::warn!("Mascot image unavailable ({e}), using built-in art"),
            }
        }
        Self {
            kind: MascotKind::Ascii,
        }
    }

    /// Sample an image into half-block cells, preserving aspect ratio.
    /// A cell covers 1×2 pixels of the downscaled image.
    fn from_image(path: &Path, max_width: u16, max_height: u16) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("Cannot open mascot image {}", path.display()))?
            .to_rgba8();
        let (iw, ih) = img.dimensions();
        if iw == 0 || ih == 0 || max_width == 0 || max_height == 0 {
            anyhow::bail!("Degenerate mascot dimensions");
        }

        let max_px_h = u32::from(max_height) * 2;
        let scale = (f64::from(max_width) / f64::from(iw)).min(f64::from(max_px_h) / f64::from(ih));
        let width = ((f64::from(iw) * scale) as u32).max(1);
        let px_height = ((f64::from(ih) * scale) as u32).max(2);
        let height = (px_height / 2).max(1);

        let sample = |cx: u32, py: u32| -> Option<(u8, u8, u8)> {
            let sx = (cx * iw / width).min(iw - 1);
            let sy = (py * ih / px_height).min(ih - 1);
            let [r, g, b, a] = img.get_pixel(sx, sy).0;
            (a >= 64).then_some((r, g, b))
        };

        let mut cells = Vec::with_capacity((width * height) as usize);
        for cy in 0..height {
            for cx in 0..width {
                cells.push(HalfCell {
                    top: sample(cx, cy * 2),
                    bottom: sample(cx, cy * 2 + 1),
                });
            }
        }

        Ok(Self {
            kind: MascotKind::HalfBlocks {
                width: width as u16,
                height: height as u16,
                cells,
            },
        })
    }

    /// Art dimensions in cells.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        match &self.kind {
            MascotKind::HalfBlocks { width, height, .. } => (*width, *height),
            MascotKind::Ascii => (
                ASCII_CAT.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16,
                ASCII_CAT.len() as u16,
            ),
        }
    }

    /// Draw the mascot centered in `area`, bobbing with `phase` (radians),
    /// surrounded by three slowly rotating rings. The area being smaller
    /// than the art is fine — writes are clipped.
    pub fn render(&self, buf: &mut Buffer, area: Rect, style: &ThemeStyle, phase: f32) {
        let (w, h) = self.size();
        let bob = (phase.sin() * 1.5).round() as i32;
        let x0 = (i32::from(area.width) - i32::from(w)) / 2;
        let y0 = (i32::from(area.height) - i32::from(h)) / 2 + bob;

        self.render_rings(buf, area, style, phase, (w, h), (x0, y0));

        match &self.kind {
            MascotKind::HalfBlocks {
                width,
                height,
                cells,
            } => {
                for cy in 0..*height {
                    for cx in 0..*width {
                        let cell = cells[usize::from(cy) * usize::from(*width) + usize::from(cx)];
                        let (x, y) = (x0 + i32::from(cx), y0 + i32::from(cy));
                        if x < 0
                            || y < 0
                            || x >= i32::from(area.width)
                            || y >= i32::from(area.height)
                        {
                            continue;
                        }
                        if let Some(buf_cell) = buf.cell_mut((area.x + x as u16, area.y + y as u16))
                        {
                            match (cell.top, cell.bottom) {
                                (None, None) => {}
                                (top, bottom) => {
                                    buf_cell.set_char('▄');
                                    if let Some(b) = bottom {
                                        buf_cell.set_fg(rgb(b));
                                    }
                                    if let Some(t) = top {
                                        buf_cell.set_bg(rgb(t));
                                    }
                                }
                            }
                        }
                    }
                }
            }
            MascotKind::Ascii => {
                for (cy, line) in ASCII_CAT.iter().enumerate() {
                    for (cx, ch) in line.chars().enumerate() {
                        if ch != ' ' {
                            put(
                                buf,
                                area,
                                x0 + cx as i32,
                                y0 + cy as i32,
                                ch,
                                rgb(style.accent),
                            );
                        }
                    }
                }
            }
        }
    }

    /// Three concentric elliptic rings, each rotating at its own rate.
    fn render_rings(
        &self,
        buf: &mut Buffer,
        area: Rect,
        style: &ThemeStyle,
        phase: f32,
        art: (u16, u16),
        origin: (i32, i32),
    ) {
        let colors = [style.accent, style.glow, style.accent_alt];
        let cx = origin.0 + i32::from(art.0) / 2;
        let cy = origin.1 + i32::from(art.1) / 2;

        for (i, color) in colors.iter().enumerate() {
            let rx = f32::from(art.0) / 2.0 + 3.0 + i as f32 * 3.0;
            let ry = rx / 2.2; // terminal cells are roughly twice as tall as wide
            let spin = phase * (0.3 + i as f32 * 0.15);
            let dots = 24 + i * 8;
            for d in 0..dots {
                let t = d as f32 / dots as f32 * std::f32::consts::TAU + spin;
                let x = cx + (t.cos() * rx).round() as i32;
                let y = cy + (t.sin() * ry).round() as i32;
                put(buf, area, x, y, '·', rgb_dim(*color, 0.6));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_falls_back_to_ascii() {
        let mascot = Mascot::load(Some(Path::new("/nonexistent/home.png")), 40, 20);
        let (w, h) = mascot.size();
        assert_eq!(h, ASCII_CAT.len() as u16);
        assert!(w > 0);
    }

    #[test]
    fn fallback_render_stays_in_bounds() {
        let mascot = Mascot::load(None, 40, 20);
        let area = Rect::new(0, 0, 10, 4); // smaller than the art
        let mut buf = Buffer::empty(area);
        let style = bk_core::theme::Theme::Cosmic.style();
        mascot.render(&mut buf, area, style, 1.3);
        // No panic and the buffer is still the same size.
        assert_eq!(buf.area, area);
    }
}
