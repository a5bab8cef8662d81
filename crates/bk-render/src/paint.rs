use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Écriture directe dans le `ratatui::Buffer`, avec clipping.
///
/// Pas de widget Canvas ratatui — les couches animées (backdrop,
/// particules, tuiles partiellement hors-champ) écrivent cellule par
/// cellule, coordonnées locales à `area`, valeurs négatives acceptées.
pub fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, ch: char, fg: Color) {
    if x < 0 || y < 0 || x >= i32::from(area.width) || y >= i32::from(area.height) {
        return;
    }
    if let Some(cell) = buf.cell_mut((area.x + x as u16, area.y + y as u16)) {
        cell.set_char(ch);
        cell.set_fg(fg);
    }
}

/// Like [`put`] but also paints the cell background.
pub fn put_bg(buf: &mut Buffer, area: Rect, x: i32, y: i32, ch: char, fg: Color, bg: Color) {
    if x < 0 || y < 0 || x >= i32::from(area.width) || y >= i32::from(area.height) {
        return;
    }
    if let Some(cell) = buf.cell_mut((area.x + x as u16, area.y + y as u16)) {
        cell.set_char(ch);
        cell.set_fg(fg);
        cell.set_bg(bg);
    }
}

/// Write a string horizontally starting at local `(x, y)`, clipped.
pub fn put_str(buf: &mut Buffer, area: Rect, x: i32, y: i32, text: &str, fg: Color) {
    for (i, ch) in text.chars().enumerate() {
        put(buf, area, x + i as i32, y, ch, fg);
    }
}

/// Flood the whole area with the page background color.
pub fn fill_background(buf: &mut Buffer, area: Rect, bg: (u8, u8, u8)) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ');
                cell.set_bg(rgb(bg));
            }
        }
    }
}

/// RGB triple to a truecolor terminal color.
#[must_use]
pub fn rgb(c: (u8, u8, u8)) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// RGB triple scaled by a brightness factor in `[0, 1]`.
#[must_use]
pub fn rgb_dim(c: (u8, u8, u8), factor: f32) -> Color {
    let f = factor.clamp(0.0, 1.0);
    Color::Rgb(
        (f32::from(c.0) * f) as u8,
        (f32::from(c.1) * f) as u8,
        (f32::from(c.2) * f) as u8,
    )
}

/// Linear blend between two RGB triples, `t` in `[0, 1]`.
#[must_use]
pub fn rgb_mix(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t) as u8;
    Color::Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Fast deterministic LCG, used for per-cell flicker without allocation.
#[must_use]
pub fn lcg(seed: u32) -> u32 {
    seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_clips_out_of_range_writes() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        put(&mut buf, area, -1, 0, 'x', Color::White);
        put(&mut buf, area, 0, 5, 'x', Color::White);
        put(&mut buf, area, 9, 0, 'x', Color::White);
        put(&mut buf, area, 2, 1, 'x', Color::White);
        for y in 0..2u16 {
            for x in 0..4u16 {
                let sym = buf.cell((x, y)).map(ratatui::buffer::Cell::symbol);
                if (x, y) == (2, 1) {
                    assert_eq!(sym, Some("x"));
                } else {
                    assert_eq!(sym, Some(" "));
                }
            }
        }
    }

    #[test]
    fn rgb_mix_endpoints() {
        assert_eq!(rgb_mix((0, 0, 0), (255, 255, 255), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(
            rgb_mix((0, 0, 0), (255, 255, 255), 1.0),
            Color::Rgb(255, 255, 255)
        );
    }
}
