use crate::theme::ThemeStyle;

/// Tuning constants for one gallery instance. Each theme page carries its
/// own copy — the scroll speed is a per-page constant, not a global.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselTuning {
    /// Per-tick offset decrement, in virtual pixels.
    pub step_px: f32,
    /// Viewport width threshold between narrow and wide tiles.
    pub breakpoint_px: f32,
    /// Tile width below the breakpoint.
    pub item_width_narrow: f32,
    /// Tile width at/above the breakpoint.
    pub item_width_wide: f32,
}

impl Default for CarouselTuning {
    fn default() -> Self {
        Self {
            step_px: 0.5,
            breakpoint_px: 768.0,
            item_width_narrow: 200.0,
            item_width_wide: 250.0,
        }
    }
}

impl From<&ThemeStyle> for CarouselTuning {
    fn from(style: &ThemeStyle) -> Self {
        Self {
            step_px: style.step_px,
            breakpoint_px: style.breakpoint_px,
            item_width_narrow: style.item_width_narrow,
            item_width_wide: style.item_width_wide,
        }
    }
}

/// Bande d'images défilant horizontalement en continu.
///
/// L'offset décroît de `step_px` à chaque tick et revient à `0` dès qu'il
/// atteint `-(images.len() * item_width_px)`. La liste rendue est la liste
/// d'images dupliquée une fois, pour que la seconde copie soit déjà visible
/// quand la fenêtre dépasse la première.
///
/// The reset rule is a plain threshold check, not an exact modulo: with a
/// fractional `step_px` against a 200/250 px tile the offset does not land
/// exactly on the loop seam. Kept as-is.
///
/// # Example
/// ```
/// use bk_core::carousel::{Carousel, CarouselTuning};
/// let mut strip = Carousel::gallery(25, CarouselTuning::default());
/// strip.tick(1024.0);
/// assert!(strip.offset_px() < 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Carousel {
    images: Vec<String>,
    offset_px: f32,
    tuning: CarouselTuning,
}

impl Carousel {
    /// Create a carousel over an explicit image list.
    #[must_use]
    pub fn new(images: Vec<String>, tuning: CarouselTuning) -> Self {
        Self {
            images,
            offset_px: 0.0,
            tuning,
        }
    }

    /// Create the standard gallery: `slider/1.png` .. `slider/{count}.png`.
    #[must_use]
    pub fn gallery(count: usize, tuning: CarouselTuning) -> Self {
        let images = (1..=count).map(|n| format!("slider/{n}.png")).collect();
        Self::new(images, tuning)
    }

    /// The source image list (single copy).
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// The render list: the image list concatenated with itself once.
    #[must_use]
    pub fn render_list(&self) -> Vec<&str> {
        self.images
            .iter()
            .chain(self.images.iter())
            .map(String::as_str)
            .collect()
    }

    /// Tile width for the current viewport: narrow below the breakpoint,
    /// wide at/above it.
    #[must_use]
    pub fn item_width_px(&self, viewport_px: f32) -> f32 {
        if viewport_px < self.tuning.breakpoint_px {
            self.tuning.item_width_narrow
        } else {
            self.tuning.item_width_wide
        }
    }

    /// Current horizontal translation, always in
    /// `(-images.len() * item_width_px, 0]`.
    #[must_use]
    pub fn offset_px(&self) -> f32 {
        self.offset_px
    }

    /// Current tuning constants.
    #[must_use]
    pub fn tuning(&self) -> CarouselTuning {
        self.tuning
    }

    /// Advance one animation tick against the given viewport width.
    /// No-op when the image list is empty.
    pub fn tick(&mut self, viewport_px: f32) {
        if self.images.is_empty() {
            return;
        }
        self.offset_px -= self.tuning.step_px;
        let reset_point = -(self.images.len() as f32 * self.item_width_px(viewport_px));
        if self.offset_px <= reset_point {
            self.offset_px = 0.0;
        }
    }

    /// Swap tuning constants on a theme change. Mirrors a fresh page
    /// mount: the offset restarts from zero.
    pub fn retune(&mut self, tuning: CarouselTuning) {
        self.tuning = tuning;
        self.offset_px = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(images: &[&str], step_px: f32) -> Carousel {
        Carousel::new(
            images.iter().map(|s| (*s).to_string()).collect(),
            CarouselTuning {
                step_px,
                ..CarouselTuning::default()
            },
        )
    }

    #[test]
    fn render_list_is_doubled_in_order() {
        let strip = strip(&["a", "b", "c"], 0.5);
        assert_eq!(strip.render_list(), vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn item_width_branches_on_breakpoint() {
        let strip = Carousel::gallery(25, CarouselTuning::default());
        assert!((strip.item_width_px(500.0) - 200.0).abs() < f32::EPSILON);
        assert!((strip.item_width_px(768.0) - 250.0).abs() < f32::EPSILON);
        assert!((strip.item_width_px(1024.0) - 250.0).abs() < f32::EPSILON);
    }

    #[test]
    fn ticking_eventually_resets_to_exactly_zero() {
        let mut strip = strip(&["a", "b", "c"], 0.7);
        // Full cycle span is 3 * 250 = 750 px; drive well past it.
        let mut reset_seen = false;
        let mut prev = strip.offset_px();
        for _ in 0..2000 {
            strip.tick(1024.0);
            if strip.offset_px() > prev {
                assert_eq!(strip.offset_px(), 0.0);
                reset_seen = true;
            }
            prev = strip.offset_px();
        }
        assert!(reset_seen);
    }

    #[test]
    fn offset_stays_in_range_across_many_ticks() {
        let mut strip = Carousel::gallery(25, CarouselTuning::default());
        let bound = -(25.0 * 250.0);
        for _ in 0..100_000 {
            strip.tick(1024.0);
            assert!(strip.offset_px() <= 0.0);
            assert!(strip.offset_px() > bound);
        }
    }

    #[test]
    fn empty_image_list_never_moves() {
        let mut strip = strip(&[], 0.8);
        for _ in 0..10 {
            strip.tick(1024.0);
        }
        assert_eq!(strip.offset_px(), 0.0);
        assert!(strip.render_list().is_empty());
    }

    #[test]
    fn retune_restarts_from_zero() {
        let mut strip = Carousel::gallery(25, CarouselTuning::default());
        for _ in 0..100 {
            strip.tick(1024.0);
        }
        assert!(strip.offset_px() < 0.0);
        strip.retune(CarouselTuning {
            step_px: 0.8,
            ..CarouselTuning::default()
        });
        assert_eq!(strip.offset_px(), 0.0);
    }
}
