/// Click position in whole percent of the image box, independent of how
/// large the image is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedClick {
    pub x_percent: i32,
    pub y_percent: i32,
}

/// Rendered box of the image element, in the same coordinate space as the
/// pointer positions handed to [`ElementBox::normalize`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Edges are inclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }

    pub fn normalize(&self, pointer_x: f64, pointer_y: f64) -> NormalizedClick {
        normalize(
            pointer_x,
            pointer_y,
            self.left,
            self.top,
            self.width,
            self.height,
        )
    }
}

/// Convert a pointer position into percent of the element box, rounded to
/// the nearest integer. Values are not clamped: a pointer outside the box
/// yields a result outside `0..=100`.
pub fn normalize(
    pointer_x: f64,
    pointer_y: f64,
    origin_x: f64,
    origin_y: f64,
    width: f64,
    height: f64,
) -> NormalizedClick {
    NormalizedClick {
        x_percent: percent_of(pointer_x - origin_x, width),
        y_percent: percent_of(pointer_y - origin_y, height),
    }
}

fn percent_of(offset: f64, extent: f64) -> i32 {
    if extent <= 0.0 || !extent.is_finite() {
        return 0;
    }
    (100.0 * offset / extent).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_on_scaled_image() {
        let p = normalize(150.0, 100.0, 50.0, 50.0, 300.0, 200.0);
        assert_eq!(p, NormalizedClick { x_percent: 33, y_percent: 25 });
    }

    #[test]
    fn edges_map_to_bounds() {
        let b = ElementBox::new(10.0, 20.0, 640.0, 480.0);
        assert_eq!(b.normalize(10.0, 20.0), NormalizedClick { x_percent: 0, y_percent: 0 });
        assert_eq!(b.normalize(650.0, 500.0), NormalizedClick { x_percent: 100, y_percent: 100 });
    }

    #[test]
    fn same_relative_point_at_any_scale() {
        for scale in [0.25, 0.5, 1.0, 1.7, 3.0] {
            let b = ElementBox::new(0.0, 0.0, 1200.0 * scale, 800.0 * scale);
            let p = b.normalize(300.0 * scale, 600.0 * scale);
            assert_eq!(p, NormalizedClick { x_percent: 25, y_percent: 75 });
        }
    }

    #[test]
    fn outside_is_not_clamped() {
        let b = ElementBox::new(100.0, 100.0, 100.0, 100.0);
        assert!(!b.contains(90.0, 150.0));
        let p = b.normalize(90.0, 250.0);
        assert_eq!(p, NormalizedClick { x_percent: -10, y_percent: 150 });
    }

    #[test]
    fn in_bounds_sweep_stays_in_range() {
        for (w, h) in [(1.0, 1.0), (3.0, 7.0), (333.3, 120.5), (1920.0, 1080.0)] {
            let b = ElementBox::new(5.0, 9.0, w, h);
            for i in 0..=20 {
                let f = i as f64 / 20.0;
                let p = b.normalize(5.0 + w * f, 9.0 + h * (1.0 - f));
                assert!((0..=100).contains(&p.x_percent), "{:?} for {}x{}", p, w, h);
                assert!((0..=100).contains(&p.y_percent), "{:?} for {}x{}", p, w, h);
            }
        }
    }

    #[test]
    fn zero_sized_box_does_not_panic() {
        let p = normalize(10.0, 10.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(p, NormalizedClick { x_percent: 0, y_percent: 0 });
    }
}
