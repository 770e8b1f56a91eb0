use egui::{Pos2, Rect, Vec2};

/// Per-side border thickness of a view, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BorderInsets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BorderInsets {
    pub const ZERO: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub const fn same(width: f32) -> Self {
        Self::new(width, width, width, width)
    }

    /// Total horizontal and vertical border, added on top of a client size.
    pub fn sum(&self) -> Vec2 {
        Vec2::new(self.left + self.right, self.top + self.bottom)
    }

    /// Grow a client rect into the outer rect that includes the borders.
    pub fn add(&self, rect: Rect) -> Rect {
        Rect::from_min_max(
            Pos2::new(rect.min.x - self.left, rect.min.y - self.top),
            Pos2::new(rect.max.x + self.right, rect.max.y + self.bottom),
        )
    }

    /// Inverse of [`Self::add`].
    pub fn remove(&self, rect: Rect) -> Rect {
        Rect::from_min_max(
            Pos2::new(rect.min.x + self.left, rect.min.y + self.top),
            Pos2::new(rect.max.x - self.right, rect.max.y - self.bottom),
        )
    }
}

/// Where a drop-down is placed relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PopupLocation {
    Below,
    Above,
    Left,
    Right,
}

impl PopupLocation {
    pub const DEFAULT_PRIORITY: [Self; 4] = [Self::Below, Self::Above, Self::Left, Self::Right];

    /// The rect a drop-down of `size` would occupy at this location.
    pub fn candidate(self, anchor: Rect, size: Vec2) -> Rect {
        let min = match self {
            Self::Below => Pos2::new(anchor.min.x, anchor.max.y),
            Self::Above => Pos2::new(anchor.min.x, anchor.min.y - size.y),
            Self::Left => Pos2::new(anchor.min.x - size.x, anchor.min.y),
            Self::Right => Pos2::new(anchor.max.x, anchor.min.y),
        };
        Rect::from_min_size(min, size)
    }
}

/// Place a drop-down of `size` next to `anchor`.
///
/// The first candidate in `priority` that lies wholly inside one monitor wins. If none fits,
/// the first candidate in `priority` is used as is. Without monitors (or with an empty priority
/// list) the drop-down goes directly below the anchor.
pub fn fit_drop_down_rect(
    anchor: Rect,
    size: Vec2,
    priority: &[PopupLocation],
    monitors: &[Rect],
) -> Rect {
    let Some(&first) = priority.first() else {
        return PopupLocation::Below.candidate(anchor, size);
    };
    if monitors.is_empty() {
        return PopupLocation::Below.candidate(anchor, size);
    }

    priority
        .iter()
        .map(|location| location.candidate(anchor, size))
        .find(|candidate| monitors.iter().any(|m| m.contains_rect(*candidate)))
        .unwrap_or_else(|| first.candidate(anchor, size))
}

/// Move a window of `size` at `pos` so it lies on the monitor it overlaps most.
#[cfg(feature = "persistence")]
pub(crate) fn clamp_pos_to_monitors_best_effort(pos: Pos2, size: Vec2, monitors: &[Rect]) -> Pos2 {
    if monitors.is_empty() || !(size.x.is_finite() && size.y.is_finite()) {
        return pos;
    }

    let rect = Rect::from_min_size(pos, size);

    // Prefer the monitor with the largest intersection with the window rect.
    let mut best: Option<(Rect, f32)> = None;
    for &m in monitors {
        let inter = rect.intersect(m);
        if inter.is_positive() {
            let area = inter.width() * inter.height();
            match best {
                None => best = Some((m, area)),
                Some((_best_m, best_area)) if area > best_area => best = Some((m, area)),
                _ => {}
            }
        }
    }

    // If nothing intersects, pick the monitor whose clamped point is closest.
    let monitor = if let Some((m, _area)) = best {
        m
    } else {
        let mut best_m: Option<(Rect, f32)> = None;
        for &m in monitors {
            let clamped = egui::pos2(pos.x.clamp(m.min.x, m.max.x), pos.y.clamp(m.min.y, m.max.y));
            let d = clamped.distance(pos);
            match best_m {
                None => best_m = Some((m, d)),
                Some((_m0, d0)) if d < d0 => best_m = Some((m, d)),
                _ => {}
            }
        }
        best_m.map_or(monitors[0], |(m, _d)| m)
    };

    let min = monitor.min;
    let max_unclamped = monitor.max - size;
    let max = egui::pos2(max_unclamped.x.max(min.x), max_unclamped.y.max(min.y));
    egui::pos2(pos.x.clamp(min.x, max.x), pos.y.clamp(min.y, max.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(1920.0, 1080.0))
    }

    #[test]
    fn border_add_and_remove_are_inverse() {
        let border = BorderInsets::new(2.0, 3.0, 19.0, 5.0);
        let client = Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(320.0, 240.0));
        let outer = border.add(client);
        assert_eq!(outer.min, Pos2::new(98.0, 81.0));
        assert_eq!(outer.size(), Vec2::new(325.0, 264.0));
        assert_eq!(border.remove(outer), client);
        assert_eq!(border.sum(), Vec2::new(5.0, 24.0));
    }

    #[test]
    fn drop_down_prefers_below_when_it_fits() {
        let anchor = Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(80.0, 20.0));
        let rect = fit_drop_down_rect(
            anchor,
            Vec2::new(200.0, 300.0),
            &PopupLocation::DEFAULT_PRIORITY,
            &[screen()],
        );
        assert_eq!(rect.min, Pos2::new(100.0, 120.0));
    }

    #[test]
    fn drop_down_flips_above_near_bottom_edge() {
        let anchor = Rect::from_min_size(Pos2::new(100.0, 1000.0), Vec2::new(80.0, 20.0));
        let rect = fit_drop_down_rect(
            anchor,
            Vec2::new(200.0, 300.0),
            &PopupLocation::DEFAULT_PRIORITY,
            &[screen()],
        );
        assert_eq!(rect.min, Pos2::new(100.0, 700.0));
    }

    #[test]
    fn drop_down_falls_back_to_first_priority_when_nothing_fits() {
        let anchor = Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(80.0, 20.0));
        let huge = Vec2::new(5000.0, 5000.0);
        let rect = fit_drop_down_rect(
            anchor,
            huge,
            &[PopupLocation::Right, PopupLocation::Below],
            &[screen()],
        );
        assert_eq!(rect, PopupLocation::Right.candidate(anchor, huge));
    }

    #[test]
    fn drop_down_without_monitors_goes_below() {
        let anchor = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(50.0, 20.0));
        let rect = fit_drop_down_rect(
            anchor,
            Vec2::new(100.0, 100.0),
            &[PopupLocation::Above],
            &[],
        );
        assert_eq!(rect.min, Pos2::new(10.0, 30.0));
    }

    #[test]
    fn drop_down_uses_any_monitor() {
        let left = Rect::from_min_size(Pos2::new(-1920.0, 0.0), Vec2::new(1920.0, 1080.0));
        let anchor = Rect::from_min_size(Pos2::new(-300.0, 1050.0), Vec2::new(80.0, 20.0));
        let rect = fit_drop_down_rect(
            anchor,
            Vec2::new(200.0, 200.0),
            &PopupLocation::DEFAULT_PRIORITY,
            &[screen(), left],
        );
        assert_eq!(rect.min, Pos2::new(-300.0, 850.0));
    }

    #[cfg(feature = "persistence")]
    #[test]
    fn clamp_pulls_window_back_onto_screen() {
        let pos = clamp_pos_to_monitors_best_effort(
            Pos2::new(1800.0, -40.0),
            Vec2::new(400.0, 300.0),
            &[screen()],
        );
        assert_eq!(pos, Pos2::new(1520.0, 0.0));
    }
}
