use egui::{Pos2, Rect, Vec2};

use super::geometry::PopupLocation;

/// Options for [`super::EditorWindows`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorWindowsOptions {
    /// Seconds a notification stays fully opaque before it starts fading.
    pub notification_fadeout_wait: f64,

    /// Seconds the fade-out takes; the notification is removed at the end of it.
    pub notification_fadeout_time: f64,

    /// Client rect of a freshly created window.
    pub default_window_rect: Rect,

    pub default_min_size: Vec2,
    pub default_max_size: Vec2,

    /// Used by `show_as_drop_down` when the caller passes no priority order.
    pub drop_down_priority: Vec<PopupLocation>,

    /// If true, record lifecycle events in a small ring buffer (see `debug_event_log`).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,

    /// If true, check the container/dock/window topology after every structural change.
    pub debug_integrity: bool,

    /// If true, panic on integrity issues (debug builds only).
    pub debug_integrity_panic: bool,
}

impl Default for EditorWindowsOptions {
    fn default() -> Self {
        Self {
            notification_fadeout_wait: 4.0,
            notification_fadeout_time: 1.0,
            default_window_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(320.0, 240.0)),
            default_min_size: Vec2::new(100.0, 100.0),
            default_max_size: Vec2::new(4000.0, 4000.0),
            drop_down_priority: PopupLocation::DEFAULT_PRIORITY.to_vec(),
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: cfg!(debug_assertions),
            debug_integrity_panic: false,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn partial_options_fill_in_defaults() {
        let options: EditorWindowsOptions =
            serde_json::from_str(r#"{ "notification_fadeout_wait": 2.5 }"#).unwrap();
        assert_eq!(options.notification_fadeout_wait, 2.5);
        assert_eq!(options.notification_fadeout_time, 1.0);
        assert_eq!(options.default_max_size, Vec2::new(4000.0, 4000.0));
    }
}
