use egui::Color32;

use super::EditorWindows;
use super::host::WindowHost;
use super::title::Content;
use super::types::WindowId;

/// Where a notification is in its fade-out schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeStep {
    /// Fully opaque, nothing to do this frame.
    Visible,

    /// Fading out, the window needs repainting.
    Fading,

    /// Faded out, the notification should be removed.
    Expired,
}

/// A transient message drawn over a window, faded out after a while.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    content: Content,
    fadeout_time: f64,
}

impl Notification {
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Absolute time (host clock, seconds) at which the fade-out starts.
    pub fn fadeout_time(&self) -> f64 {
        self.fadeout_time
    }

    pub fn step(&self, now: f64, fade_duration: f64) -> FadeStep {
        if now >= self.fadeout_time + fade_duration {
            FadeStep::Expired
        } else if now >= self.fadeout_time {
            FadeStep::Fading
        } else {
            FadeStep::Visible
        }
    }

    /// `1.0` until the fade-out starts, then linearly down to `0.0` over `fade_duration`.
    pub fn opacity(&self, now: f64, fade_duration: f64) -> f32 {
        if now < self.fadeout_time {
            return 1.0;
        }
        if fade_duration <= 0.0 {
            return 0.0;
        }
        let t = (now - self.fadeout_time) / fade_duration;
        (1.0 - t).clamp(0.0, 1.0) as f32
    }
}

impl<H: WindowHost> EditorWindows<H> {
    /// Show `content` over the window until it fades out.
    ///
    /// Showing again while a notification is up replaces the content and restarts the wait.
    pub fn show_notification(&mut self, id: WindowId, content: impl Into<Content>) {
        let now = self.host.time_since_startup();
        let wait = self.options.notification_fadeout_wait;
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };

        if window.notification.is_none() {
            self.scheduler.register(id);
        }
        window.notification = Some(Notification {
            content: content.into(),
            fadeout_time: now + wait,
        });
        self.repaint(id);
    }

    pub fn remove_notification(&mut self, id: WindowId) {
        self.scheduler.unregister(id);
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };
        if window.notification.take().is_some() {
            self.repaint(id);
        }
    }

    /// Current opacity of the window's notification, `None` without one.
    pub fn notification_opacity(&self, id: WindowId) -> Option<f32> {
        let notification = self.windows.get(&id)?.notification.as_ref()?;
        Some(notification.opacity(
            self.host.time_since_startup(),
            self.options.notification_fadeout_time,
        ))
    }

    /// `base` faded by the notification opacity, for drawing the notification.
    pub fn notification_tint(&self, id: WindowId, base: Color32) -> Option<Color32> {
        self.notification_opacity(id)
            .map(|opacity| base.gamma_multiply(opacity))
    }

    /// Run the per-frame hooks. Call once per frame from the host loop.
    pub fn tick(&mut self) {
        for id in self.scheduler.due() {
            self.check_for_window_repaint(id);
        }
    }

    fn check_for_window_repaint(&mut self, id: WindowId) {
        let now = self.host.time_since_startup();
        let step = self
            .windows
            .get(&id)
            .and_then(|w| w.notification.as_ref())
            .map(|n| n.step(now, self.options.notification_fadeout_time));

        match step {
            None => {
                self.scheduler.unregister(id);
            }
            Some(FadeStep::Expired) => {
                log::trace!("notification on {id:?} expired");
                self.remove_notification(id);
            }
            Some(FadeStep::Fading) => self.repaint(id),
            Some(FadeStep::Visible) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(fadeout_time: f64) -> Notification {
        Notification {
            content: Content::new("Saved"),
            fadeout_time,
        }
    }

    #[test]
    fn opacity_holds_then_decays_linearly() {
        let n = notification(4.0);
        assert_eq!(n.opacity(3.9, 1.0), 1.0);
        assert!((n.opacity(4.5, 1.0) - 0.5).abs() < 1e-6);
        assert_eq!(n.opacity(5.0, 1.0), 0.0);
        assert_eq!(n.opacity(9.0, 1.0), 0.0);
    }

    #[test]
    fn step_boundaries_are_inclusive() {
        let n = notification(4.0);
        assert_eq!(n.step(3.99, 1.0), FadeStep::Visible);
        assert_eq!(n.step(4.0, 1.0), FadeStep::Fading);
        assert_eq!(n.step(5.0, 1.0), FadeStep::Expired);
    }
}
