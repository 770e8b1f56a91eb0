use egui::Color32;

use super::*;

fn shown_window() -> (EditorWindows<HeadlessHost>, WindowId) {
    let mut windows = EditorWindows::new(HeadlessHost::default());
    let ty = windows.register_window_type(WindowTypeDescriptor::new("Console"));
    let id = windows.create_window(ty);
    windows.show(id).unwrap();
    windows.host_mut().take_calls();
    (windows, id)
}

fn repaints(windows: &EditorWindows<HeadlessHost>) -> usize {
    windows
        .host()
        .count_calls(|call| matches!(call, HostCall::Repaint(_)))
}

#[test]
fn notification_fades_after_wait_and_clears_after_fade() {
    let (mut windows, id) = shown_window();

    windows.show_notification(id, "Compiled");
    assert!(windows.scheduler().is_registered(id));
    assert_eq!(windows.window(id).unwrap().notification().unwrap().fadeout_time(), 4.0);
    windows.host_mut().take_calls();

    windows.host_mut().advance(3.5);
    windows.tick();
    assert_eq!(repaints(&windows), 0);
    assert_eq!(windows.notification_opacity(id), Some(1.0));

    windows.host_mut().advance(0.5);
    windows.tick();
    assert_eq!(repaints(&windows), 1);

    windows.host_mut().advance(0.5);
    windows.tick();
    assert_eq!(repaints(&windows), 2);
    assert_eq!(windows.notification_opacity(id), Some(0.5));

    windows.host_mut().advance(0.5);
    windows.tick();
    assert!(windows.window(id).unwrap().notification().is_none());
    assert!(!windows.scheduler().is_registered(id));
    assert_eq!(windows.notification_opacity(id), None);
}

#[test]
fn showing_again_extends_the_deadline_without_double_registration() {
    let (mut windows, id) = shown_window();

    windows.show_notification(id, "first");
    windows.host_mut().advance(3.0);
    windows.show_notification(id, "second");

    assert_eq!(windows.scheduler().len(), 1);
    let notification = windows.window(id).unwrap().notification().unwrap();
    assert_eq!(notification.content().text, "second");
    assert_eq!(notification.fadeout_time(), 7.0);

    windows.host_mut().advance(2.0);
    windows.tick();
    assert!(windows.window(id).unwrap().notification().is_some());
}

#[test]
fn remove_notification_unregisters_and_is_idempotent() {
    let (mut windows, id) = shown_window();
    windows.show_notification(id, "Saved");

    windows.remove_notification(id);
    assert!(windows.window(id).unwrap().notification().is_none());
    assert!(windows.scheduler().is_empty());

    windows.remove_notification(id);
    assert!(windows.scheduler().is_empty());
}

#[test]
fn fade_durations_come_from_options() {
    let (mut windows, id) = shown_window();
    windows.options.notification_fadeout_wait = 1.0;
    windows.options.notification_fadeout_time = 2.0;

    windows.show_notification(id, "Quick");
    windows.host_mut().advance(2.0);
    assert_eq!(windows.notification_opacity(id), Some(0.5));
    assert_eq!(
        windows.notification_tint(id, Color32::WHITE),
        Some(Color32::WHITE.gamma_multiply(0.5))
    );

    windows.host_mut().advance(1.0);
    windows.tick();
    assert!(windows.window(id).unwrap().notification().is_none());
}

#[test]
fn unparented_windows_keep_notifications_without_repaints() {
    let mut windows = EditorWindows::new(HeadlessHost::default());
    let ty = windows.register_window_type(WindowTypeDescriptor::new("Console"));
    let id = windows.create_window(ty);

    windows.show_notification(id, "Hidden");
    windows.host_mut().advance(4.5);
    windows.tick();

    assert!(windows.host().calls.is_empty());
    assert!(windows.window(id).unwrap().notification().is_some());

    windows.host_mut().advance(1.0);
    windows.tick();
    assert!(windows.window(id).unwrap().notification().is_none());
}
