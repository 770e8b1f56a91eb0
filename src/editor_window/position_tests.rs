use egui::{Rect, pos2, vec2};

use super::*;
use crate::dock_builder::DockLayout;

fn setup() -> (EditorWindows<HeadlessHost>, WindowTypeId) {
    let options = EditorWindowsOptions {
        debug_integrity: true,
        debug_integrity_panic: true,
        ..Default::default()
    };
    let mut windows = EditorWindows::new_with_options(HeadlessHost::default(), options);
    let ty = windows.register_window_type(WindowTypeDescriptor::new("Hierarchy"));
    (windows, ty)
}

fn tabbed(
    windows: &mut EditorWindows<HeadlessHost>,
    ty: WindowTypeId,
    count: usize,
) -> Vec<WindowId> {
    let ids: Vec<WindowId> = (0..count).map(|_| windows.create_window(ty)).collect();
    let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(900.0, 700.0));
    windows
        .spawn_layout(&DockLayout::tabs(ids.iter().copied()), rect)
        .unwrap();
    windows.host_mut().take_calls();
    ids
}

fn target() -> Rect {
    Rect::from_min_size(pos2(400.0, 300.0), vec2(250.0, 180.0))
}

#[test]
fn unparented_window_only_records_position() {
    let (mut windows, ty) = setup();
    let id = windows.create_window(ty);

    windows.set_position(id, target()).unwrap();

    assert_eq!(windows.window(id).unwrap().position(), target());
    assert!(windows.host().calls.is_empty());
}

#[test]
fn host_view_moves_its_container() {
    let (mut windows, ty) = setup();
    let id = windows.create_window(ty);
    windows.show_utility(id).unwrap();
    let container = windows.container_of(id).unwrap();
    windows.host_mut().take_calls();

    windows.set_position(id, target()).unwrap();

    assert_eq!(windows.container(container).unwrap().rect(), target());
    assert_eq!(
        windows.host().calls,
        vec![HostCall::SetContainerPosition {
            container,
            rect: target(),
        }]
    );
}

#[test]
fn sole_tab_moves_its_container_with_borders() {
    let (mut windows, ty) = setup();
    let id = windows.create_window(ty);
    windows.show(id).unwrap();
    let container = windows.container_of(id).unwrap();
    windows.host_mut().take_calls();

    windows.set_position(id, target()).unwrap();

    let outer = windows.host().dock_border.add(target());
    assert_eq!(windows.container_of(id), Some(container));
    assert_eq!(windows.container(container).unwrap().rect(), outer);
    assert_eq!(
        windows.host().calls,
        vec![HostCall::SetContainerPosition {
            container,
            rect: outer,
        }]
    );
    assert_eq!(windows.state(id), WindowState::Floating);
}

#[test]
fn shared_tab_splits_off_into_new_container() {
    let (mut windows, ty) = setup();
    let ids = tabbed(&mut windows, ty, 3);
    let old_container = windows.container_of(ids[0]).unwrap();
    let old_dock = match windows.window(ids[0]).unwrap().parent() {
        Some(ParentView::Dock(dock)) => dock,
        other => panic!("expected a dock parent, got {other:?}"),
    };

    windows.set_position(ids[1], target()).unwrap();

    let new_container = windows.container_of(ids[1]).unwrap();
    assert_ne!(new_container, old_container);
    assert_eq!(windows.container_count(), 2);
    assert_eq!(windows.state(ids[1]), WindowState::Floating);
    assert_eq!(
        windows.container(new_container).unwrap().rect(),
        windows.host().dock_border.add(target())
    );

    let left_behind = windows.dock_area(old_dock).unwrap();
    assert_eq!(left_behind.panes(), &[ids[0], ids[2]]);
    assert_eq!(left_behind.active_window(), Some(ids[0]));
    assert!(windows.integrity_issues().is_empty());
}

#[test]
fn split_off_records_topology_before_host_calls() {
    let (mut windows, ty) = setup();
    let ids = tabbed(&mut windows, ty, 3);
    let old_dock = match windows.window(ids[0]).unwrap().parent() {
        Some(ParentView::Dock(dock)) => dock,
        other => panic!("expected a dock parent, got {other:?}"),
    };

    windows.set_position(ids[1], target()).unwrap();
    let new_container = windows.container_of(ids[1]).unwrap();

    let calls = windows.host_mut().take_calls();
    let kinds: Vec<&str> = calls
        .iter()
        .map(|call| match call {
            HostCall::Repaint(ParentView::Dock(dock)) if *dock == old_dock => "repaint old",
            HostCall::CreateContainer { container, .. } if *container == new_container => "create",
            HostCall::ApplyViewSettings { .. } => "settings",
            HostCall::ShowContainer {
                container, options, ..
            } if *container == new_container => {
                assert!(options.load_position && options.display_immediately);
                "show"
            }
            other => panic!("unexpected host call {other:?}"),
        })
        .collect();
    assert_eq!(kinds, vec!["repaint old", "create", "settings", "show"]);
}

#[test]
fn splitting_off_the_active_tab_hands_over_settings() {
    let (mut windows, ty) = setup();
    let ids = tabbed(&mut windows, ty, 2);

    windows.set_position(ids[0], target()).unwrap();

    assert!(windows.has_focus(ids[1]));
    assert_eq!(windows.state(ids[1]), WindowState::Floating);
    let settings_calls = windows
        .host()
        .count_calls(|call| matches!(call, HostCall::ApplyViewSettings { .. }));
    // One for the tab left behind, one for the split-off window in its new container.
    assert_eq!(settings_calls, 2);
}

#[test]
fn host_failure_during_split_leaves_window_unparented() {
    let (mut windows, ty) = setup();
    let ids = tabbed(&mut windows, ty, 2);
    let old_container = windows.container_of(ids[0]).unwrap();
    windows.host_mut().fail_next_create = true;

    let err = windows.set_position(ids[1], target()).unwrap_err();

    assert!(matches!(err, HeadlessHostError::CreateRejected(_)));
    assert_eq!(windows.state(ids[1]), WindowState::Unparented);
    assert_eq!(windows.window(ids[1]).unwrap().position(), target());
    assert_eq!(windows.container_count(), 1);
    assert_eq!(windows.container_of(ids[0]), Some(old_container));
    assert!(windows.integrity_issues().is_empty());

    // The window can be shown again once the host recovers.
    windows.show(ids[1]).unwrap();
    assert_eq!(windows.state(ids[1]), WindowState::Floating);
}

#[test]
fn host_failure_on_show_propagates() {
    let (mut windows, ty) = setup();
    let id = windows.create_window(ty);
    windows.host_mut().fail_next_create = true;

    let err = windows.show(id).unwrap_err();

    assert_eq!(err.to_string(), format!("host refused to create container {:?}", ContainerId(1)));
    assert_eq!(windows.state(id), WindowState::Unparented);
    assert_eq!(windows.container_count(), 0);
    assert!(windows.host().calls.is_empty());
}
