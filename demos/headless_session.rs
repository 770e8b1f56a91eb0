//! Drives an editor layout against the headless host and prints what the host was asked to do.
//!
//! Run with `RUST_LOG=debug` to see lifecycle logging.

use egui::{Rect, pos2, vec2};
use egui_editor_windows::{
    DockLayoutBuilder, EditorWindows, EditorWindowsOptions, HeadlessHost, SplitDirection,
    WindowRequest, WindowTypeDescriptor,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = EditorWindowsOptions {
        debug_event_log: true,
        ..Default::default()
    };
    let mut windows = EditorWindows::new_with_options(HeadlessHost::default(), options);

    let hierarchy = windows.register_window_type(WindowTypeDescriptor::new("Hierarchy"));
    let scene =
        windows.register_window_type(WindowTypeDescriptor::new("SceneView").with_title("Scene"));
    let game =
        windows.register_window_type(WindowTypeDescriptor::new("GameView").with_title("Game"));
    let inspector = windows.register_window_type(WindowTypeDescriptor::new("Inspector"));
    let color_picker = windows.register_window_type(WindowTypeDescriptor::new("ColorPicker"));

    // Main layout: hierarchy left, scene/game center, inspector right.
    let mut b = DockLayoutBuilder::new();
    let root = b.add_node();
    let (left, rest) = b.split_node(root, SplitDirection::Left);
    let (right, center) = b.split_node(rest, SplitDirection::Right);
    b.dock_window(windows.create_window(hierarchy), left);
    b.dock_windows([windows.create_window(scene), windows.create_window(game)], center);
    b.dock_window(windows.create_window(inspector), right);
    windows.spawn_layout(
        &b.finish(root),
        Rect::from_min_size(pos2(0.0, 0.0), vec2(1600.0, 900.0)),
    )?;

    // A console docked next to the game view.
    let console_type = windows.register_window_type(WindowTypeDescriptor::new("Console"));
    let console = windows.get_window(console_type, WindowRequest::default().dock_next_to([game]))?;
    windows.show_notification(console, "Build succeeded");

    // Tear the console off into its own container.
    windows.set_position(
        console,
        Rect::from_min_size(pos2(200.0, 600.0), vec2(700.0, 250.0)),
    )?;

    // A drop-down anchored near the bottom edge flips above its button.
    let picker = windows.create_window(color_picker);
    windows.show_as_drop_down(
        picker,
        Rect::from_min_size(pos2(1400.0, 1040.0), vec2(120.0, 20.0)),
        vec2(240.0, 200.0),
    )?;

    for _ in 0..6 {
        windows.host_mut().advance(1.0);
        windows.tick();
    }

    for window in windows.windows() {
        println!(
            "{:<12} {:?} in {:?}",
            window.title_content().text,
            windows.state(window.id()),
            windows.container_of(window.id()),
        );
    }
    println!("\nhost calls: {}", windows.host().calls.len());
    println!("\nevent log:\n{}", windows.debug_log_text());
    Ok(())
}
