use egui::{Pos2, Rect, Vec2};

use super::geometry::BorderInsets;
use super::host::{ContainerRequest, ShowOptions, ViewSettings, WindowHost};
use super::types::{ContainerId, ParentView, ShowMode, ViewKind};

/// One recorded call into [`HeadlessHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    CreateContainer {
        container: ContainerId,
        request: ContainerRequest,
    },
    ShowContainer {
        container: ContainerId,
        mode: ShowMode,
        options: ShowOptions,
    },
    SetContainerPosition {
        container: ContainerId,
        rect: Rect,
    },
    SetContainerTitle {
        container: ContainerId,
        title: String,
    },
    CloseContainer(ContainerId),
    FocusView(ParentView),
    Repaint(ParentView),
    ApplyViewSettings {
        view: ParentView,
        settings: ViewSettings,
    },
    RecreateContext(ParentView),
    MakeModal(ContainerId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadlessHostError {
    /// Container creation was refused, see [`HeadlessHost::fail_next_create`] and
    /// [`HeadlessHost::refuse_container`].
    CreateRejected(ContainerId),
}

impl std::fmt::Display for HeadlessHostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateRejected(container) => {
                write!(f, "host refused to create container {container:?}")
            }
        }
    }
}

impl std::error::Error for HeadlessHostError {}

/// A [`WindowHost`] without a display: keeps a manual clock and records every call.
///
/// Useful for tests, tools and servers that drive window layouts without rendering them.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    pub now: f64,
    pub monitors: Vec<Rect>,
    pub host_border: BorderInsets,
    pub dock_border: BorderInsets,
    pub calls: Vec<HostCall>,

    /// Refuse the next `create_container` call.
    pub fail_next_create: bool,

    /// Refuse `create_container` for this container only.
    pub refuse_container: Option<ContainerId>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self {
            now: 0.0,
            monitors: vec![Rect::from_min_size(Pos2::ZERO, Vec2::new(1920.0, 1080.0))],
            host_border: BorderInsets::ZERO,
            dock_border: BorderInsets::new(2.0, 2.0, 19.0, 2.0),
            calls: Vec::new(),
            fail_next_create: false,
            refuse_container: None,
        }
    }
}

impl HeadlessHost {
    pub fn advance(&mut self, seconds: f64) {
        self.now += seconds;
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count_calls(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl WindowHost for HeadlessHost {
    type Error = HeadlessHostError;

    fn time_since_startup(&self) -> f64 {
        self.now
    }

    fn create_container(
        &mut self,
        container: ContainerId,
        request: &ContainerRequest,
    ) -> Result<(), Self::Error> {
        if std::mem::take(&mut self.fail_next_create) || self.refuse_container == Some(container) {
            return Err(HeadlessHostError::CreateRejected(container));
        }
        self.calls.push(HostCall::CreateContainer {
            container,
            request: request.clone(),
        });
        Ok(())
    }

    fn show_container(
        &mut self,
        container: ContainerId,
        mode: ShowMode,
        options: ShowOptions,
    ) -> Result<(), Self::Error> {
        self.calls.push(HostCall::ShowContainer {
            container,
            mode,
            options,
        });
        Ok(())
    }

    fn set_container_position(&mut self, container: ContainerId, rect: Rect) {
        self.calls
            .push(HostCall::SetContainerPosition { container, rect });
    }

    fn set_container_title(&mut self, container: ContainerId, title: &str) {
        self.calls.push(HostCall::SetContainerTitle {
            container,
            title: title.to_owned(),
        });
    }

    fn close_container(&mut self, container: ContainerId) {
        self.calls.push(HostCall::CloseContainer(container));
    }

    fn focus_view(&mut self, view: ParentView) {
        self.calls.push(HostCall::FocusView(view));
    }

    fn repaint(&mut self, view: ParentView) {
        self.calls.push(HostCall::Repaint(view));
    }

    fn apply_view_settings(&mut self, view: ParentView, settings: &ViewSettings) {
        self.calls.push(HostCall::ApplyViewSettings {
            view,
            settings: settings.clone(),
        });
    }

    fn recreate_context(&mut self, view: ParentView) {
        self.calls.push(HostCall::RecreateContext(view));
    }

    fn make_modal(&mut self, container: ContainerId) {
        self.calls.push(HostCall::MakeModal(container));
    }

    fn border_size(&self, kind: ViewKind) -> BorderInsets {
        match kind {
            ViewKind::Host => self.host_border,
            ViewKind::DockArea => self.dock_border,
        }
    }

    fn monitors(&self) -> Vec<Rect> {
        self.monitors.clone()
    }
}
