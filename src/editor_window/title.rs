use ahash::HashMap;

/// Text plus optional icon, used for window titles and notifications.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Content {
    pub text: String,
    pub icon: Option<String>,
    pub tooltip: Option<String>,
}

impl Content {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
            tooltip: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Identifies a registered window type. Lookups match it exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowTypeId(u32);

impl WindowTypeId {
    pub fn value(self) -> u32 {
        self.0
    }
}

/// Static description of a window type, supplied at registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowTypeDescriptor {
    /// Fully qualified name. Also the fallback title and the key used by layout snapshots.
    pub type_name: String,
    pub title: Option<String>,
    pub icon: Option<String>,

    /// Use `type_name` as icon name when `icon` is unset.
    pub use_type_name_as_icon: bool,
}

impl WindowTypeDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            title: None,
            icon: None,
            use_type_name_as_icon: false,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_type_name_as_icon(mut self) -> Self {
        self.use_type_name_as_icon = true;
        self
    }

    /// The title a freshly created window of this type starts with.
    pub fn default_title_content(&self) -> Content {
        let Some(title) = &self.title else {
            return Content::new(self.type_name.clone());
        };

        let icon = match &self.icon {
            Some(icon) if !icon.is_empty() => Some(icon.clone()),
            _ if self.use_type_name_as_icon => Some(self.type_name.clone()),
            _ => None,
        };

        match icon {
            Some(icon) => Content::new(title.clone()).with_icon(icon),
            None => Content::new(title.clone()),
        }
    }
}

/// Capability table: window type → default title/icon.
#[derive(Clone, Debug, Default)]
pub struct WindowTypeRegistry {
    descriptors: Vec<WindowTypeDescriptor>,
    by_name: HashMap<String, WindowTypeId>,
}

impl WindowTypeRegistry {
    /// Register a type. Registering a known `type_name` again replaces its descriptor and
    /// keeps the id.
    pub fn register(&mut self, descriptor: WindowTypeDescriptor) -> WindowTypeId {
        if let Some(&id) = self.by_name.get(&descriptor.type_name) {
            self.descriptors[id.0 as usize] = descriptor;
            return id;
        }

        let id = WindowTypeId(self.descriptors.len() as u32);
        self.by_name.insert(descriptor.type_name.clone(), id);
        self.descriptors.push(descriptor);
        id
    }

    pub fn get(&self, id: WindowTypeId) -> Option<&WindowTypeDescriptor> {
        self.descriptors.get(id.0 as usize)
    }

    pub fn find(&self, type_name: &str) -> Option<WindowTypeId> {
        self.by_name.get(type_name).copied()
    }

    pub fn type_name(&self, id: WindowTypeId) -> Option<&str> {
        self.get(id).map(|d| d.type_name.as_str())
    }

    pub fn default_title_content(&self, id: WindowTypeId) -> Content {
        self.get(id)
            .map(WindowTypeDescriptor::default_title_content)
            .unwrap_or_else(|| Content::new(format!("{id:?}")))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_falls_back_to_type_name() {
        let descriptor = WindowTypeDescriptor::new("Editor.ConsoleWindow");
        assert_eq!(
            descriptor.default_title_content(),
            Content::new("Editor.ConsoleWindow")
        );
    }

    #[test]
    fn explicit_icon_wins_over_type_name_icon() {
        let descriptor = WindowTypeDescriptor::new("Editor.Inspector")
            .with_title("Inspector")
            .with_icon("inspector_icon")
            .with_type_name_as_icon();
        assert_eq!(
            descriptor.default_title_content(),
            Content::new("Inspector").with_icon("inspector_icon")
        );

        let descriptor = WindowTypeDescriptor::new("Editor.Hierarchy")
            .with_title("Hierarchy")
            .with_type_name_as_icon();
        assert_eq!(
            descriptor.default_title_content().icon.as_deref(),
            Some("Editor.Hierarchy")
        );
    }

    #[test]
    fn reregistering_keeps_id() {
        let mut registry = WindowTypeRegistry::default();
        let a = registry.register(WindowTypeDescriptor::new("A"));
        let b = registry.register(WindowTypeDescriptor::new("B"));
        let a2 = registry.register(WindowTypeDescriptor::new("A").with_title("Alpha"));
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_title_content(a).text, "Alpha");
        assert_eq!(registry.find("B"), Some(b));
        assert_eq!(registry.find("C"), None);
    }
}
