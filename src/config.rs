/// How the host should lay the dialog out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogStyle {
    /// A centered alert.
    #[default]
    Alert,
    /// A sheet rising from the edge of the host surface.
    Sheet,
}

/// Presentation settings handed to the host alongside the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    pub title: Option<String>,
    pub message: Option<String>,
    pub style: DialogStyle,
    /// Forwarded to both [`display_modal`](crate::HostSurface::display_modal) and
    /// [`dismiss_modal`](crate::HostSurface::dismiss_modal).
    pub animated: bool,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            title: None,
            message: None,
            style: DialogStyle::default(),
            animated: true,
        }
    }
}

impl DialogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn style(mut self, style: DialogStyle) -> Self {
        self.style = style;
        self
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}
