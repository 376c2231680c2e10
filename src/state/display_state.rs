//! Which of the two views is on screen

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Folder tree used to choose the picture scope
    #[default]
    Picker,
    /// The current practice picture
    Picture,
}

impl View {
    fn other(self) -> Self {
        match self {
            View::Picker => View::Picture,
            View::Picture => View::Picker,
        }
    }
}

/// Display state holder; the only way to change the active view
#[derive(Debug, Clone, Default)]
pub struct ViewSwitcher {
    active: View,
}

impl ViewSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn is_visible(&self, view: View) -> bool {
        self.active == view
    }

    /// Flip to the other view and return it
    pub fn toggle(&mut self) -> View {
        self.set(self.active.other())
    }

    pub fn show_picture(&mut self) -> View {
        self.set(View::Picture)
    }

    pub fn show_picker(&mut self) -> View {
        self.set(View::Picker)
    }

    fn set(&mut self, view: View) -> View {
        if self.active != view {
            debug!("Switching view {:?} -> {:?}", self.active, view);
        }
        self.active = view;
        view
    }
}
