use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a virtual application window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(s: &str) -> Self {
        WindowId(s.to_string())
    }
}

impl From<String> for WindowId {
    fn from(s: String) -> Self {
        WindowId(s)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "unit", content = "value")]
pub enum Length {
    Px(u32),
    Percent(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: Length,
    pub height: Length,
    pub top: Length,
    pub left: Length,
}

/// Geometry override applied by `maximize`.
pub const MAXIMIZED_GEOMETRY: Geometry = Geometry {
    width: Length::Percent(100),
    height: Length::Percent(100),
    top: Length::Px(0),
    left: Length::Px(0),
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    pub id: WindowId,
    pub is_active: bool,
    pub is_minimized: bool,
    pub geometry: Option<Geometry>,
}

impl Window {
    fn new(id: WindowId) -> Self {
        Self {
            id,
            is_active: false,
            is_minimized: false,
            geometry: None,
        }
    }
}

/// Fixed set of windows, created once from the manifest and kept in manifest order.
#[derive(Debug, Clone, Default)]
pub struct WindowRegistry {
    windows: Vec<Window>,
}

impl WindowRegistry {
    /// Later duplicates of an id are ignored.
    pub fn from_manifest<I>(manifest: I) -> Self
    where
        I: IntoIterator<Item = WindowId>,
    {
        let mut windows: Vec<Window> = Vec::new();
        for id in manifest {
            if windows.iter().any(|w| w.id == id) {
                continue;
            }
            windows.push(Window::new(id));
        }
        Self { windows }
    }

    pub fn get(&self, id: &WindowId) -> Result<&Window, AppError> {
        self.windows
            .iter()
            .find(|w| &w.id == id)
            .ok_or_else(|| AppError::UnknownWindow(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &WindowId) -> Result<&mut Window, AppError> {
        self.windows
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| AppError::UnknownWindow(id.to_string()))
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.windows.iter().any(|w| &w.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Window> {
        self.windows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_order_is_kept_and_duplicates_skipped() {
        let registry = WindowRegistry::from_manifest(
            ["about", "terminal", "about"].into_iter().map(WindowId::from),
        );
        let ids: Vec<&str> = registry.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["about", "terminal"]);
        assert!(registry.iter().all(|w| !w.is_active && !w.is_minimized && w.geometry.is_none()));
    }

    #[test]
    fn lookup_of_unknown_id_is_an_error() {
        let registry = WindowRegistry::from_manifest([WindowId::from("about")]);
        assert!(registry.get(&WindowId::from("about")).is_ok());
        assert!(matches!(
            registry.get(&WindowId::from("games")),
            Err(AppError::UnknownWindow(id)) if id == "games"
        ));
    }

    #[test]
    fn geometry_serializes_with_units() {
        let json = serde_json::to_value(MAXIMIZED_GEOMETRY).unwrap();
        assert_eq!(json["width"]["unit"], "percent");
        assert_eq!(json["width"]["value"], 100);
        assert_eq!(json["top"]["unit"], "px");
    }
}
