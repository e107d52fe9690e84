use crate::error::AppError;
use crate::window::registry::WindowId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "window")]
pub enum MenuAction {
    OpenWindow(WindowId),
    CycleBackground,
    ToggleTheme,
    ToggleAudio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

/// Right-click desktop menu: one "Open" entry per window, then the global toggles.
#[derive(Debug, Clone)]
pub struct ContextMenu {
    items: Vec<MenuItem>,
}

fn title_case(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ContextMenu {
    pub fn for_windows<'a, I>(windows: I) -> Self
    where
        I: IntoIterator<Item = &'a WindowId>,
    {
        let mut items: Vec<MenuItem> = windows
            .into_iter()
            .map(|id| MenuItem {
                label: format!("Open {}", title_case(id.as_str())),
                action: MenuAction::OpenWindow(id.clone()),
            })
            .collect();
        items.push(MenuItem {
            label: "Change Background".to_string(),
            action: MenuAction::CycleBackground,
        });
        items.push(MenuItem {
            label: "Toggle Theme".to_string(),
            action: MenuAction::ToggleTheme,
        });
        items.push(MenuItem {
            label: "Toggle Sound".to_string(),
            action: MenuAction::ToggleAudio,
        });
        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn select(&self, index: usize) -> Result<&MenuAction, AppError> {
        self.items
            .get(index)
            .map(|item| &item.action)
            .ok_or_else(|| AppError::UnknownMenuItem(index.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_windows_then_toggles() {
        let ids = [WindowId::from("about"), WindowId::from("terminal")];
        let menu = ContextMenu::for_windows(ids.iter());
        let labels: Vec<&str> = menu.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Open About", "Open Terminal", "Change Background", "Toggle Theme", "Toggle Sound"]
        );
        assert_eq!(
            menu.select(1).unwrap(),
            &MenuAction::OpenWindow(WindowId::from("terminal"))
        );
        assert!(matches!(menu.select(9), Err(AppError::UnknownMenuItem(_))));
    }
}
