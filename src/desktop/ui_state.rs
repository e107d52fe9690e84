use serde::Serialize;

/// Scroll offset past which the navigation bar switches to its solid style.
pub const NAV_SCROLL_THRESHOLD: f64 = 50.0;

/// Presentation flags the page toggles as CSS classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UiFlags {
    pub nav_scrolled: bool,
    pub keyboard_navigation: bool,
    pub mobile_menu_open: bool,
}

impl UiFlags {
    pub fn handle_scroll(&mut self, offset: f64) {
        self.nav_scrolled = offset > NAV_SCROLL_THRESHOLD;
    }

    pub fn key_down(&mut self, key: &str) {
        if key == "Tab" {
            self.keyboard_navigation = true;
        }
    }

    pub fn mouse_down(&mut self) {
        self.keyboard_navigation = false;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn follow_nav_link(&mut self) {
        self.mobile_menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_threshold_is_exclusive() {
        let mut ui = UiFlags::default();
        ui.handle_scroll(50.0);
        assert!(!ui.nav_scrolled);
        ui.handle_scroll(50.5);
        assert!(ui.nav_scrolled);
        ui.handle_scroll(0.0);
        assert!(!ui.nav_scrolled);
    }

    #[test]
    fn tab_enables_keyboard_navigation_until_mouse_down() {
        let mut ui = UiFlags::default();
        ui.key_down("Enter");
        assert!(!ui.keyboard_navigation);
        ui.key_down("Tab");
        assert!(ui.keyboard_navigation);
        ui.mouse_down();
        assert!(!ui.keyboard_navigation);
    }

    #[test]
    fn nav_link_closes_mobile_menu() {
        let mut ui = UiFlags::default();
        ui.toggle_mobile_menu();
        assert!(ui.mobile_menu_open);
        ui.follow_nav_link();
        assert!(!ui.mobile_menu_open);
    }
}
