use crate::window::registry::{Geometry, Window, WindowId, WindowRegistry, MAXIMIZED_GEOMETRY};
use serde::Serialize;
use tracing::{debug, instrument};

/// Seam to the rendering layer: one call per window whose icon indicator must be refreshed.
pub trait IconSync {
    fn on_window_active_changed(&mut self, id: &WindowId, is_active: bool);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconSignal {
    pub window: WindowId,
    pub is_active: bool,
}

/// Collects signals so the caller can forward them after each event.
impl IconSync for Vec<IconSignal> {
    fn on_window_active_changed(&mut self, id: &WindowId, is_active: bool) {
        self.push(IconSignal {
            window: id.clone(),
            is_active,
        });
    }
}

// Unknown ids are a silent no-op by policy; only the debug log records them.
fn known<'a>(registry: &'a mut WindowRegistry, op: &str, id: &WindowId) -> Option<&'a mut Window> {
    match registry.get_mut(id) {
        Ok(window) => Some(window),
        Err(e) => {
            debug!(op = %op, error = %e, "Ignoring window operation");
            None
        }
    }
}

/// Exclusive visibility control over a fixed set of windows.
#[derive(Debug)]
pub struct WindowManager<S: IconSync> {
    registry: WindowRegistry,
    active: Option<WindowId>,
    icons: S,
}

impl<S: IconSync> WindowManager<S> {
    pub fn new(registry: WindowRegistry, icons: S) -> Self {
        Self {
            registry,
            active: None,
            icons,
        }
    }

    #[instrument(skip(self, id), fields(window = %id))]
    pub fn show(&mut self, id: &WindowId) {
        if known(&mut self.registry, "show", id).is_none() {
            return;
        }

        for window in self.registry.iter_mut().filter(|w| &w.id != id) {
            window.is_active = false;
            self.icons.on_window_active_changed(&window.id, false);
        }

        if let Some(window) = known(&mut self.registry, "show", id) {
            window.is_active = true;
            window.is_minimized = false;
            self.icons.on_window_active_changed(id, true);
            self.active = Some(id.clone());
            debug!("Window shown");
        }
    }

    #[instrument(skip(self, id), fields(window = %id))]
    pub fn hide(&mut self, id: &WindowId) {
        let Some(window) = known(&mut self.registry, "hide", id) else {
            return;
        };
        window.is_active = false;
        self.icons.on_window_active_changed(id, false);
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        debug!("Window hidden");
    }

    pub fn toggle(&mut self, id: &WindowId) {
        if self.is_active(id) {
            self.hide(id);
        } else {
            self.show(id);
        }
    }

    #[instrument(skip(self, id), fields(window = %id))]
    pub fn minimize(&mut self, id: &WindowId) {
        let Some(window) = known(&mut self.registry, "minimize", id) else {
            return;
        };
        window.is_active = false;
        window.is_minimized = true;
        self.icons.on_window_active_changed(id, false);
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        debug!("Window minimized");
    }

    #[instrument(skip(self, id), fields(window = %id))]
    pub fn maximize(&mut self, id: &WindowId) {
        if let Some(window) = known(&mut self.registry, "maximize", id) {
            window.geometry = Some(MAXIMIZED_GEOMETRY);
        }
    }

    /// Drops the geometry override set by `maximize`.
    #[instrument(skip(self, id), fields(window = %id))]
    pub fn restore(&mut self, id: &WindowId) {
        if let Some(window) = known(&mut self.registry, "restore", id) {
            window.geometry = None;
        }
    }

    pub fn is_active(&self, id: &WindowId) -> bool {
        self.registry.get(id).map(|w| w.is_active).unwrap_or(false)
    }

    pub fn is_minimized(&self, id: &WindowId) -> bool {
        self.registry.get(id).map(|w| w.is_minimized).unwrap_or(false)
    }

    pub fn geometry(&self, id: &WindowId) -> Option<Geometry> {
        self.registry.get(id).ok().and_then(|w| w.geometry)
    }

    pub fn active_window(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    pub fn window(&self, id: &WindowId) -> Option<&Window> {
        self.registry.get(id).ok()
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.registry.iter()
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.registry.contains(id)
    }

    pub fn icon_sync(&self) -> &S {
        &self.icons
    }

    pub fn icon_sync_mut(&mut self) -> &mut S {
        &mut self.icons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> WindowManager<Vec<IconSignal>> {
        let registry = WindowRegistry::from_manifest(
            ["about", "projects", "terminal"].into_iter().map(WindowId::from),
        );
        WindowManager::new(registry, Vec::new())
    }

    fn id(s: &str) -> WindowId {
        WindowId::from(s)
    }

    fn active_count(wm: &WindowManager<Vec<IconSignal>>) -> usize {
        wm.windows().filter(|w| w.is_active).count()
    }

    fn snapshot(wm: &WindowManager<Vec<IconSignal>>) -> (Vec<Window>, Option<WindowId>) {
        (wm.windows().cloned().collect(), wm.active_window().cloned())
    }

    #[test]
    fn show_is_exclusive_and_syncs_icons() {
        let mut wm = manager();
        wm.show(&id("about"));
        wm.icon_sync_mut().clear();

        wm.show(&id("terminal"));
        assert!(wm.is_active(&id("terminal")));
        assert!(!wm.is_active(&id("about")));
        assert_eq!(wm.active_window(), Some(&id("terminal")));
        assert_eq!(active_count(&wm), 1);

        let signals = wm.icon_sync();
        assert_eq!(signals.len(), 3);
        assert_eq!(
            signals.last(),
            Some(&IconSignal { window: id("terminal"), is_active: true })
        );
        assert!(signals[..2].iter().all(|s| !s.is_active));
    }

    #[test]
    fn show_twice_is_idempotent() {
        let mut wm = manager();
        wm.minimize(&id("projects"));
        wm.show(&id("about"));
        let first = snapshot(&wm);
        wm.show(&id("about"));
        assert_eq!(snapshot(&wm), first);
    }

    #[test]
    fn show_keeps_other_minimized_flags() {
        let mut wm = manager();
        wm.minimize(&id("projects"));
        wm.show(&id("about"));
        assert!(wm.is_minimized(&id("projects")));
        wm.show(&id("projects"));
        assert!(!wm.is_minimized(&id("projects")));
    }

    #[test]
    fn toggle_closes_an_open_window() {
        let mut wm = manager();
        wm.toggle(&id("about"));
        assert!(wm.is_active(&id("about")));
        wm.toggle(&id("about"));
        assert!(!wm.is_active(&id("about")));
        assert_eq!(wm.active_window(), None);
        assert_eq!(active_count(&wm), 0);
    }

    #[test]
    fn hide_of_inactive_window_keeps_active_pointer() {
        let mut wm = manager();
        wm.show(&id("about"));
        wm.hide(&id("projects"));
        assert_eq!(wm.active_window(), Some(&id("about")));
        assert_eq!(
            wm.icon_sync().last(),
            Some(&IconSignal { window: id("projects"), is_active: false })
        );
    }

    #[test]
    fn minimize_deactivates() {
        let mut wm = manager();
        wm.show(&id("terminal"));
        wm.minimize(&id("terminal"));
        assert!(!wm.is_active(&id("terminal")));
        assert!(wm.is_minimized(&id("terminal")));
        assert_eq!(wm.active_window(), None);
    }

    #[test]
    fn maximize_sets_geometry_without_touching_flags() {
        let mut wm = manager();
        wm.show(&id("about"));
        let signals_before = wm.icon_sync().len();
        wm.maximize(&id("about"));
        wm.maximize(&id("about"));
        assert_eq!(wm.geometry(&id("about")), Some(MAXIMIZED_GEOMETRY));
        assert!(wm.is_active(&id("about")));
        assert_eq!(wm.icon_sync().len(), signals_before);
        wm.restore(&id("about"));
        assert_eq!(wm.geometry(&id("about")), None);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut wm = manager();
        wm.show(&id("about"));
        let before = snapshot(&wm);
        let signals_before = wm.icon_sync().len();
        let ops: [fn(&mut WindowManager<Vec<IconSignal>>, &WindowId); 6] = [
            WindowManager::show,
            WindowManager::hide,
            WindowManager::toggle,
            WindowManager::minimize,
            WindowManager::maximize,
            WindowManager::restore,
        ];
        for op in ops {
            op(&mut wm, &id("nope"));
        }
        assert_eq!(snapshot(&wm), before);
        assert_eq!(wm.icon_sync().len(), signals_before);
    }

    #[test]
    fn at_most_one_active_window_across_sequences() {
        let mut wm = manager();
        let ids = ["about", "projects", "terminal", "ghost"];
        // Deterministic pseudo-random walk over show/hide/toggle.
        let mut seed: u32 = 7;
        for _ in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let target = id(ids[(seed >> 8) as usize % ids.len()]);
            match (seed >> 4) % 3 {
                0 => wm.show(&target),
                1 => wm.hide(&target),
                _ => wm.toggle(&target),
            }
            assert!(active_count(&wm) <= 1);
            match wm.active_window() {
                Some(active) => assert!(wm.is_active(active)),
                None => assert_eq!(active_count(&wm), 0),
            }
        }
    }
}
