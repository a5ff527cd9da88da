//! Observable UI state containers.
//!
//! Small pieces of cross-component state (sidebar expansion, the active
//! organization, the notification panel, the saved-report set) live in
//! explicit stores with a publish/subscribe contract instead of module-level
//! mutable globals. Stores are created once at app start, never torn down,
//! and reset only by explicit action.

use std::collections::HashSet;

use tokio::sync::watch;

use openrad_core::{Organization, ReportId};

/// A single observable value.
///
/// `get` clones the current value; `set`/`update` publish a new one;
/// `subscribe` yields a receiver that resolves whenever the value changes.
#[derive(Debug)]
pub struct Store<T> {
    state: watch::Sender<T>,
}

impl<T: Clone> Store<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            state: watch::Sender::new(initial),
        }
    }

    /// A snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.state.borrow().clone()
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.state.send_replace(value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.state.send_modify(f);
    }

    /// Observe changes. The receiver sees the current value immediately via
    /// `borrow` and every subsequent change via `changed`.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }
}

/// Sidebar expansion state.
#[derive(Debug)]
pub struct SidebarStore {
    expanded: Store<bool>,
}

impl SidebarStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            expanded: Store::new(false),
        }
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    pub fn toggle(&self) {
        self.expanded.update(|e| *e = !*e);
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.expanded.subscribe()
    }
}

impl Default for SidebarStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The organization whose data the screens currently show.
#[derive(Debug)]
pub struct OrganizationStore {
    current: Store<Option<Organization>>,
}

impl OrganizationStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Store::new(None),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Organization> {
        self.current.get()
    }

    pub fn set(&self, organization: Organization) {
        self.current.set(Some(organization));
    }

    /// Explicit reset, e.g. on sign-out.
    pub fn clear(&self) {
        self.current.set(None);
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Organization>> {
        self.current.subscribe()
    }
}

impl Default for OrganizationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Notification panel open/closed state.
#[derive(Debug)]
pub struct NotificationStore {
    open: Store<bool>,
}

impl NotificationStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: Store::new(false),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle(&self) {
        self.open.update(|o| *o = !*o);
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.open.subscribe()
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The set of reports the current user has bookmarked, mirrored locally so
/// bookmark toggles render without a refetch.
#[derive(Debug)]
pub struct SavedReportsStore {
    saved: Store<HashSet<ReportId>>,
}

impl SavedReportsStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            saved: Store::new(HashSet::new()),
        }
    }

    pub fn save(&self, report_id: ReportId) {
        self.saved.update(|s| {
            s.insert(report_id);
        });
    }

    pub fn unsave(&self, report_id: &ReportId) {
        self.saved.update(|s| {
            s.remove(report_id);
        });
    }

    #[must_use]
    pub fn contains(&self, report_id: &ReportId) -> bool {
        self.saved.state.borrow().contains(report_id)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HashSet<ReportId>> {
        self.saved.subscribe()
    }
}

impl Default for SavedReportsStore {
    fn default() -> Self {
        Self::new()
    }
}

/// All UI stores, created together at app start.
#[derive(Debug, Default)]
pub struct UiStores {
    pub sidebar: SidebarStore,
    pub organization: OrganizationStore,
    pub notifications: NotificationStore,
    pub saved_reports: SavedReportsStore,
}

impl UiStores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_toggle() {
        let store = SidebarStore::new();
        assert!(!store.is_expanded());
        store.toggle();
        assert!(store.is_expanded());
        store.toggle();
        assert!(!store.is_expanded());
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let store = NotificationStore::new();
        let mut rx = store.subscribe();
        assert!(!*rx.borrow());

        store.toggle();
        rx.changed().await.unwrap();
        assert!(*rx.borrow());
    }

    #[test]
    fn test_saved_reports_set_semantics() {
        let store = SavedReportsStore::new();
        let id = ReportId::new("r-1");

        store.save(id.clone());
        store.save(id.clone());
        assert!(store.contains(&id));

        store.unsave(&id);
        assert!(!store.contains(&id));
    }

    #[test]
    fn test_organization_store_reset() {
        let store = OrganizationStore::new();
        assert!(store.current().is_none());

        let org: Organization = serde_json::from_str(
            r#"{"id": "org-1", "name": "acme-health", "dicomUrl": "https://pacs.acme.test"}"#,
        )
        .unwrap();
        store.set(org);
        assert_eq!(store.current().unwrap().name, "acme-health");

        store.clear();
        assert!(store.current().is_none());
    }
}
