//! Generic container state machine shared by every entity store.

use models::customer::Customer;
use models::id::EntityId;
use models::instrument::Instrument;
use models::order::Order;
use models::passport::Passport;
use models::service::Service;

/// Load phase of a container. Stale items are retained through `Error`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Anything held in a container, keyed by its server-assigned id.
pub trait Keyed {
    fn key(&self) -> EntityId;
}

/// In-memory item list plus load phase and last error message.
#[derive(Clone, Debug)]
pub struct EntityState<T> {
    items: Vec<T>,
    phase: Phase,
    error: Option<String>,
}

impl<T> Default for EntityState<T> {
    fn default() -> Self {
        Self { items: Vec::new(), phase: Phase::Idle, error: None }
    }
}

impl<T: Keyed> EntityState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id)
    }

    pub(crate) fn begin(&mut self) {
        self.phase = Phase::Loading;
        self.error = None;
    }

    pub(crate) fn loaded(&mut self, items: Vec<T>) {
        self.items = items;
        self.phase = Phase::Loaded;
        self.error = None;
    }

    /// Close out a confirmed mutation without replacing the list.
    pub(crate) fn confirmed(&mut self) {
        self.phase = Phase::Loaded;
        self.error = None;
    }

    pub(crate) fn failed(&mut self, message: impl Into<String>) {
        self.phase = Phase::Error;
        self.error = Some(message.into());
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub(crate) fn replace(&mut self, item: T) {
        if let Some(slot) = self.items.iter_mut().find(|i| i.key() == item.key()) {
            *slot = item;
        }
    }

    pub(crate) fn remove(&mut self, id: EntityId) {
        self.items.retain(|item| item.key() != id);
    }

    pub(crate) fn modify(&mut self, id: EntityId, f: impl FnOnce(&mut T)) {
        if let Some(item) = self.items.iter_mut().find(|i| i.key() == id) {
            f(item);
        }
    }
}

impl Keyed for Customer {
    fn key(&self) -> EntityId {
        self.id
    }
}

impl Keyed for Instrument {
    fn key(&self) -> EntityId {
        self.id
    }
}

impl Keyed for Service {
    fn key(&self) -> EntityId {
        self.id
    }
}

impl Keyed for Order {
    fn key(&self) -> EntityId {
        self.id
    }
}

impl Keyed for Passport {
    fn key(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: EntityId,
        label: &'static str,
    }

    impl Keyed for Item {
        fn key(&self) -> EntityId {
            self.id
        }
    }

    fn item(label: &'static str) -> Item {
        Item { id: EntityId::new(), label }
    }

    #[test]
    fn starts_idle_and_empty() {
        let state: EntityState<Item> = EntityState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.items().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn failure_keeps_stale_items_and_records_message() {
        let mut state = EntityState::default();
        state.loaded(vec![item("a"), item("b")]);
        state.begin();
        state.failed("backend unavailable");
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.error(), Some("backend unavailable"));
    }

    #[test]
    fn begin_clears_a_previous_error() {
        let mut state: EntityState<Item> = EntityState::default();
        state.failed("boom");
        state.begin();
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.error().is_none());
    }

    #[test]
    fn remove_drops_exactly_the_matching_item() {
        let mut state = EntityState::default();
        let victim = item("b");
        let victim_id = victim.id;
        state.loaded(vec![item("a"), victim, item("c")]);
        state.remove(victim_id);
        assert_eq!(state.items().len(), 2);
        assert!(state.items().iter().all(|i| i.key() != victim_id));
    }

    #[test]
    fn replace_swaps_in_place_by_key() {
        let mut state = EntityState::default();
        let first = item("a");
        let id = first.id;
        state.loaded(vec![first, item("b")]);
        state.replace(Item { id, label: "a2" });
        assert_eq!(state.get(id).map(|i| i.label), Some("a2"));
        assert_eq!(state.items().len(), 2);
    }
}
