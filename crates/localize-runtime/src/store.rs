//! Single-threaded store and identity-based change notification.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use tracing::debug;

use crate::action::Action;
use crate::error::RuntimeResult;
use crate::reducer::{localize_reducer, try_localize_reducer};
use crate::selectors::get_translate;
use crate::state::LocalizeState;
use crate::translate::Translate;

pub trait Store {
    type State;

    fn get_state(&self) -> Arc<Self::State>;

    /// Registers `listener`, called after every dispatch until the returned
    /// subscription is dropped or unsubscribed.
    fn subscribe(&self, listener: Box<dyn FnMut()>) -> Subscription;
}

/// Handle to a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

type Listener = Rc<RefCell<Box<dyn FnMut()>>>;

struct ListenerEntry {
    id: u64,
    active: Rc<Cell<bool>>,
    callback: Listener,
}

pub struct LocalizeStore {
    state: RefCell<Arc<LocalizeState>>,
    listeners: Rc<RefCell<Vec<ListenerEntry>>>,
    next_id: Cell<u64>,
}

impl LocalizeStore {
    pub fn new() -> Self {
        Self::with_state(LocalizeState::default())
    }

    pub fn with_state(state: LocalizeState) -> Self {
        Self {
            state: RefCell::new(Arc::new(state)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Reduces `action` into the current state and notifies every listener.
    pub fn dispatch(&self, action: &Action) {
        let next = localize_reducer(&self.get_state(), action);
        self.replace_state(next);
    }

    /// Like [`dispatch`](Self::dispatch), but returns rejected actions as
    /// errors without notifying.
    pub fn try_dispatch(&self, action: &Action) -> RuntimeResult<()> {
        let next = try_localize_reducer(&self.get_state(), action)?;
        self.replace_state(next);
        Ok(())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn translate(&self) -> Translate {
        get_translate(&self.get_state())
    }

    fn replace_state(&self, next: Arc<LocalizeState>) {
        *self.state.borrow_mut() = next;
        self.notify();
    }

    fn notify(&self) {
        let snapshot: Vec<(Rc<Cell<bool>>, Listener)> = self
            .listeners
            .borrow()
            .iter()
            .map(|entry| (Rc::clone(&entry.active), Rc::clone(&entry.callback)))
            .collect();
        for (active, callback) in snapshot {
            if !active.get() {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut callback) => callback(),
                Err(_) => debug!("skipping listener that is already running"),
            }
        }
    }
}

impl Default for LocalizeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for LocalizeStore {
    type State = LocalizeState;

    fn get_state(&self) -> Arc<LocalizeState> {
        Arc::clone(&self.state.borrow())
    }

    fn subscribe(&self, listener: Box<dyn FnMut()>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let active = Rc::new(Cell::new(true));
        self.listeners.borrow_mut().push(ListenerEntry {
            id,
            active: Rc::clone(&active),
            callback: Rc::new(RefCell::new(listener)),
        });
        let listeners: Weak<RefCell<Vec<ListenerEntry>>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            active.set(false);
            if let Some(listeners) = listeners.upgrade() {
                if let Ok(mut listeners) = listeners.try_borrow_mut() {
                    listeners.retain(|entry| entry.id != id);
                }
            }
        })
    }
}

impl std::fmt::Debug for LocalizeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizeStore")
            .field("state", &self.state.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

struct ChangeWatcher<T, F> {
    last_seen: Option<Arc<T>>,
    on_change: F,
}

impl<T, F> ChangeWatcher<T, F>
where
    F: FnMut(Option<Arc<T>>),
{
    fn observe(&mut self, next: Arc<T>) {
        let unchanged = self
            .last_seen
            .as_ref()
            .is_some_and(|last| Arc::ptr_eq(last, &next));
        if unchanged {
            return;
        }
        let previous = self.last_seen.replace(next);
        (self.on_change)(previous);
    }
}

/// Calls `on_change(previous)` whenever the store's state snapshot changes
/// identity.
///
/// The comparison runs once before returning, so `on_change` first sees
/// `None`. Dispatches that return the same snapshot are not reported.
pub fn store_did_change<S, F>(store: &Rc<S>, on_change: F) -> Subscription
where
    S: Store + 'static,
    S::State: 'static,
    F: FnMut(Option<Arc<S::State>>) + 'static,
{
    let watcher = Rc::new(RefCell::new(ChangeWatcher {
        last_seen: None,
        on_change,
    }));
    let weak_store: Weak<S> = Rc::downgrade(store);
    let listener = {
        let watcher = Rc::clone(&watcher);
        move || {
            let Some(store) = weak_store.upgrade() else {
                return;
            };
            let next = store.get_state();
            if let Ok(mut watcher) = watcher.try_borrow_mut() {
                watcher.observe(next);
            }
        }
    };
    let subscription = store.subscribe(Box::new(listener));
    watcher.borrow_mut().observe(store.get_state());
    subscription
}
