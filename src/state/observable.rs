//! Observer-list backed value cell
//!
//! `Observable<V>` is the building block for every piece of shared state in
//! kubedash: the per-field cells of a form, the auth status, and the modal
//! flag. It holds a current value and an ordered list of subscribers.
//!
//! Semantics:
//! - `set` stores the new value first, then calls every subscriber that was
//!   registered when the fan-out started, in registration order.
//! - Subscribers added during a fan-out only see later changes.
//! - A `set` made from inside a subscriber stores its value at once but is
//!   delivered after the running fan-out, so every subscriber sees values in
//!   set order and the last one it sees matches `get`.
//! - `subscribe` never replays the current value.
//! - There is no equality check; setting the same value notifies again.
//!
//! Everything runs on one thread, so handles are `Rc` based and not `Send`.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<V> = Rc<dyn Fn(&V)>;

struct Inner<V> {
    value: RefCell<V>,
    subscribers: RefCell<Vec<(u64, Callback<V>)>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
    pending: RefCell<VecDeque<V>>,
}

/// Shared handle to an observable value. Cloning the handle shares the value.
pub struct Observable<V> {
    inner: Rc<Inner<V>>,
}

/// Non-owning handle, used by controls so the owning form decides the
/// lifetime of its cells.
pub struct WeakObservable<V> {
    inner: Weak<Inner<V>>,
}

/// Returned by [`Observable::subscribe`]; call [`Subscription::unsubscribe`]
/// to remove the callback. Dropping it without calling keeps the callback.
#[must_use = "dropping a Subscription keeps the callback registered; call unsubscribe() to remove it"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl<V: 'static> Observable<V> {
    pub fn new(value: V) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                notifying: Cell::new(false),
                pending: RefCell::new(VecDeque::new()),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> V
    where
        V: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: V)
    where
        V: Clone,
    {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    /// Mutate the value in place and notify subscribers
    pub fn update(&self, f: impl FnOnce(&mut V))
    where
        V: Clone,
    {
        f(&mut self.inner.value.borrow_mut());
        self.notify();
    }

    /// Register a callback for future changes
    pub fn subscribe(&self, f: impl Fn(&V) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push((id, Rc::new(f)));

        let weak = Rc::downgrade(&self.inner);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    pub fn downgrade(&self) -> WeakObservable<V> {
        WeakObservable {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn notify(&self)
    where
        V: Clone,
    {
        self.inner.pending.borrow_mut().push_back(self.get());
        if self.inner.notifying.replace(true) {
            return;
        }
        let _reset = NotifyingReset(&self.inner);

        // No borrow is held while subscribers run, so they may subscribe,
        // unsubscribe or set reentrantly.
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(value) = next else {
                break;
            };
            self.fan_out(&value);
        }
    }

    fn fan_out(&self, value: &V) {
        let snapshot: Vec<(u64, Callback<V>)> = self.inner.subscribers.borrow().clone();

        for (id, callback) in snapshot {
            let still_registered = self
                .inner
                .subscribers
                .borrow()
                .iter()
                .any(|(sid, _)| *sid == id);
            if !still_registered {
                continue;
            }

            callback(value);
        }
    }
}

/// Ends a fan-out, even one a subscriber panicked out of
struct NotifyingReset<'a, V>(&'a Inner<V>);

impl<V> Drop for NotifyingReset<'_, V> {
    fn drop(&mut self) {
        self.0.pending.borrow_mut().clear();
        self.0.notifying.set(false);
    }
}

impl<V> Clone for Observable<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V: Default + 'static> Default for Observable<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V: fmt::Debug> fmt::Debug for Observable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<V: 'static> WeakObservable<V> {
    pub fn upgrade(&self) -> Option<Observable<V>> {
        self.inner.upgrade().map(|inner| Observable { inner })
    }
}

impl<V> Clone for WeakObservable<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_initial_value() {
        let cell = Observable::new(String::from("start"));
        assert_eq!(cell.get(), "start");
    }

    #[test]
    fn test_subscriber_sees_changes_in_order() {
        let cell = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.set(1);
        cell.set(2);

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let cell = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.set(1);
        sub.unsubscribe();
        cell.set(2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn test_no_replay_on_subscribe() {
        let cell = Observable::new(true);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = cell.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_same_value_still_notifies() {
        let cell = Observable::new(5);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = cell.subscribe(move |_| counter.set(counter.get() + 1));

        cell.set(5);
        cell.set(5);

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_subscribers_called_in_registration_order() {
        let cell = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&order);
        let b = Rc::clone(&order);
        let _s1 = cell.subscribe(move |_| a.borrow_mut().push("first"));
        let _s2 = cell.subscribe(move |_| b.borrow_mut().push("second"));

        cell.set(1);

        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_late_subscriber_skipped_for_current_fanout() {
        let cell = Observable::new(0);
        let late_calls = Rc::new(RefCell::new(Vec::new()));
        let handle = cell.clone();
        let late_sink = Rc::clone(&late_calls);
        let registered = Rc::new(Cell::new(false));
        let flag = Rc::clone(&registered);

        let _s = cell.subscribe(move |_| {
            if !flag.get() {
                flag.set(true);
                let sink = Rc::clone(&late_sink);
                let _late = handle.subscribe(move |v| sink.borrow_mut().push(*v));
            }
        });

        cell.set(1);
        assert!(late_calls.borrow().is_empty());

        cell.set(2);
        assert_eq!(*late_calls.borrow(), vec![2]);
    }

    #[test]
    fn test_get_inside_callback_sees_new_value() {
        let cell = Observable::new(String::new());
        let handle = cell.clone();
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        let _s = cell.subscribe(move |_| *sink.borrow_mut() = handle.get());

        cell.set("next".to_string());

        assert_eq!(*seen.borrow(), "next");
    }

    #[test]
    fn test_weak_handle_dies_with_owner() {
        let cell = Observable::new(1);
        let weak = cell.downgrade();
        assert!(weak.upgrade().is_some());
        drop(cell);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_nested_set_delivered_after_current_fanout() {
        let cell = Observable::new(0);

        let first = {
            let cell = cell.clone();
            cell.clone().subscribe(move |v| {
                if *v == 1 {
                    cell.set(2);
                }
            })
        };
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let second = cell.subscribe(move |v| sink.borrow_mut().push(*v));

        cell.set(1);

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(seen.borrow().last().copied(), Some(cell.get()));
        first.unsubscribe();
        second.unsubscribe();
    }

    #[test]
    fn test_nested_set_stores_value_immediately() {
        let cell = Observable::new(0);
        let during = Rc::new(RefCell::new(Vec::new()));

        let setter = {
            let cell = cell.clone();
            cell.clone().subscribe(move |v| {
                if *v == 1 {
                    cell.set(5);
                }
            })
        };
        let reader = {
            let cell = cell.clone();
            let sink = Rc::clone(&during);
            cell.clone().subscribe(move |_| sink.borrow_mut().push(cell.get()))
        };

        cell.set(1);

        assert_eq!(*during.borrow(), vec![5, 5]);
        assert_eq!(cell.get(), 5);
        setter.unsubscribe();
        reader.unsubscribe();
    }
}
