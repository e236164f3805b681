//! Open/closed flag for the resource modal

use super::observable::{Observable, Subscription};

#[derive(Debug, Clone, Default)]
pub struct ModalVisibility {
    open: Observable<bool>,
}

impl ModalVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        tracing::debug!("modal: open");
        self.open.set(true);
    }

    pub fn close(&self) {
        tracing::debug!("modal: close");
        self.open.set(false);
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn subscribe(&self, f: impl Fn(&bool) + 'static) -> Subscription {
        self.open.subscribe(f)
    }

    pub fn subscriber_count(&self) -> usize {
        self.open.subscriber_count()
    }
}
