//! Resource modal: mounted while the modal flag is set, with a picker that
//! switches between the deployment and service views

use std::cell::RefCell;
use std::rc::Rc;

use crate::form::{FieldDescriptor, Form};
use crate::state::{ModalVisibility, Subscription};

pub const TITLE: &str = "Create resource";
pub const PICKER_FIELD: &str = "resource";
pub const CREATE_DEPLOYMENT: &str = "Create deployment";
pub const CREATE_SERVICE: &str = "Create service";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalContent {
    Deployment,
    Service,
}

impl ModalContent {
    /// The first picker option is the deployment view; anything else shows
    /// the service view.
    pub fn from_option(option: &str) -> Self {
        if option == CREATE_DEPLOYMENT {
            ModalContent::Deployment
        } else {
            ModalContent::Service
        }
    }
}

#[derive(Debug, Default)]
struct Mount {
    mounted: bool,
    content: Option<ModalContent>,
}

/// Modal host. Subscribes to [`ModalVisibility`] once and mounts or
/// unmounts itself on every change.
pub struct ResourceModal {
    mount: Rc<RefCell<Mount>>,
    visibility: Option<Subscription>,
    picker: Option<Subscription>,
}

impl ResourceModal {
    pub fn new(modal: &ModalVisibility) -> Self {
        let mount = Rc::new(RefCell::new(Mount::default()));
        let target = Rc::clone(&mount);
        let visibility = modal.subscribe(move |open| {
            let mut m = target.borrow_mut();
            m.mounted = *open;
            if !*open {
                m.content = None;
            }
        });

        Self {
            mount,
            visibility: Some(visibility),
            picker: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.borrow().mounted
    }

    pub fn content(&self) -> Option<ModalContent> {
        self.mount.borrow().content
    }

    pub fn picker_model() -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::select(PICKER_FIELD, [CREATE_DEPLOYMENT, CREATE_SERVICE]).with_placeholder(TITLE)]
    }

    /// Follow the picker's cell: show its current choice now and switch
    /// views whenever it changes. Ignored while unmounted.
    pub fn bind_picker(&mut self, picker: &Form) {
        let Some(cell) = picker.cell(PICKER_FIELD) else {
            return;
        };
        if let Some(old) = self.picker.take() {
            old.unsubscribe();
        }

        let show = {
            let mount = Rc::clone(&self.mount);
            move |option: &String| {
                let mut m = mount.borrow_mut();
                if m.mounted {
                    m.content = Some(ModalContent::from_option(option));
                }
            }
        };
        show(&cell.get());
        self.picker = Some(cell.subscribe(show));
    }

    /// Drop both subscriptions
    pub fn destroy(mut self) {
        if let Some(sub) = self.visibility.take() {
            sub.unsubscribe();
        }
        if let Some(sub) = self.picker.take() {
            sub.unsubscribe();
        }
    }
}

/// Service creation has no form
pub fn service_view_message() -> &'static str {
    "Service creation is not available yet."
}
