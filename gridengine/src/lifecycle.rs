//! Lifecycle hooks registered with a framework adapter.
//!
//! A host fires these when it mounts, updates or tears down the element an
//! engine renders into. Hooks are plain closures; the adapter stores them and
//! calls the matching `call_on_*` method.

use std::rc::Rc;

use crate::adapter::HostElement;

pub type MountHook = Rc<dyn Fn(&HostElement)>;
pub type Hook = Rc<dyn Fn()>;

/// Lifecycle hook closures for one adapter.
#[derive(Default, Clone)]
pub struct LifecycleHooks {
    /// Called when the host element is attached.
    pub on_mount: Option<MountHook>,
    /// Called when the host element is detached.
    pub on_unmount: Option<Hook>,
    /// Called when the host re-renders without remounting.
    pub on_update: Option<Hook>,
}

impl LifecycleHooks {
    /// Create empty lifecycle hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call the on_mount hook if present.
    pub fn call_on_mount(&self, element: &HostElement) {
        if let Some(hook) = &self.on_mount {
            hook(element);
        }
    }

    /// Call the on_unmount hook if present.
    pub fn call_on_unmount(&self) {
        if let Some(hook) = &self.on_unmount {
            hook();
        }
    }

    /// Call the on_update hook if present.
    pub fn call_on_update(&self) {
        if let Some(hook) = &self.on_update {
            hook();
        }
    }
}

impl std::fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("on_mount", &self.on_mount.is_some())
            .field("on_unmount", &self.on_unmount.is_some())
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}
