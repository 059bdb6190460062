use std::cell::RefCell;
use std::rc::Rc;

/// Viewport change that may move the overlay's trigger on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    Resize,
    /// Scroll anywhere in the page, including nested scroll areas
    Scroll,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: Vec<u64>,
}

/// Registry of resize/scroll subscriptions for one rendering surface.
///
/// Subscriptions are handed out as [`ListenerGuard`]s and removed when the
/// guard is dropped. Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct ViewportListeners {
    inner: Rc<RefCell<Registry>>,
}

impl ViewportListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> ListenerGuard {
        let mut registry = self.inner.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.active.push(id);
        log::trace!("Viewport listener {} registered", id);
        ListenerGuard {
            id,
            registry: Rc::clone(&self.inner),
        }
    }

    /// Number of subscriptions currently registered
    pub fn active(&self) -> usize {
        self.inner.borrow().active.len()
    }
}

/// A live resize/scroll subscription; unregisters itself on drop
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    registry: Rc<RefCell<Registry>>,
}

impl ListenerGuard {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_registered(&self) -> bool {
        self.registry.borrow().active.contains(&self.id)
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // try_borrow_mut: never panic while unwinding
        if let Ok(mut registry) = self.registry.try_borrow_mut() {
            registry.active.retain(|id| *id != self.id);
            log::trace!("Viewport listener {} removed", self.id);
        }
    }
}
