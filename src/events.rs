/// Handle returned by [`Emitter::subscribe`]; pass it back to
/// [`Emitter::unsubscribe`] to detach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// A typed subscriber list with an explicit attach/detach contract.
///
/// Subscribers are invoked in subscription order. Unsubscribing an unknown id
/// is a no-op and returns false.
pub struct Emitter<E> {
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&E)>)>,
    next_id: u64,
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, f: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, f) in &mut self.subscribers {
            f(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_subscribers_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut em = Emitter::new();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            em.subscribe(move |v: &i32| seen.borrow_mut().push((tag, *v)));
        }
        em.emit(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn unsubscribe_detaches_and_is_idempotent() {
        let seen = Rc::new(RefCell::new(0));
        let mut em = Emitter::new();
        let id = {
            let seen = Rc::clone(&seen);
            em.subscribe(move |_: &()| *seen.borrow_mut() += 1)
        };
        em.emit(&());
        assert!(em.unsubscribe(id));
        assert!(!em.unsubscribe(id));
        em.emit(&());
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut em = Emitter::<()>::new();
        let a = em.subscribe(|_| {});
        em.unsubscribe(a);
        let b = em.subscribe(|_| {});
        assert_ne!(a, b);
    }
}
