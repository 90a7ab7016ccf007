//! Value-change observers.

use std::rc::Rc;

/// Delivered to observers after the slider value changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderEvent {
    /// The new domain value.
    pub value: f64,
}

/// Receives [`SliderEvent`]s from a slider.
///
/// Implemented for every `Fn(&SliderEvent)` closure.
pub trait SliderObserver {
    fn on_slider_event(&self, event: &SliderEvent);
}

impl<F: Fn(&SliderEvent)> SliderObserver for F {
    fn on_slider_event(&self, event: &SliderEvent) {
        self(event)
    }
}

/// Ordered set of observers keyed by `Rc` identity.
#[derive(Default)]
pub(crate) struct Observers {
    list: Vec<Rc<dyn SliderObserver>>,
}

fn same(a: &Rc<dyn SliderObserver>, b: &Rc<dyn SliderObserver>) -> bool {
    // Data pointers only; vtable pointers are not unique.
    std::ptr::eq(
        Rc::as_ptr(a) as *const (),
        Rc::as_ptr(b) as *const (),
    )
}

impl Observers {
    /// Returns `false` if the observer was already registered.
    pub fn add(&mut self, observer: Rc<dyn SliderObserver>) -> bool {
        if self.list.iter().any(|o| same(o, &observer)) {
            return false;
        }
        self.list.push(observer);
        true
    }

    /// Returns `false` if the observer was not registered.
    pub fn remove(&mut self, observer: &Rc<dyn SliderObserver>) -> bool {
        let before = self.list.len();
        self.list.retain(|o| !same(o, observer));
        self.list.len() != before
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Deliver `event` to every observer in registration order.
    ///
    /// Observers only receive the event, so the list cannot change while it
    /// is being delivered.
    pub fn notify(&self, event: &SliderEvent) {
        for observer in &self.list {
            observer.on_slider_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn registration_is_idempotent() {
        let mut observers = Observers::default();
        let a: Rc<dyn SliderObserver> = Rc::new(|_: &SliderEvent| {});
        assert!(observers.add(a.clone()));
        assert!(!observers.add(a.clone()));
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn removing_unknown_observer_is_noop() {
        let mut observers = Observers::default();
        let a: Rc<dyn SliderObserver> = Rc::new(|_: &SliderEvent| {});
        let b: Rc<dyn SliderObserver> = Rc::new(|_: &SliderEvent| {});
        observers.add(a.clone());
        assert!(!observers.remove(&b));
        assert!(observers.remove(&a));
        assert!(!observers.remove(&a));
        assert_eq!(observers.len(), 0);
    }

    #[test]
    fn notify_keeps_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::default();
        for tag in 0..3 {
            let seen = seen.clone();
            observers.add(Rc::new(move |_: &SliderEvent| seen.borrow_mut().push(tag)));
        }
        observers.notify(&SliderEvent { value: 1.0 });
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }
}
