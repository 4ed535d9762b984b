use model::{group::Group, measure::Measure};
use utility::id::Id;

/// Emitted after a persisted mutation has been committed.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    MeasureSaved(Id<Measure>),
    MeasureDeleted(Id<Measure>),
    GroupSaved(Id<Group>),
    GroupDeleted(Id<Group>),
}

type Listener = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Plain on-change callbacks. Renderers and list views register a closure
/// and redraw from the database when it fires; no data-binding framework is
/// involved.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<Listener>,
}

impl ChangeNotifier {
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn notify(&self, event: &ChangeEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn notifies_every_listener() {
        let seen_a = Arc::new(Mutex::new(Vec::new()));
        let seen_b = Arc::new(Mutex::new(Vec::new()));

        let mut notifier = ChangeNotifier::default();
        let sink = Arc::clone(&seen_a);
        notifier.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        let sink = Arc::clone(&seen_b);
        notifier.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        let event = ChangeEvent::MeasureDeleted(Id::new("m1".to_owned()));
        notifier.notify(&event);

        assert_eq!(seen_a.lock().unwrap().as_slice(), &[event.clone()]);
        assert_eq!(seen_b.lock().unwrap().as_slice(), &[event]);
    }

    #[test]
    fn notifying_without_listeners_is_a_no_op() {
        let notifier = ChangeNotifier::default();
        notifier.notify(&ChangeEvent::GroupDeleted(Id::new("g1".to_owned())));
    }
}
