use std::cell::{Cell, RefCell};
use std::rc::Rc;
use super::snapshot::GestureSnapshot;
use crate::api::types::GestureRecord;

/// Discrete events published by the gesture machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The primary pointer went down; the pull started.
    DrawStart(GestureSnapshot),
    /// The primary pointer moved with the pull past the minimum distance.
    Drawing(GestureSnapshot),
    /// The pull ended with a shot. Always follows `Release`.
    DrawEnd(GestureSnapshot),
    /// The primary pointer lifted with enough pull; carries release velocity.
    Release(GestureSnapshot),
    /// The secondary pointer moved.
    AimAdjust(GestureSnapshot),
    /// The gesture was abandoned. No shot follows.
    Cancel,
}

/// Discriminant of a `GestureEvent`, for per-kind subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureEventKind {
    DrawStart,
    Drawing,
    DrawEnd,
    Release,
    AimAdjust,
    Cancel,
}

impl GestureEventKind {
    /// Stable numeric code used in flat records.
    pub fn code(self) -> f32 {
        match self {
            GestureEventKind::DrawStart => 1.0,
            GestureEventKind::Drawing => 2.0,
            GestureEventKind::DrawEnd => 3.0,
            GestureEventKind::Release => 4.0,
            GestureEventKind::AimAdjust => 5.0,
            GestureEventKind::Cancel => 6.0,
        }
    }
}

impl GestureEvent {
    pub fn kind(&self) -> GestureEventKind {
        match self {
            GestureEvent::DrawStart(_) => GestureEventKind::DrawStart,
            GestureEvent::Drawing(_) => GestureEventKind::Drawing,
            GestureEvent::DrawEnd(_) => GestureEventKind::DrawEnd,
            GestureEvent::Release(_) => GestureEventKind::Release,
            GestureEvent::AimAdjust(_) => GestureEventKind::AimAdjust,
            GestureEvent::Cancel => GestureEventKind::Cancel,
        }
    }

    /// The snapshot carried by the event; `None` for `Cancel`.
    pub fn snapshot(&self) -> Option<&GestureSnapshot> {
        match self {
            GestureEvent::DrawStart(s)
            | GestureEvent::Drawing(s)
            | GestureEvent::DrawEnd(s)
            | GestureEvent::Release(s)
            | GestureEvent::AimAdjust(s) => Some(s),
            GestureEvent::Cancel => None,
        }
    }

    pub fn to_record(&self) -> GestureRecord {
        let code = self.kind().code();
        match self.snapshot() {
            Some(s) => s.to_record(code),
            None => GestureRecord {
                kind: code,
                ..GestureRecord::default()
            },
        }
    }
}

/// Handle returned by `EventBus::subscribe`; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Rc<dyn Fn(&GestureEvent)>;

struct Entry {
    id: ListenerId,
    filter: Option<GestureEventKind>,
    listener: Listener,
}

#[derive(Default)]
struct BusInner {
    entries: RefCell<Vec<Entry>>,
    next_id: Cell<u32>,
}

/// Ordered observer list for gesture events.
///
/// Cloning the bus yields another handle to the same list, so a listener can
/// keep a handle and unsubscribe itself (or others) while being called.
/// Dispatch iterates over a snapshot taken before the first call; changes
/// made during dispatch apply from the next event on.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen to one kind of event.
    pub fn on(&self, kind: GestureEventKind, listener: impl Fn(&GestureEvent) + 'static) -> ListenerId {
        self.push(Some(kind), Rc::new(listener))
    }

    /// Listen to every event.
    pub fn subscribe(&self, listener: impl Fn(&GestureEvent) + 'static) -> ListenerId {
        self.push(None, Rc::new(listener))
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut entries = self.inner.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }

    /// Call every matching listener in registration order.
    pub fn dispatch(&self, event: &GestureEvent) {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .inner
            .entries
            .borrow()
            .iter()
            .filter(|e| e.filter.map_or(true, |k| k == kind))
            .map(|e| Rc::clone(&e.listener))
            .collect();
        for listener in targets {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, filter: Option<GestureEventKind>, listener: Listener) -> ListenerId {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0.wrapping_add(1));
        self.inner.entries.borrow_mut().push(Entry { id, filter, listener });
        id
    }
}
