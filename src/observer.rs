//! Change notification for fermentable records.
//!
//! A [`Fermentable`](crate::Fermentable) owns an [`ObserverList`]. Every
//! setter that actually changes a value calls every attached observer inline,
//! in attach order, after the field has been updated.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a live fermentable instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    pub(crate) fn next() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies which attribute a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FermentableField {
    Name,
    Type,
    Amount,
    Yield,
    Color,
    AfterBoil,
    Origin,
    Supplier,
    Notes,
    CoarseFineDiff,
    Moisture,
    DiastaticPower,
    Protein,
    MaxInBatch,
    IsMashed,
    RecommendMash,
    IbuGalPerLb,
}

impl FermentableField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::Amount => "amount",
            Self::Yield => "yield",
            Self::Color => "color",
            Self::AfterBoil => "after_boil",
            Self::Origin => "origin",
            Self::Supplier => "supplier",
            Self::Notes => "notes",
            Self::CoarseFineDiff => "coarse_fine_diff",
            Self::Moisture => "moisture",
            Self::DiastaticPower => "diastatic_power",
            Self::Protein => "protein",
            Self::MaxInBatch => "max_in_batch",
            Self::IsMashed => "is_mashed",
            Self::RecommendMash => "recommend_mash",
            Self::IbuGalPerLb => "ibu_gal_per_lb",
        }
    }
}

/// Receives change notifications from fermentables it is attached to
pub trait FermentableObserver: Send + Sync {
    fn changed(&self, source: ObjectId, field: FermentableField);
}

/// Token returned by `attach`, used to detach the same observer later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(u64);

/// Ordered set of attached observers
#[derive(Default)]
pub struct ObserverList {
    entries: Vec<(ObserverHandle, Arc<dyn FermentableObserver>)>,
    next_handle: u64,
}

impl ObserverList {
    pub fn attach(&mut self, observer: Arc<dyn FermentableObserver>) -> ObserverHandle {
        let handle = ObserverHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push((handle, observer));
        handle
    }

    /// Returns false if the handle was not attached.
    pub fn detach(&mut self, handle: ObserverHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&self, source: ObjectId, field: FermentableField) {
        for (_, observer) in &self.entries {
            observer.changed(source, field);
        }
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("attached", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(ObjectId, FermentableField)>>,
    }

    impl FermentableObserver for Recorder {
        fn changed(&self, source: ObjectId, field: FermentableField) {
            self.seen.lock().unwrap().push((source, field));
        }
    }

    #[test]
    fn test_object_ids_are_unique() {
        let a = ObjectId::next();
        let b = ObjectId::next();
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }

    #[test]
    fn test_notify_reaches_all_observers_in_order() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let mut list = ObserverList::default();
        list.attach(first.clone());
        list.attach(second.clone());

        let id = ObjectId::next();
        list.notify(id, FermentableField::Color);

        assert_eq!(*first.seen.lock().unwrap(), vec![(id, FermentableField::Color)]);
        assert_eq!(*second.seen.lock().unwrap(), vec![(id, FermentableField::Color)]);
    }

    #[test]
    fn test_detach() {
        let recorder = Arc::new(Recorder::default());
        let mut list = ObserverList::default();
        let handle = list.attach(recorder.clone());
        assert_eq!(list.len(), 1);

        assert!(list.detach(handle));
        assert!(!list.detach(handle));
        assert!(list.is_empty());

        list.notify(ObjectId::next(), FermentableField::Name);
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(FermentableField::AfterBoil.as_str(), "after_boil");
        assert_eq!(FermentableField::IbuGalPerLb.as_str(), "ibu_gal_per_lb");
    }
}
