use std::rc::{Rc, Weak};

use crate::animation::prop::Prop;
use crate::foundation::core::Rect;

/// Host-owned visual element the orchestrator animates.
///
/// The view layer keeps ownership of its elements and hands the orchestrator
/// [`ElementRef`] clones; internally only [`Weak`] references are stored, so
/// an element dropped by its section can never be written to again.
///
/// `bounds` returns geometry in *viewport coordinates* (the top edge of the
/// viewport is `y = 0`), or `None` while the element is not attached to a
/// live tree. Both a dead `Weak` and a `None` bounds are silently skipped by
/// every consumer; neither is an error.
pub trait ViewElement {
    /// Current bounding box in viewport coordinates, if attached.
    fn bounds(&self) -> Option<Rect>;

    /// Write one interpolated visual property value.
    fn set_prop(&self, prop: Prop, value: f64);
}

/// Shared handle to a host element.
pub type ElementRef = Rc<dyn ViewElement>;

/// Non-owning handle stored inside the orchestrator.
pub(crate) type WeakElement = Weak<dyn ViewElement>;

pub(crate) fn downgrade(element: &ElementRef) -> WeakElement {
    Rc::downgrade(element)
}
