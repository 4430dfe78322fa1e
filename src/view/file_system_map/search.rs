//! Shared search field handle
//!
//! The search field can be owned by the map editor or supplied by its owner
//! (see `FileSystemMapState::use_external_search_box`). Both sides hold a
//! [`SearchBox`]; every value change bumps a revision number, which the
//! editor compares on each dispatch to know when to rebuild.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::KeyEvent;

use crate::view::controls::{FocusState, TextInputEvent, TextInputState};

#[derive(Debug)]
struct SearchBoxInner {
    input: TextInputState,
    revision: u64,
}

/// Cloneable handle to a search text field
#[derive(Debug, Clone)]
pub struct SearchBox {
    inner: Rc<RefCell<SearchBoxInner>>,
}

impl SearchBox {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SearchBoxInner {
                input: TextInputState::new(placeholder),
                revision: 0,
            })),
        }
    }

    /// Current search text
    pub fn text(&self) -> String {
        self.inner.borrow().input.value.clone()
    }

    /// Revision number, bumped on every value change
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    /// Mutate the underlying input; the revision is bumped if the value changed
    pub fn edit<R>(&self, f: impl FnOnce(&mut TextInputState) -> R) -> R {
        let mut inner = self.inner.borrow_mut();
        let before = inner.input.value.clone();
        let result = f(&mut inner.input);
        if inner.input.value != before {
            inner.revision += 1;
        }
        result
    }

    pub fn set_text(&self, text: &str) {
        self.edit(|input| input.set_value(text));
    }

    pub fn clear(&self) {
        self.edit(|input| input.clear());
    }

    pub fn handle_key(&self, key: KeyEvent) -> Option<TextInputEvent> {
        self.edit(|input| input.handle_key(key))
    }

    pub fn set_focus(&self, focus: FocusState) {
        self.inner.borrow_mut().input.focus = focus;
    }

    /// Copy of the input, for rendering
    pub fn snapshot(&self) -> TextInputState {
        self.inner.borrow().input.clone()
    }

    /// Whether two handles refer to the same field
    pub fn same_as(&self, other: &SearchBox) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
