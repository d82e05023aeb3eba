use std::cell::RefCell;
use std::rc::Rc;

/// An external field the group mirrors its logical value into.
pub trait Sink {
    fn write(&mut self, value: &str);
}

/// Shared handle to a single-value field. Clones see the same value.
#[derive(Debug, Clone, Default)]
pub struct SinkField(Rc<RefCell<String>>);

impl SinkField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.0.borrow().clone()
    }
}

impl Sink for SinkField {
    fn write(&mut self, value: &str) {
        let mut current = self.0.borrow_mut();
        current.clear();
        current.push_str(value);
    }
}
