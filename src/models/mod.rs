pub mod event;

pub use event::{Event, EventForm, NewEvent};
