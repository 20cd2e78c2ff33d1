//! Engine core: layout, state, and dispatch

mod dispatcher;
mod event;
mod layout;
mod state_store;

pub use dispatcher::{BarContext, Dispatcher, DispatcherState};
pub use event::{unwrap_envelope, BarEvent};
pub use layout::{BuiltLayout, LayoutBuilder, Slot};
pub use state_store::StateStore;
