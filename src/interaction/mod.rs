pub mod drag;
pub mod selection;

pub use drag::DragChannel;
pub use selection::SelectionState;
