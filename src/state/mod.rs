pub mod blink;
pub mod completion;
pub mod history;
pub mod scroll;
pub mod scrollback;

pub use blink::CaretBlink;
pub use completion::TabCompletion;
pub use history::InvocationHistory;
pub use scroll::{ScrollAction, ScrollState};
pub use scrollback::{Scrollback, ScrollbackEntry};
