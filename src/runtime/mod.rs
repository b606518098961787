pub mod event;
pub mod frontend;
pub mod r#loop;

pub use event::TerminalEvent;
pub use frontend::FrontendAdapter;
pub use r#loop::Runtime;
