pub mod json;
pub mod terminal;
pub mod text;

pub use json::JsonWriter;
pub use terminal::TerminalWriter;
pub use text::TextWriter;
