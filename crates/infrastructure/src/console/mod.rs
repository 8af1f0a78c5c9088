pub mod terminal_console;

pub use terminal_console::TerminalConsole;
