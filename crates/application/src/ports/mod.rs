mod content_repository;
mod operator_console;

pub use content_repository::ContentRepository;
pub use operator_console::OperatorConsole;
