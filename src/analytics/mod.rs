pub mod manager;
pub mod sink;

pub use manager::ClickManager;
pub use sink::ClickSink;
