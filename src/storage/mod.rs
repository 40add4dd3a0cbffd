pub mod event_source;
pub mod output_store;

pub use event_source::EventSource;
pub use output_store::OutputStore;
