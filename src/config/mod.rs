//! Runtime settings loaded from the environment.

mod settings;
pub use settings::{Settings, StoreBackend};
