pub mod configuration;
pub mod events;

pub use configuration::ConfigurationClient;
pub use events::EventClient;
