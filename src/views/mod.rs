#[cfg(any(feature = "web", feature = "desktop", feature = "mobile"))]
mod chat;
#[cfg(any(feature = "web", feature = "desktop", feature = "mobile"))]
mod settings;
pub mod shared;

#[cfg(any(feature = "web", feature = "desktop", feature = "mobile"))]
pub use chat::ChatView;
#[cfg(any(feature = "web", feature = "desktop", feature = "mobile"))]
pub use settings::SettingsView;
