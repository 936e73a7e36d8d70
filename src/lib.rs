pub mod api;
pub mod gemini;
pub mod greentext;
pub mod persona;
pub mod server;
pub mod session;
pub mod storage;
pub mod theme;
pub mod types;
pub mod views;

#[cfg(any(feature = "web", feature = "desktop", feature = "mobile"))]
pub mod ui;
