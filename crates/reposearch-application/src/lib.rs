pub mod bootstrap;
pub mod controller;
pub mod session;
pub mod telemetry;

pub use bootstrap::{AppBootstrap, bootstrap};
pub use controller::SearchController;
pub use session::{DisplayMode, SessionEvent, SessionState, SessionView, UiEffect};
pub use telemetry::init_tracing;
