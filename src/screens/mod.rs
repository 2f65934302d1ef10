//! Screen controllers for the application.
//!
//! Each screen controller owns its state and handles both rendering and
//! events. Event handling returns a `ScreenAction`; navigation and network
//! requests are executed by the `App`, which routes completion results back
//! to the originating screen.

pub mod callback;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod screen_trait;

pub use callback::CallbackScreen;
pub use dashboard::DashboardScreen;
pub use home::HomeScreen;
pub use login::LoginScreen;
pub use screen_trait::{Screen, ScreenAction, ScreenContext};
