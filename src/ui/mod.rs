pub mod app;
pub mod theme;

pub use app::SoundbiteApp;
pub use theme::Theme;
