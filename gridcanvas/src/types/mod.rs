mod color;
mod style;
mod theme;

pub use color::{Color, Rgb};
pub use style::TextStyle;
pub use theme::{Theme, ThemeOverride};
