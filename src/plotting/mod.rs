pub mod chart;
pub mod styles;

#[cfg(test)]
mod tests;

pub use chart::{export_png, render_line_chart, RenderedChart};
pub use styles::{ChartStyle, ChartTheme, ThemeOption};
