//! Signal generation and plotting for `construct loading`.

pub mod plot;
pub mod signal;

pub use plot::{encode_png, render_plot, PlotImage, PlotSize};
pub use signal::{Signal, SAMPLE_COUNT};
