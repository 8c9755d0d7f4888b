//! Numeric mappings from aggregated data to plot space and color.
//!
//! - [`BandScale`]: discrete domain (years, months) to evenly padded bands
//! - [`LinearScale`]: continuous domain to continuous range, invertible
//! - [`SequentialColorScale`]: temperature to an Orange-Red gradient

pub mod band;
pub mod linear;
pub mod sequential;

pub use band::BandScale;
pub use linear::LinearScale;
pub use sequential::{Rgb, SequentialColorScale};
