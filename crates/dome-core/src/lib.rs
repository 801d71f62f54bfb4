//! Platform-free core of the dome gallery.
//!
//! Nothing here touches the DOM: the web front end feeds pointer, tap and
//! resize input into [`DomeGallery`], drives [`DomeGallery::tick`] once per
//! animation frame, and renders the resulting [`DomeView`].

pub mod animation;
pub mod config;
pub mod constants;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod image;
pub mod layout;
pub mod lock;
pub mod rotation;
pub mod transition;
pub mod viewport;

pub use animation::*;
pub use config::*;
pub use error::*;
pub use gallery::*;
pub use geometry::*;
pub use image::*;
pub use layout::*;
pub use lock::*;
pub use rotation::*;
pub use transition::*;
pub use viewport::*;
