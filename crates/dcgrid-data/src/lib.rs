//! Data loading for the layout designer.
//!
//! - [`csv_loader`] reads the module metadata table into a
//!   [`ModuleCatalog`](dcgrid_core::module::ModuleCatalog).
//! - [`palette`] provides the built-in equipment palette and reads palettes
//!   from files.
//! - [`loader`] holds the format detection and deserialization helpers, also
//!   used for configuration files.

pub mod csv_loader;
pub mod loader;
pub mod palette;

pub use csv_loader::{load_catalog, load_catalog_lossy, parse_catalog};
pub use loader::{DataLoadError, Format, deserialize_file, detect_format};
pub use palette::{builtin_palette, load_palette};
