//! `ax-poi` — where points of interest come from.
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`record`]  | `PoiRecord` (coordinates, amenity, name, address parts)  |
//! | [`session`] | `ProviderSession`, the explicit authenticated handle    |
//! | [`source`]  | `PoiSource` trait, `MemoryPoiSource`, `dedupe_records`   |
//! | [`csv`]     | `CsvPoiSource`, `load_pois_reader`                       |
//! | [`osm`]     | `PbfPoiSource` (feature = `"osm"` only)                  |
//! | [`error`]   | `PoiError`, `AuthError`, `PoiResult<T>`                  |
//!
//! Every fetch goes through a [`ProviderSession`].  The session is acquired
//! once per run by the caller and passed in explicitly; there is no global
//! provider initialisation.

pub mod csv;
pub mod error;
pub mod record;
pub mod session;
pub mod source;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use crate::csv::{CsvPoiSource, load_pois_reader};
pub use error::{AuthError, PoiError, PoiResult};
pub use record::PoiRecord;
pub use session::ProviderSession;
pub use source::{MemoryPoiSource, PoiSource, dedupe_records};

#[cfg(feature = "osm")]
pub use osm::PbfPoiSource;
