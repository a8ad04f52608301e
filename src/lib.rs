//! Turns a semicolon-separated table of media entries into a printable A4 PDF
//! of play cards: a QR code pass on the front of each sheet, a mirrored text
//! pass on the back, laid out in a grid of square cells for cutting apart.

mod card;
pub use card::*;

mod colour;
pub use colour::*;

mod compose;
pub use compose::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod grid;
pub use grid::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod page;
pub use page::*;

/// Pre-defined page sizes
pub mod pagesize;

mod qr;
pub use qr::*;

mod record;
pub use record::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
