/*!
# Disc ID: Library

This crate derives the [MusicBrainz](https://musicbrainz.org/doc/Disc_ID) and
legacy FreeDB/CDDB disc identifiers from an audio CD's table of contents,
along with the canonical TOC string and the MusicBrainz submission URL.

Nothing in here talks to hardware. A [`Toc`] is either parsed from its
canonical string form or assembled from a first track number and a list of
sector offsets; physical drives are reached through an external
[`DiscReader`] implementation.

```
use discid_core::Toc;

let toc: Toc = "1 10 206535 150 18901 39738 59557 79152 100126 124833 147278 166336 182560"
	.parse()
	.expect("Invalid TOC.");

assert_eq!(toc.musicbrainz_id().as_str(), "Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-");
assert_eq!(toc.freedb_id().to_string(), "830abf0a");
```
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(
	clippy::doc_markdown,
	clippy::module_name_repetitions,
	clippy::redundant_pub_crate,
)]

mod barcode;
mod disc;
mod error;
mod id;
mod reader;
mod toc;
mod track;

pub use barcode::Barcode;
pub use disc::Disc;
pub use error::{
	DiscIdError,
	TrackOutOfRange,
};
pub use id::{
	FreedbId,
	MusicBrainzId,
};
pub use reader::{
	DEFAULT_DEVICE,
	DiscReader,
	Feature,
	Features,
	RawToc,
};
pub use toc::Toc;
pub use track::Track;



/// # Sectors Per Second.
///
/// Audio CDs play back at 75 sectors (frames) per second.
pub const SECTORS_PER_SECOND: u32 = 75;

/// # Maximum Track Number.
pub const MAX_TRACK: u8 = 99;

/// # Number of lead-in sectors.
///
/// All discs have a 2-second region at the start before any data, so the
/// first track of a normal disc starts at this offset.
pub const CD_LEADIN: u32 = 150;

/// # Lead-out Label.
///
/// This is used solely for the table of contents printout; e.g. 01 02 03 AA.
pub const CD_LEADOUT_LABEL: &str = "AA";

/// # Submission Base URL.
pub const SUBMISSION_URL: &str = "http://musicbrainz.org/cdtoc/attach";



#[must_use]
/// # Version.
///
/// Return the library name and version, e.g. `discid_core 0.1.0`.
pub const fn version() -> &'static str {
	concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
