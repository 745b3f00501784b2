/*!
# Disc ID: Tracks
*/

use crate::SECTORS_PER_SECOND;
use std::ops::Range;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Track.
///
/// A read-only view of a single track, derived on demand from a [`Toc`](crate::Toc)
/// (or [`Disc`](crate::Disc), which can also supply the ISRC).
pub struct Track<'a> {
	/// # Track Number.
	num: u8,

	/// # Starting Sector.
	offset: u32,

	/// # Length (Sectors).
	sectors: u32,

	/// # ISRC.
	isrc: Option<&'a str>,
}

impl Track<'static> {
	/// # New.
	pub(crate) const fn new(num: u8, offset: u32, sectors: u32) -> Self {
		Self { num, offset, sectors, isrc: None }
	}
}

impl<'a> Track<'a> {
	#[must_use]
	/// # With ISRC.
	pub(crate) const fn with_isrc<'b>(self, isrc: Option<&'b str>) -> Track<'b> {
		Track {
			num: self.num,
			offset: self.offset,
			sectors: self.sectors,
			isrc,
		}
	}

	#[must_use]
	/// # Number.
	pub const fn number(&self) -> u8 { self.num }

	#[must_use]
	/// # Offset.
	///
	/// Return the track's starting sector.
	pub const fn offset(&self) -> u32 { self.offset }

	#[must_use]
	/// # Sectors.
	///
	/// Return the length of the track in sectors, i.e. the distance between
	/// its start and the start of the next track (or the leadout).
	pub const fn sectors(&self) -> u32 { self.sectors }

	#[must_use]
	/// # Sector Range.
	pub const fn sector_range(&self) -> Range<u32> {
		self.offset..self.offset + self.sectors
	}

	#[must_use]
	/// # Duration (Seconds).
	///
	/// Return the (floored) playback length in seconds.
	pub const fn duration(&self) -> u32 {
		self.sectors.wrapping_div(SECTORS_PER_SECOND)
	}

	#[must_use]
	/// # ISRC.
	///
	/// This is only ever present for tracks pulled from a [`Disc`](crate::Disc)
	/// whose ISRCs were read.
	pub const fn isrc(&self) -> Option<&'a str> { self.isrc }
}
