/*!
# Disc ID: Table of Contents
*/

use crate::{
	DiscIdError,
	FreedbId,
	MAX_TRACK,
	MusicBrainzId,
	SUBMISSION_URL,
	Track,
	TrackOutOfRange,
};
use dactyl::traits::BytesToUnsigned;
use std::{
	fmt,
	str::FromStr,
};



#[derive(Debug, Clone, Eq, Hash, PartialEq)]
/// # Table of Contents.
///
/// This holds the first track number, the leadout, and the starting sector
/// of each track. The last track number is implied by the number of offsets.
///
/// Instances are validated on construction and cannot be changed afterward,
/// so every `Toc` in circulation is well-formed: one to ninety-nine tracks,
/// numbered no higher than 99, with non-decreasing offsets that all fall
/// before the leadout.
///
/// There are two ways to build one, which both end up in the same place:
///
/// ```
/// use discid_core::Toc;
///
/// let a = Toc::from_offsets(1, &[44942, 150]).unwrap();
/// let b: Toc = "1 1 44942 150".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "1 1 44942 150");
/// ```
pub struct Toc {
	/// # First Track Number.
	first: u8,

	/// # Leadout (Total Sectors).
	leadout: u32,

	/// # Track Offsets.
	offsets: Vec<u32>,
}

impl fmt::Display for Toc {
	/// # Canonical TOC String.
	///
	/// Print the first and last track numbers, leadout, and track offsets,
	/// separated by single spaces.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.write_joined(f, ' ')
	}
}

impl FromStr for Toc {
	type Err = DiscIdError;

	/// # Parse TOC String.
	///
	/// Parse a whitespace-separated `FIRST LAST LEADOUT OFFSET…` string.
	///
	/// ## Errors
	///
	/// * `MalformedNumber` if any token is not an unsigned integer;
	/// * `InvalidTocString` if there are fewer than four tokens;
	/// * `TooManyOffsets` as soon as an offset token falls beyond the range implied by `LAST` or the 99-track maximum;
	/// * `InvalidTrackRange` if `FIRST` or `LAST` fall outside `1..=99`, or are backwards;
	/// * `OffsetCountMismatch` if there are fewer offsets than the range implies;
	/// * Anything [`Toc::from_offsets`] might return.
	fn from_str(src: &str) -> Result<Self, Self::Err> {
		/// # Maximum Token Index.
		///
		/// First, last, leadout, and up to 99 track offsets.
		const MAX_IDX: usize = MAX_TRACK as usize + 2;

		let tokens: Vec<&str> = src.split_ascii_whitespace().collect();
		if tokens.len() < 4 { return Err(DiscIdError::InvalidTocString); }

		let mut first = 0_u32;
		let mut last = 0_u32;
		let mut offsets = Vec::with_capacity(tokens.len() - 2);
		for (idx, raw) in tokens.into_iter().enumerate() {
			// Bail as soon as we've crossed the line.
			if 2 <= idx && (MAX_IDX < idx || (last as usize).saturating_add(2) < idx) {
				log::debug!("TOC offset #{idx} exceeds the track limit.");
				return Err(DiscIdError::TooManyOffsets);
			}

			let num = u32::btou(raw.as_bytes())
				.ok_or_else(|| DiscIdError::MalformedNumber {
					index: idx,
					token: raw.to_owned(),
				})?;

			match idx {
				0 => { first = num; },
				1 => { last = num; },
				_ => { offsets.push(num); },
			}
		}

		// The track numbers have to make sense before we can count anything.
		let first = track_num(first)?;
		let last = track_num(last)?;
		if last < first { return Err(DiscIdError::InvalidTrackRange); }

		// Leadout plus one per track.
		let expected = usize::from(last - first) + 2;
		if offsets.len() < expected { return Err(DiscIdError::OffsetCountMismatch); }
		offsets.truncate(expected);

		Self::from_offsets(first, &offsets)
	}
}

impl Toc {
	/// # From Offsets.
	///
	/// Build a TOC from the first track number and a list of sector offsets.
	/// The first offset is the leadout; the rest are the starting sectors of
	/// each track, in order.
	///
	/// ## Examples
	///
	/// ```
	/// use discid_core::Toc;
	///
	/// let toc = Toc::from_offsets(3, &[
	///     206535, 150, 18901, 39738, 59557, 79152,
	///     100126, 124833, 147278, 166336, 182560,
	/// ]).unwrap();
	///
	/// assert_eq!(toc.first_track(), 3);
	/// assert_eq!(toc.last_track(), 12);
	/// assert_eq!(toc.leadout(), 206535);
	/// ```
	///
	/// ## Errors
	///
	/// This will return `InvalidTrackRange` if there are no tracks, more than
	/// 99 tracks, or the first or implied last track numbers fall outside
	/// `1..=99`. It will return `InvalidTrackOffsets` if the offsets go
	/// backwards or reach the leadout.
	pub fn from_offsets(first: u8, offsets: &[u32]) -> Result<Self, DiscIdError> {
		let Some((&leadout, tracks)) = offsets.split_first() else {
			return Err(DiscIdError::InvalidTrackRange);
		};

		// Check the numbering.
		let len = u8::try_from(tracks.len())
			.ok()
			.filter(|n| (1..=MAX_TRACK).contains(n))
			.ok_or(DiscIdError::InvalidTrackRange)?;
		if ! (1..=MAX_TRACK).contains(&first) || MAX_TRACK < first + (len - 1) {
			return Err(DiscIdError::InvalidTrackRange);
		}

		// Check the ordering.
		if
			tracks.windows(2).any(|pair| pair[1] < pair[0]) ||
			tracks.last().map_or(true, |&last| leadout <= last)
		{
			return Err(DiscIdError::InvalidTrackOffsets);
		}

		let out = Self {
			first,
			leadout,
			offsets: tracks.to_vec(),
		};
		log::trace!("Assembled TOC: {out}");
		Ok(out)
	}
}

impl Toc {
	#[must_use]
	/// # First Track Number.
	pub const fn first_track(&self) -> u8 { self.first }

	#[must_use]
	#[allow(clippy::cast_possible_truncation)] // Construction caps the length at 99.
	/// # Last Track Number.
	pub fn last_track(&self) -> u8 {
		self.first + (self.offsets.len() as u8 - 1)
	}

	#[must_use]
	/// # Leadout.
	///
	/// This is the sector following the last track, which is also the total
	/// number of sectors on the disc.
	pub const fn leadout(&self) -> u32 { self.leadout }

	#[must_use]
	/// # Track Offsets.
	///
	/// Return the starting sectors of each track, in order. (The leadout is
	/// not included.)
	pub fn offsets(&self) -> &[u32] { &self.offsets }

	#[must_use]
	#[allow(clippy::cast_possible_truncation)] // Construction caps the length at 99.
	/// # Number of Tracks.
	pub fn track_count(&self) -> u8 { self.offsets.len() as u8 }

	#[must_use]
	/// # Track Offset.
	///
	/// Return the starting sector for the track, if it exists.
	pub fn track_offset(&self, num: u8) -> Option<u32> {
		let idx = num.checked_sub(self.first)?;
		self.offsets.get(usize::from(idx)).copied()
	}
}

impl Toc {
	/// # Track.
	///
	/// Return a view of the given track, computed fresh from the offsets.
	///
	/// ## Errors
	///
	/// If the track number is outside the first/last range, a
	/// [`TrackOutOfRange`] error is returned.
	pub fn track(&self, num: u8) -> Result<Track<'static>, TrackOutOfRange> {
		let idx = num.checked_sub(self.first)
			.map(usize::from)
			.filter(|&idx| idx < self.offsets.len())
			.ok_or(TrackOutOfRange {
				number: num,
				first: self.first,
				last: self.last_track(),
			})?;

		let offset = self.offsets[idx];
		let next = self.offsets.get(idx + 1).copied().unwrap_or(self.leadout);
		Ok(Track::new(num, offset, next - offset))
	}

	/// # Tracks.
	///
	/// Iterate through each track, in order.
	pub fn tracks(&self) -> impl Iterator<Item=Track<'static>> + '_ {
		let nexts = self.offsets.iter()
			.skip(1)
			.copied()
			.chain(std::iter::once(self.leadout));

		(self.first..=self.last_track())
			.zip(self.offsets.iter().copied())
			.zip(nexts)
			.map(|((num, offset), next)| Track::new(num, offset, next - offset))
	}
}

impl Toc {
	#[must_use]
	/// # FreeDB (CDDB) ID.
	pub fn freedb_id(&self) -> FreedbId { FreedbId::from(self) }

	#[must_use]
	/// # MusicBrainz ID.
	pub fn musicbrainz_id(&self) -> MusicBrainzId { MusicBrainzId::from(self) }

	#[must_use]
	/// # Submission URL.
	///
	/// Return the URL for attaching this disc ID to a MusicBrainz release.
	///
	/// ## Examples
	///
	/// ```
	/// use discid_core::Toc;
	///
	/// let toc: Toc = "1 1 44942 150".parse().unwrap();
	/// assert_eq!(
	///     toc.submission_url(),
	///     "http://musicbrainz.org/cdtoc/attach?id=ANJa4DGYN_ktpzOwvVPtcjwP7mE-&tracks=1&toc=1+1+44942+150",
	/// );
	/// ```
	pub fn submission_url(&self) -> String {
		use std::fmt::Write;

		let mut out = format!(
			"{SUBMISSION_URL}?id={}&tracks={}&toc=",
			self.musicbrainz_id(),
			self.track_count(),
		);

		// The TOC is nothing but digits and spaces, so query-encoding is just
		// a matter of swapping the latter for pluses.
		let _res = write!(&mut out, "{}", JoinedToc(self, '+'));
		out
	}

	/// # Write Joined.
	///
	/// Write the canonical TOC parts, separated by `sep`.
	fn write_joined(&self, f: &mut fmt::Formatter<'_>, sep: char) -> fmt::Result {
		write!(
			f,
			"{}{sep}{}{sep}{}",
			self.first,
			self.last_track(),
			self.leadout,
		)?;
		for v in &self.offsets { write!(f, "{sep}{v}")?; }
		Ok(())
	}
}



/// # Joined TOC.
///
/// This formats a TOC with an arbitrary separator.
struct JoinedToc<'a>(&'a Toc, char);

impl fmt::Display for JoinedToc<'_> {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.write_joined(f, self.1)
	}
}



#[cfg(feature = "serde")]
impl serde::Serialize for Toc {
	#[inline]
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where S: serde::Serializer { serializer.collect_str(self) }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Toc {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where D: serde::Deserializer<'de> {
		let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
		Self::from_str(&raw).map_err(serde::de::Error::custom)
	}
}



/// # Track Number.
///
/// Narrow a parsed track number, making sure it falls within `1..=99`.
fn track_num(num: u32) -> Result<u8, DiscIdError> {
	u8::try_from(num).ok()
		.filter(|n| (1..=MAX_TRACK).contains(n))
		.ok_or(DiscIdError::InvalidTrackRange)
}



#[cfg(test)]
mod test {
	use super::*;

	const OFFSETS: [u32; 11] = [
		206_535, 150, 18_901, 39_738, 59_557, 79_152,
		100_126, 124_833, 147_278, 166_336, 182_560,
	];

	const CANONICAL: &str = "1 10 206535 150 18901 39738 59557 79152 100126 124833 147278 166336 182560";

	#[test]
	fn t_from_offsets() {
		let toc = Toc::from_offsets(1, &OFFSETS).expect("TOC failed.");
		assert_eq!(toc.first_track(), 1);
		assert_eq!(toc.last_track(), 10);
		assert_eq!(toc.track_count(), 10);
		assert_eq!(toc.leadout(), 206_535);
		assert_eq!(toc.offsets(), &OFFSETS[1..]);
		assert_eq!(toc.to_string(), CANONICAL);

		let toc = Toc::from_offsets(3, &OFFSETS).expect("TOC failed.");
		assert_eq!(toc.first_track(), 3);
		assert_eq!(toc.last_track(), 12);
		assert_eq!(toc.track_offset(3), Some(150));
		assert_eq!(toc.track_offset(12), Some(182_560));
		assert_eq!(toc.track_offset(2), None);
		assert_eq!(toc.track_offset(13), None);
	}

	#[test]
	fn t_from_offsets_range() {
		// 101 offsets is one too many.
		assert_eq!(
			Toc::from_offsets(1, &[0; 101]),
			Err(DiscIdError::InvalidTrackRange),
		);

		// Tracks 82..=100.
		assert_eq!(
			Toc::from_offsets(82, &[0; 20]),
			Err(DiscIdError::InvalidTrackRange),
		);

		// Tracks 81..=99 are fine.
		let mut offsets = vec![100_000];
		offsets.extend((0..19).map(|n| 150 + n * 1000));
		let toc = Toc::from_offsets(81, &offsets).expect("TOC failed.");
		assert_eq!(toc.last_track(), 99);

		// So are 99 tracks starting at one.
		let mut offsets = vec![100_000];
		offsets.extend((0..99).map(|n| 150 + n * 1000));
		let toc = Toc::from_offsets(1, &offsets).expect("TOC failed.");
		assert_eq!(toc.last_track(), 99);

		// Zero and 100 are never valid starting points.
		assert_eq!(Toc::from_offsets(0, &OFFSETS), Err(DiscIdError::InvalidTrackRange));
		assert_eq!(Toc::from_offsets(100, &OFFSETS[..2]), Err(DiscIdError::InvalidTrackRange));

		// There has to be at least one track.
		assert_eq!(Toc::from_offsets(1, &[]), Err(DiscIdError::InvalidTrackRange));
		assert_eq!(Toc::from_offsets(1, &[44_942]), Err(DiscIdError::InvalidTrackRange));
	}

	#[test]
	fn t_from_offsets_order() {
		// Backwards.
		assert_eq!(
			Toc::from_offsets(1, &[44_942, 300, 150]),
			Err(DiscIdError::InvalidTrackOffsets),
		);

		// Past the leadout.
		assert_eq!(
			Toc::from_offsets(1, &[44_942, 150, 44_942]),
			Err(DiscIdError::InvalidTrackOffsets),
		);

		// Repeats are weird but allowed.
		assert!(Toc::from_offsets(1, &[44_942, 150, 150]).is_ok());
	}

	#[test]
	fn t_from_str() {
		let toc = Toc::from_str(CANONICAL).expect("TOC failed.");
		assert_eq!(toc, Toc::from_offsets(1, &OFFSETS).expect("TOC failed."));
		assert_eq!(toc.to_string(), CANONICAL);

		// Round trip a short one.
		let toc = Toc::from_str("1 1 44942 150").expect("TOC failed.");
		assert_eq!(toc.to_string(), "1 1 44942 150");

		// Extra whitespace is fine going in, but doesn't come back out.
		let toc = Toc::from_str("  1\t1  44942\n150 ").expect("TOC failed.");
		assert_eq!(toc.to_string(), "1 1 44942 150");

		// Offsets beyond the implied count are dropped when the first track
		// is higher than one.
		let toc = Toc::from_str("3 4 44942 150 200 300").expect("TOC failed.");
		assert_eq!(toc.to_string(), "3 4 44942 150 200");
	}

	#[test]
	fn t_from_str_errors() {
		assert_eq!(
			Toc::from_str("1 2 242457 150 200 300"),
			Err(DiscIdError::TooManyOffsets),
		);
		assert_eq!(
			Toc::from_str("1 2 242457 150"),
			Err(DiscIdError::OffsetCountMismatch),
		);
		assert_eq!(Toc::from_str("1"), Err(DiscIdError::InvalidTocString));
		assert_eq!(Toc::from_str(""), Err(DiscIdError::InvalidTocString));
		assert_eq!(Toc::from_str("1 1 44942"), Err(DiscIdError::InvalidTocString));

		assert_eq!(
			Toc::from_str("1 1 44942 15O"),
			Err(DiscIdError::MalformedNumber { index: 3, token: "15O".to_owned() }),
		);
		assert_eq!(
			Toc::from_str("one 1 44942 150"),
			Err(DiscIdError::MalformedNumber { index: 0, token: "one".to_owned() }),
		);
		assert_eq!(
			Toc::from_str("1 1 -44942 150"),
			Err(DiscIdError::MalformedNumber { index: 2, token: "-44942".to_owned() }),
		);

		// Backwards track numbers.
		assert_eq!(Toc::from_str("2 1 44942 150"), Err(DiscIdError::InvalidTrackRange));

		// Out of range track numbers.
		assert_eq!(Toc::from_str("0 1 44942 150"), Err(DiscIdError::InvalidTrackRange));
		assert_eq!(Toc::from_str("0 1 44942 150 300"), Err(DiscIdError::InvalidTrackRange));
		assert_eq!(Toc::from_str("0 0 44942 150"), Err(DiscIdError::InvalidTrackRange));
		assert_eq!(Toc::from_str("99 100 44942 150 300"), Err(DiscIdError::InvalidTrackRange));
		assert_eq!(Toc::from_str("300 300 44942 150"), Err(DiscIdError::InvalidTrackRange));
	}

	#[test]
	fn t_from_str_too_many() {
		// The limit kicks in before the bad token is reached.
		assert_eq!(
			Toc::from_str("1 1 44942 150 nope"),
			Err(DiscIdError::TooManyOffsets),
		);

		// Build a string with the maximum number of tracks.
		let mut raw = String::from("1 99 100000");
		for n in 0..99 { raw.push_str(&format!(" {}", 150 + n * 1000)); }
		let toc = Toc::from_str(&raw).expect("TOC failed.");
		assert_eq!(toc.track_count(), 99);
		assert_eq!(toc.to_string(), raw);

		// One more is one too many.
		raw.push_str(" 99999");
		assert_eq!(Toc::from_str(&raw), Err(DiscIdError::TooManyOffsets));

		// Even if the last track number is huge.
		let raw = raw.replacen("1 99 ", "1 250 ", 1);
		assert_eq!(Toc::from_str(&raw), Err(DiscIdError::TooManyOffsets));
	}

	#[test]
	fn t_track() {
		for first in [1, 3] {
			let toc = Toc::from_offsets(first, &OFFSETS).expect("TOC failed.");
			let last = toc.last_track();

			for num in first..=last {
				let track = toc.track(num).expect("Missing track.");
				let idx = usize::from(num - first) + 1;
				let next = OFFSETS.get(idx + 1).copied().unwrap_or(OFFSETS[0]);

				assert_eq!(track.number(), num);
				assert_eq!(track.offset(), OFFSETS[idx]);
				assert_eq!(track.sectors(), next - OFFSETS[idx]);
				assert_eq!(track.isrc(), None);
			}

			// The iterator should agree.
			let all: Vec<Track> = toc.tracks().collect();
			assert_eq!(all.len(), usize::from(toc.track_count()));
			for t in all {
				assert_eq!(Ok(t), toc.track(t.number()));
			}

			// Out of range.
			assert!(toc.track(first).is_ok());
			assert!(toc.track(last).is_ok());
			assert_eq!(
				toc.track(first - 1),
				Err(TrackOutOfRange { number: first - 1, first, last }),
			);
			assert_eq!(
				toc.track(last + 1),
				Err(TrackOutOfRange { number: last + 1, first, last }),
			);
		}
	}

	#[test]
	fn t_submission_url() {
		let toc = Toc::from_offsets(1, &OFFSETS).expect("TOC failed.");
		assert_eq!(
			toc.submission_url(),
			"http://musicbrainz.org/cdtoc/attach?id=Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-&tracks=10&toc=1+10+206535+150+18901+39738+59557+79152+100126+124833+147278+166336+182560",
		);
	}

	#[cfg(feature = "serde")]
	#[test]
	fn t_serde() {
		let toc = Toc::from_str(CANONICAL).expect("TOC failed.");
		let json = serde_json::to_string(&toc).expect("Serialize failed.");
		assert_eq!(json, format!("{CANONICAL:?}"));

		let de: Toc = serde_json::from_str(&json).expect("Deserialize failed.");
		assert_eq!(de, toc);

		assert!(serde_json::from_str::<Toc>("\"1 2 242457 150\"").is_err());
	}
}
