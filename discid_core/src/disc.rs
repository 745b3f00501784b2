/*!
# Disc ID: Disc
*/

use crate::{
	Barcode,
	CD_LEADOUT_LABEL,
	DiscIdError,
	DiscReader,
	Feature,
	Features,
	FreedbId,
	MusicBrainzId,
	Toc,
	Track,
	TrackOutOfRange,
};
use dactyl::{
	NiceU32,
	NoHash,
};
use std::{
	collections::HashMap,
	fmt,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Disc.
///
/// A validated table of contents, plus whatever extra bits (MCN, ISRCs) were
/// pulled from the physical disc, if any.
///
/// Note that the `Display` impl prints a multi-line, human-readable summary
/// of the disc rather than its ID. Use [`Disc::id`] for the latter.
///
/// ```
/// use discid_core::Disc;
///
/// let disc = Disc::parse("1 1 44942 150")
///     .unwrap()
///     .with_isrc(1, "USRC17607839");
///
/// assert_eq!(disc.id().as_str(), "ANJa4DGYN_ktpzOwvVPtcjwP7mE-");
/// assert_eq!(disc.track(1).unwrap().isrc(), Some("USRC17607839"));
/// assert_eq!(disc.mcn(), None);
///
/// // The summary, not the ID.
/// assert!(disc.to_string().starts_with("TOC:"));
/// ```
pub struct Disc {
	/// # Disc Table of Contents.
	toc: Toc,

	/// # Media Catalog Number.
	mcn: Option<String>,

	/// # Track ISRCs.
	isrcs: HashMap<u8, String, NoHash>,
}

impl From<Toc> for Disc {
	#[inline]
	fn from(toc: Toc) -> Self { Self::new(toc) }
}

impl fmt::Display for Disc {
	/// # Summarize the Disc.
	///
	/// This prints the disc identifiers and a table of contents-type
	/// breakdown of the tracks.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		/// # Divider.
		const DIVIDER: &str = "-------------------------------------------\n";

		// A few key/value pairs.
		let mut kv: Vec<(&str, String)> = vec![
			("TOC:", self.toc.to_string()),
			("MusicBrainz:", self.id().to_string()),
			("FreeDB:", self.freedb_id().to_string()),
		];
		if let Some(mcn) = self.mcn() {
			let nice = self.barcode().map_or_else(|| mcn.to_owned(), |b| b.to_string());
			kv.push(("MCN:", nice));
		}

		let col_max: usize = kv.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
		for (k, v) in kv {
			writeln!(f, "{k:col_max$} {v}")?;
		}

		// Start the table of contents.
		write!(
			f,
			"\n##    FIRST     LAST   LENGTH  {}\n",
			if self.isrcs.is_empty() { "" } else { "        ISRC" },
		)?;
		f.write_str(DIVIDER)?;

		for t in self.tracks() {
			let rng = t.sector_range();

			// Empty tracks have no last sector.
			let last =
				if rng.is_empty() { None }
				else { Some(NiceU32::from(rng.end - 1)) };

			writeln!(
				f,
				"{:02}  {:>7}  {:>7}  {:>7}  {:>12}",
				t.number(),
				NiceU32::from(rng.start).as_str(),
				last.as_ref().map_or("-", NiceU32::as_str),
				NiceU32::from(t.sectors()).as_str(),
				t.isrc().unwrap_or_default(),
			)?;
		}

		// The leadout.
		writeln!(
			f,
			"{CD_LEADOUT_LABEL}  {:>7}  {:>7}  {:>7}  {:>12}",
			NiceU32::from(self.toc.leadout()).as_str(),
			"",
			"",
			"LEAD-OUT",
		)?;

		// Close it off!
		f.write_str(DIVIDER)
	}
}

impl Disc {
	#[must_use]
	/// # New.
	///
	/// Wrap a TOC without any extra data.
	pub fn new(toc: Toc) -> Self {
		Self {
			toc,
			mcn: None,
			isrcs: HashMap::with_hasher(NoHash::default()),
		}
	}

	/// # Put.
	///
	/// Build a disc from the first track number and offsets (leadout first),
	/// i.e. a TOC that was read earlier.
	///
	/// ## Errors
	///
	/// This will return an error if the TOC is invalid; see
	/// [`Toc::from_offsets`].
	pub fn put(first: u8, offsets: &[u32]) -> Result<Self, DiscIdError> {
		Toc::from_offsets(first, offsets).map(Self::new)
	}

	/// # Parse.
	///
	/// Build a disc from a canonical TOC string.
	///
	/// ## Errors
	///
	/// This will return an error if the string is malformed or the TOC is
	/// invalid.
	pub fn parse(src: &str) -> Result<Self, DiscIdError> {
		src.parse::<Toc>().map(Self::new)
	}

	/// # Read.
	///
	/// Read a physical disc using the given reader. If `device` is `None` or
	/// empty, the reader's default device is used.
	///
	/// MCN and ISRC data are only kept if the corresponding feature was
	/// requested.
	///
	/// ## Errors
	///
	/// This will return an error if the device name is unusable, bubble up
	/// any reader errors, or return an error if the data it returns does not
	/// make for a valid TOC.
	pub fn read<R>(reader: &R, device: Option<&str>, features: Features)
	-> Result<Self, DiscIdError>
	where R: DiscReader + ?Sized {
		let default = reader.default_device();
		let device = device.map(str::trim)
			.filter(|d| ! d.is_empty())
			.unwrap_or(&*default);

		// Device names get handed to the OS as C strings.
		if device.is_empty() || device.contains('\0') {
			return Err(DiscIdError::Device(device.to_owned()));
		}

		// Reading the TOC is implied.
		let features = features.with(Feature::Read);
		for f in features.iter() {
			if ! reader.has_feature(f) {
				log::debug!("The {f} feature is not supported by this reader.");
			}
		}

		log::debug!("Reading disc in {device}.");
		let raw = reader.read(device, features)?;
		let mut out = Self::put(raw.first_track, &raw.offsets)?;

		if features.contains(Feature::Mcn) {
			if let Some(mcn) = raw.mcn.as_deref() { out = out.with_mcn(mcn); }
		}
		if features.contains(Feature::Isrc) {
			for (num, isrc) in &raw.isrcs { out = out.with_isrc(*num, isrc); }
		}

		Ok(out)
	}
}

/// ## Setters.
impl Disc {
	#[must_use]
	/// # With MCN.
	///
	/// Set the media catalog number. Empty and all-zero values (the way
	/// drives report a missing MCN) are ignored.
	pub fn with_mcn(mut self, mcn: &str) -> Self {
		let mcn = mcn.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0');
		if mcn.bytes().any(|b| b != b'0') { self.mcn = Some(mcn.to_owned()); }
		else { self.mcn = None; }
		self
	}

	#[must_use]
	/// # With ISRC.
	///
	/// Set the ISRC for a track. Empty values and numbers outside the disc's
	/// track range are ignored.
	pub fn with_isrc(mut self, num: u8, isrc: &str) -> Self {
		let isrc = isrc.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0');
		if isrc.is_empty() { return self; }

		if self.toc.track(num).is_ok() {
			self.isrcs.insert(num, isrc.to_owned());
		}
		else {
			log::debug!("Ignoring ISRC for nonexistent track #{num}.");
		}
		self
	}
}

/// ## Getters.
impl Disc {
	#[must_use]
	/// # Barcode.
	///
	/// Return the MCN as a validated barcode, if it is one.
	pub fn barcode(&self) -> Option<Barcode> {
		self.mcn.as_deref().and_then(|mcn| Barcode::try_from(mcn).ok())
	}

	#[must_use]
	/// # First Track Number.
	pub const fn first_track_num(&self) -> u8 { self.toc.first_track() }

	#[must_use]
	/// # FreeDB ID.
	pub fn freedb_id(&self) -> FreedbId { self.toc.freedb_id() }

	#[must_use]
	/// # MusicBrainz ID.
	pub fn id(&self) -> MusicBrainzId { self.toc.musicbrainz_id() }

	#[must_use]
	/// # ISRC.
	pub fn isrc(&self, num: u8) -> Option<&str> {
		self.isrcs.get(&num).map(String::as_str)
	}

	#[must_use]
	/// # Last Track Number.
	pub fn last_track_num(&self) -> u8 { self.toc.last_track() }

	#[must_use]
	/// # Media Catalog Number.
	pub fn mcn(&self) -> Option<&str> { self.mcn.as_deref() }

	#[must_use]
	/// # Sectors.
	///
	/// Return the total number of sectors on the disc (the leadout).
	pub const fn sectors(&self) -> u32 { self.toc.leadout() }

	#[must_use]
	/// # Submission URL.
	pub fn submission_url(&self) -> String { self.toc.submission_url() }

	#[must_use]
	/// # Table of Contents.
	pub const fn toc(&self) -> &Toc { &self.toc }

	#[must_use]
	/// # TOC String.
	pub fn toc_string(&self) -> String { self.toc.to_string() }

	/// # Track.
	///
	/// ## Errors
	///
	/// If the track number is outside the first/last range, a
	/// [`TrackOutOfRange`] error is returned.
	pub fn track(&self, num: u8) -> Result<Track<'_>, TrackOutOfRange> {
		self.toc.track(num).map(|t| t.with_isrc(self.isrc(num)))
	}

	/// # Tracks.
	///
	/// Iterate through each track, in order.
	pub fn tracks(&self) -> impl Iterator<Item=Track<'_>> {
		self.toc.tracks().map(|t| t.with_isrc(self.isrc(t.number())))
	}
}
