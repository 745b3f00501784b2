/*!
# Disc ID: Errors
*/

use fyi_msg::Msg;
use std::{
	error::Error,
	fmt,
};



#[cfg(feature = "bin")]
/// # Help Text.
const HELP: &str = concat!(r#"
     .---.
   /  .-.  \    Disc ID v"#, env!("CARGO_PKG_VERSION"), r#"
  |  ( o )  |   MusicBrainz and FreeDB IDs
   \  '-'  /    from an audio CD TOC.
     '---'

USAGE:
    discid [OPTIONS] <TOC>

The <TOC> is a whitespace-separated list of integers in the form:

    FIRST LAST LEADOUT OFFSET1 OFFSET2 … OFFSETN

e.g. "1 10 206535 150 18901 39738 59557 79152 100126 124833 147278 166336 182560"

TOC SETTINGS:
    -f, --first <NUM> Build the TOC from a first track number and a list of
                      sector offsets instead. The offsets are then passed as
                      the trailing arguments, leadout first.
        --isrc <NUM=ISRC>
                      Attach an ISRC to a track. This option may be repeated.
        --mcn <MCN>   Attach a media catalog number (UPC/EAN) to the disc.

OUTPUT:
        --id          Print only the MusicBrainz disc ID to STDOUT.
        --freedb      Print only the FreeDB disc ID to STDOUT.
        --toc         Print only the canonical TOC string to STDOUT.
        --url         Print only the MusicBrainz submission URL to STDOUT.

MISCELLANEOUS:
        --device      Print the platform's default CD device name and exit.
    -h, --help        Print help information to STDOUT and exit.
    -v, --verbose     Log debug information to STDERR.
    -V, --version     Print version information to STDOUT and exit.
"#);



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Errors.
///
/// These are all structural or input-format problems detected while building
/// a table of contents. None of them are retryable.
pub enum DiscIdError {
	/// # Invalid barcode.
	Barcode,

	/// # Invalid Device.
	///
	/// The device name is empty or cannot be passed to the OS.
	Device(String),

	/// # Unable to read from device.
	///
	/// This is for [`DiscReader`](crate::DiscReader) implementations to
	/// return when the drive cannot be opened or read.
	DeviceRead(Option<String>),

	/// # Invalid FreeDB ID string.
	FreedbId,

	/// # Too few tokens for a TOC string.
	InvalidTocString,

	/// # Offsets out of order or beyond the leadout.
	InvalidTrackOffsets,

	/// # Track numbers or count out of range.
	InvalidTrackRange,

	/// # A TOC token is not an integer.
	MalformedNumber {
		/// # Token Position (0-based).
		index: usize,

		/// # Raw Token.
		token: String,
	},

	/// # Invalid MusicBrainz ID string.
	MusicBrainzId,

	/// # Fewer offsets than the track range implies.
	OffsetCountMismatch,

	/// # More than 100 offsets (leadout + 99 tracks).
	TooManyOffsets,

	#[cfg(feature = "bin")]
	/// # Invalid CLI arg.
	CliArg(String),

	#[cfg(feature = "bin")]
	/// # CLI Parsing failure.
	CliParse(&'static str),

	#[cfg(feature = "bin")]
	/// # Print Help (Not an Error).
	PrintHelp,

	#[cfg(feature = "bin")]
	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for DiscIdError {}

impl From<DiscIdError> for Msg {
	#[inline]
	fn from(src: DiscIdError) -> Self { Self::error(src.to_string()) }
}

impl fmt::Display for DiscIdError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Barcode => f.write_str("Invalid/unsupported barcode."),
			Self::Device(s) => write!(f, "Invalid device path {s:?}."),
			Self::DeviceRead(s) =>
				if let Some(s) = s { write!(f, "Unable to read the disc in {s}.") }
				else { f.write_str("Unable to read the disc in the default optical drive.") },
			Self::FreedbId => f.write_str("Invalid FreeDB ID."),
			Self::InvalidTocString => f.write_str("The TOC string needs at least a first track, last track, leadout, and one offset."),
			Self::InvalidTrackOffsets => f.write_str("Invalid track offsets."),
			Self::InvalidTrackRange => f.write_str("Illegal track limits."),
			Self::MalformedNumber { index, token } => write!(f, "Invalid number {token:?} at TOC position {index}."),
			Self::MusicBrainzId => f.write_str("Invalid MusicBrainz ID."),
			Self::OffsetCountMismatch => f.write_str("The number of offsets does not match the track range."),
			Self::TooManyOffsets => f.write_str("Too many offsets; discs are limited to 99 tracks."),

			#[cfg(feature = "bin")]
			Self::CliArg(s) => write!(f, "Invalid CLI option: {s}"),

			#[cfg(feature = "bin")]
			Self::CliParse(s) => write!(f, "Unable to parse {s}."),

			#[cfg(feature = "bin")]
			Self::PrintHelp => f.write_str(HELP),

			#[cfg(feature = "bin")]
			Self::PrintVersion => f.write_str(concat!("Disc ID v", env!("CARGO_PKG_VERSION"))),
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Track Out of Range.
///
/// This is returned by the track accessors when asked for a number outside
/// the disc's first/last range. Unlike [`DiscIdError`], it signals caller
/// misuse rather than bad disc data.
pub struct TrackOutOfRange {
	/// # Requested Number.
	pub number: u8,

	/// # First Track.
	pub first: u8,

	/// # Last Track.
	pub last: u8,
}

impl Error for TrackOutOfRange {}

impl fmt::Display for TrackOutOfRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Track #{} is out of range ({}..={}).",
			self.number,
			self.first,
			self.last,
		)
	}
}
