/*!
# Disc ID: Disc Readers

The library doesn't touch hardware itself; reading a physical disc is left to
a [`DiscReader`] implementation, which hands back a [`RawToc`].
*/

use crate::DiscIdError;
use std::{
	borrow::Cow,
	fmt,
};



#[cfg(target_os = "linux")]
/// # Default Device.
///
/// The platform's conventional name for the first optical drive.
pub const DEFAULT_DEVICE: &str = "/dev/cdrom";

#[cfg(any(
	target_os = "freebsd",
	target_os = "dragonfly",
	target_os = "netbsd",
	target_os = "openbsd",
))]
/// # Default Device.
///
/// The platform's conventional name for the first optical drive.
pub const DEFAULT_DEVICE: &str = "/dev/cd0";

#[cfg(target_os = "macos")]
/// # Default Device.
///
/// The platform's conventional name for the first optical drive.
pub const DEFAULT_DEVICE: &str = "1";

#[cfg(target_os = "windows")]
/// # Default Device.
///
/// The platform's conventional name for the first optical drive.
pub const DEFAULT_DEVICE: &str = "D:";

#[cfg(not(any(
	target_os = "linux",
	target_os = "freebsd",
	target_os = "dragonfly",
	target_os = "netbsd",
	target_os = "openbsd",
	target_os = "macos",
	target_os = "windows",
)))]
/// # Default Device.
///
/// The platform's conventional name for the first optical drive.
pub const DEFAULT_DEVICE: &str = "/dev/cdrom";

/// # FLAG: Read TOC.
const FLAG_READ: u8 = 0b0000_0001;

/// # FLAG: Read MCN.
const FLAG_MCN: u8 =  0b0000_0010;

/// # FLAG: Read ISRCs.
const FLAG_ISRC: u8 = 0b0000_0100;

/// # FLAG: All.
const FLAG_ALL: u8 = FLAG_READ | FLAG_MCN | FLAG_ISRC;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Read Feature.
///
/// The platform-dependent things a [`DiscReader`] might be able to extract.
pub enum Feature {
	/// # Table of Contents.
	Read,

	/// # Media Catalog Number.
	Mcn,

	/// # Track ISRCs.
	Isrc,
}

impl fmt::Display for Feature {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Feature {
	/// # All Features.
	pub const ALL: [Self; 3] = [Self::Read, Self::Mcn, Self::Isrc];

	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Read => "read",
			Self::Mcn => "mcn",
			Self::Isrc => "isrc",
		}
	}

	/// # As Flag.
	const fn flag(self) -> u8 {
		match self {
			Self::Read => FLAG_READ,
			Self::Mcn => FLAG_MCN,
			Self::Isrc => FLAG_ISRC,
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Requested Features.
///
/// A set of [`Feature`]s to request when reading a disc. Reading the TOC is
/// always implied.
///
/// ```
/// use discid_core::{Feature, Features};
///
/// let features = Features::default().with(Feature::Mcn);
/// assert!(features.contains(Feature::Read));
/// assert!(features.contains(Feature::Mcn));
/// assert!(! features.contains(Feature::Isrc));
///
/// assert!(Features::ALL.contains(Feature::Isrc));
/// ```
pub struct Features(u8);

impl Default for Features {
	#[inline]
	fn default() -> Self { Self(FLAG_READ) }
}

impl From<Feature> for Features {
	#[inline]
	fn from(src: Feature) -> Self { Self::default().with(src) }
}

impl FromIterator<Feature> for Features {
	fn from_iter<I: IntoIterator<Item=Feature>>(iter: I) -> Self {
		iter.into_iter().fold(Self::default(), Self::with)
	}
}

impl Features {
	/// # Everything.
	pub const ALL: Self = Self(FLAG_ALL);

	#[must_use]
	/// # With Feature.
	pub const fn with(self, feature: Feature) -> Self {
		Self(self.0 | feature.flag())
	}

	#[must_use]
	/// # Contains Feature?
	pub const fn contains(self, feature: Feature) -> bool {
		let flag = feature.flag();
		flag == self.0 & flag
	}

	/// # Iterate Features.
	pub fn iter(self) -> impl Iterator<Item=Feature> {
		Feature::ALL.into_iter().filter(move |f| self.contains(*f))
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Raw TOC.
///
/// The unvalidated data a [`DiscReader`] pulls off a disc.
pub struct RawToc {
	/// # First Track Number.
	pub first_track: u8,

	/// # Offsets.
	///
	/// The leadout, followed by the starting sector of each track.
	pub offsets: Vec<u32>,

	/// # Media Catalog Number.
	pub mcn: Option<String>,

	/// # ISRCs.
	///
	/// Track number/ISRC pairs.
	pub isrcs: Vec<(u8, String)>,
}



/// # Disc Reader.
///
/// This is the seam between the library and the operating system's optical
/// drive interface.
///
/// Implementations own whatever device handle they open while reading, and
/// must release it on every exit path, errors included. (A `Drop` impl on the
/// handle type is the natural way to go.)
pub trait DiscReader {
	/// # Default Device.
	///
	/// Return the name of the device to read when none is specified.
	fn default_device(&self) -> Cow<'_, str> { Cow::Borrowed(DEFAULT_DEVICE) }

	/// # Has Feature?
	///
	/// Return `true` if the reader can extract the given feature on this
	/// platform.
	fn has_feature(&self, feature: Feature) -> bool;

	/// # Read.
	///
	/// Read the table of contents (and any other requested, supported
	/// features) from the device. Unsupported features should simply be
	/// skipped rather than treated as errors.
	///
	/// ## Errors
	///
	/// Return an error if the device cannot be opened or read.
	fn read(&self, device: &str, features: Features) -> Result<RawToc, DiscIdError>;
}
