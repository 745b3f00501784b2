/*!
# Disc ID: Identifiers
*/

use base64::{
	Engine,
	engine::general_purpose::STANDARD,
};
use crate::{
	DiscIdError,
	MAX_TRACK,
	SECTORS_PER_SECOND,
	Toc,
};
use sha1::{
	Digest,
	Sha1,
};
use std::{
	fmt,
	str::FromStr,
};



/// # Uppercase Hex Digits.
const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// # MusicBrainz Buffer Length.
///
/// Two 2-digit track numbers, then 100 8-digit offsets (leadout + 99 tracks).
const MB_BUF_LEN: usize = 2 + 2 + 8 * 100;

/// # MusicBrainz ID Length.
const MB_ID_LEN: usize = 28;



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # MusicBrainz Disc ID.
///
/// This is a SHA-1 digest of the table of contents, base64-encoded with a
/// URL-friendly alphabet (`.`, `_`, and `-` in place of `+`, `/`, and `=`).
///
/// ```
/// use discid_core::Toc;
///
/// let toc: Toc = "1 1 44942 150".parse().unwrap();
/// assert_eq!(toc.musicbrainz_id().as_str(), "ANJa4DGYN_ktpzOwvVPtcjwP7mE-");
/// ```
pub struct MusicBrainzId([u8; MB_ID_LEN]);

impl AsRef<str> for MusicBrainzId {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for MusicBrainzId {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl From<&Toc> for MusicBrainzId {
	fn from(toc: &Toc) -> Self {
		// Build the fixed-width hex buffer. Slots for tracks outside the
		// first/last range stay zero.
		let mut buf = [b'0'; MB_BUF_LEN];
		hex_into(&mut buf[..2], u32::from(toc.first_track()));
		hex_into(&mut buf[2..4], u32::from(toc.last_track()));
		hex_into(&mut buf[4..12], toc.leadout());
		for (num, chunk) in (1..=MAX_TRACK).zip(buf[12..].chunks_exact_mut(8)) {
			if let Some(offset) = toc.track_offset(num) { hex_into(chunk, offset); }
		}

		let mut hasher = Sha1::new();
		hasher.update(buf);
		let digest = hasher.finalize();

		// Twenty bytes always encode to 28 characters, one of them padding.
		let mut out = [0_u8; MB_ID_LEN];
		let len = STANDARD.encode_slice(digest, &mut out).unwrap_or_default();
		debug_assert_eq!(len, MB_ID_LEN, "Bug: wrong MusicBrainz ID length.");

		for b in &mut out {
			match *b {
				b'+' => { *b = b'.'; },
				b'/' => { *b = b'_'; },
				b'=' => { *b = b'-'; },
				_ => {},
			}
		}

		let out = Self(out);
		log::debug!("MusicBrainz ID for {toc}: {out}");
		out
	}
}

impl FromStr for MusicBrainzId {
	type Err = DiscIdError;

	/// # Parse ID.
	///
	/// ## Errors
	///
	/// The string must be exactly 28 characters from the MusicBrainz alphabet,
	/// ending with the (translated) padding character.
	fn from_str(src: &str) -> Result<Self, Self::Err> {
		let out: [u8; MB_ID_LEN] = src.trim().as_bytes()
			.try_into()
			.map_err(|_| DiscIdError::MusicBrainzId)?;

		if
			out[MB_ID_LEN - 1] == b'-' &&
			out[..MB_ID_LEN - 1].iter().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_'))
		{
			Ok(Self(out))
		}
		else { Err(DiscIdError::MusicBrainzId) }
	}
}

impl MusicBrainzId {
	#[must_use]
	/// # As Str.
	pub fn as_str(&self) -> &str {
		// The contents are always ASCII.
		std::str::from_utf8(&self.0).unwrap_or_default()
	}
}



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # FreeDB (CDDB) Disc ID.
///
/// The legacy 32-bit identifier: a checksum of the track start times in the
/// high byte, the playing time in seconds in the middle two, and the track
/// count in the low byte. It is displayed as eight lowercase hex digits.
///
/// ```
/// use discid_core::Toc;
///
/// let toc = Toc::from_offsets(1, &[
///     206535, 150, 18901, 39738, 59557, 79152,
///     100126, 124833, 147278, 166336, 182560,
/// ]).unwrap();
/// assert_eq!(toc.freedb_id().to_string(), "830abf0a");
/// ```
pub struct FreedbId(u32);

impl fmt::Display for FreedbId {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:08x}", self.0)
	}
}

impl From<&Toc> for FreedbId {
	fn from(toc: &Toc) -> Self {
		let checksum = toc.offsets().iter()
			.map(|&o| digit_sum(o.wrapping_div(SECTORS_PER_SECOND)))
			.sum::<u32>() % 255;

		let first = toc.offsets().first().copied().unwrap_or_default();
		let total = toc.leadout().wrapping_div(SECTORS_PER_SECOND) -
			first.wrapping_div(SECTORS_PER_SECOND);

		// The total only gets two bytes.
		let out = Self(
			(checksum << 24) |
			((total & 0xFFFF) << 8) |
			u32::from(toc.track_count())
		);
		log::debug!("FreeDB ID for {toc}: {out}");
		out
	}
}

impl From<FreedbId> for u32 {
	#[inline]
	fn from(src: FreedbId) -> Self { src.0 }
}

impl FromStr for FreedbId {
	type Err = DiscIdError;

	/// # Parse ID.
	///
	/// ## Errors
	///
	/// The string must be exactly eight hex digits.
	fn from_str(src: &str) -> Result<Self, Self::Err> {
		let src = src.trim();
		if src.len() == 8 && src.bytes().all(|b| b.is_ascii_hexdigit()) {
			u32::from_str_radix(src, 16)
				.map(Self)
				.map_err(|_| DiscIdError::FreedbId)
		}
		else { Err(DiscIdError::FreedbId) }
	}
}

impl FreedbId {
	#[must_use]
	/// # As U32.
	pub const fn as_u32(self) -> u32 { self.0 }
}



#[cfg(feature = "serde")]
/// # Helper: Serde (as String).
macro_rules! serde_str {
	($($ty:ty),+) => ($(
		impl serde::Serialize for $ty {
			#[inline]
			fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
			where S: serde::Serializer { serializer.collect_str(self) }
		}

		impl<'de> serde::Deserialize<'de> for $ty {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where D: serde::Deserializer<'de> {
				let raw = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
				Self::from_str(&raw).map_err(serde::de::Error::custom)
			}
		}
	)+);
}

#[cfg(feature = "serde")]
serde_str!(FreedbId, MusicBrainzId);



/// # Digit Sum.
///
/// Add up the decimal digits of a number.
const fn digit_sum(mut num: u32) -> u32 {
	let mut out = 0;
	while 0 < num {
		out += num % 10;
		num = num.wrapping_div(10);
	}
	out
}

/// # Hex Into.
///
/// Write `num` into `dst` as zero-padded uppercase hex, using the full width
/// of the slice.
fn hex_into(dst: &mut [u8], mut num: u32) {
	for b in dst.iter_mut().rev() {
		*b = HEX[(num & 0xF) as usize];
		num >>= 4;
	}
}



#[cfg(test)]
mod test {
	use super::*;

	const OFFSETS: [u32; 11] = [
		206_535, 150, 18_901, 39_738, 59_557, 79_152,
		100_126, 124_833, 147_278, 166_336, 182_560,
	];

	#[test]
	fn t_digit_sum() {
		assert_eq!(digit_sum(0), 0);
		assert_eq!(digit_sum(2), 2);
		assert_eq!(digit_sum(252), 9);
		assert_eq!(digit_sum(2434), 13);
	}

	#[test]
	fn t_hex_into() {
		let mut buf = [0_u8; 8];
		hex_into(&mut buf, 206_535);
		assert_eq!(&buf, b"000326C7");

		let mut buf = [0_u8; 2];
		hex_into(&mut buf, 10);
		assert_eq!(&buf, b"0A");
	}

	#[test]
	fn t_musicbrainz() {
		let toc = Toc::from_offsets(1, &OFFSETS).expect("TOC failed.");
		assert_eq!(toc.musicbrainz_id().as_str(), "Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-");

		// Tracks are slotted by number, so the same offsets shifted over
		// produce something else entirely.
		let toc = Toc::from_offsets(3, &OFFSETS).expect("TOC failed.");
		assert_eq!(toc.musicbrainz_id().as_str(), "ByBKvJM1hBL7XtvsPyYtIjlX0Bw-");

		let toc: Toc = "1 1 44942 150".parse().expect("TOC failed.");
		assert_eq!(toc.musicbrainz_id().as_str(), "ANJa4DGYN_ktpzOwvVPtcjwP7mE-");

		let toc = Toc::from_offsets(1, &[
			242_457, 150, 44_942, 61_305, 72_755, 96_360, 130_485,
			147_315, 164_275, 190_702, 205_412, 220_437,
		]).expect("TOC failed.");
		assert_eq!(toc.musicbrainz_id().to_string(), "lSOVc5h6IXSuzcamJS1Gp4_tRuA-");
	}

	#[test]
	fn t_musicbrainz_stable() {
		let a = Toc::from_offsets(1, &OFFSETS).expect("TOC failed.");
		let b = Toc::from_offsets(1, &OFFSETS).expect("TOC failed.");
		assert_eq!(a.musicbrainz_id(), a.musicbrainz_id());
		assert_eq!(a.musicbrainz_id(), b.musicbrainz_id());

		// Nudge each offset by a sector.
		for idx in 0..OFFSETS.len() {
			let mut alt = OFFSETS;
			alt[idx] += 1;
			let c = Toc::from_offsets(1, &alt).expect("TOC failed.");
			assert_ne!(
				a.musicbrainz_id(),
				c.musicbrainz_id(),
				"Changing offset #{idx} should change the ID.",
			);
		}
	}

	#[test]
	fn t_musicbrainz_from_str() {
		let id = MusicBrainzId::from_str("Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-").expect("ID failed.");
		assert_eq!(id, Toc::from_offsets(1, &OFFSETS).expect("TOC failed.").musicbrainz_id());

		for bad in ["", "Wn8eRBtfLDfM0qjYPdxrz.Zjs_U", "Wn8eRBtfLDfM0qjYPdxrz+Zjs/U=", "Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-X"] {
			assert_eq!(MusicBrainzId::from_str(bad), Err(DiscIdError::MusicBrainzId));
		}
	}

	#[test]
	fn t_freedb() {
		let toc = Toc::from_offsets(1, &OFFSETS).expect("TOC failed.");
		let id = toc.freedb_id();
		assert_eq!(id.to_string(), "830abf0a");
		assert_eq!(id.as_u32(), 0x830a_bf0a);
		assert_eq!(id, toc.freedb_id());
		assert_eq!(FreedbId::from_str("830abf0a"), Ok(id));
		assert_eq!(FreedbId::from_str("830ABF0A"), Ok(id));

		for bad in ["", "830abf0", "830abf0ab", "830abfxa"] {
			assert_eq!(FreedbId::from_str(bad), Err(DiscIdError::FreedbId));
		}

		// A single-track disc: 150 / 75 = 2 seconds, 44942 / 75 = 599.
		let toc: Toc = "1 1 44942 150".parse().expect("TOC failed.");
		assert_eq!(toc.freedb_id().as_u32(), (2 << 24) | (597 << 8) | 1);

		// Absurdly long leadouts must not bleed into the checksum.
		let toc = Toc::from_offsets(1, &[5_000_000, 150]).expect("TOC failed.");
		assert_eq!(toc.freedb_id().to_string(), "02046801");
	}

	#[cfg(feature = "serde")]
	#[test]
	fn t_serde() {
		let toc = Toc::from_offsets(1, &OFFSETS).expect("TOC failed.");

		let id = toc.musicbrainz_id();
		let json = serde_json::to_string(&id).expect("Serialize failed.");
		assert_eq!(json, "\"Wn8eRBtfLDfM0qjYPdxrz.Zjs_U-\"");
		let de: MusicBrainzId = serde_json::from_str(&json).expect("Deserialize failed.");
		assert_eq!(de, id);

		let id = toc.freedb_id();
		let json = serde_json::to_string(&id).expect("Serialize failed.");
		assert_eq!(json, "\"830abf0a\"");
		let de: FreedbId = serde_json::from_str(&json).expect("Deserialize failed.");
		assert_eq!(de, id);
	}
}
