/*!
# Disc ID: Barcodes
*/

use crate::DiscIdError;
use std::fmt;
use trimothy::TrimSliceMatches;



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Barcode.
///
/// A disc's media catalog number is a UPC/EAN barcode, but drives hand it
/// over in all sorts of states: zero-filled when absent, null-padded,
/// whitespace-padded, etc. This wrapper normalizes the value to thirteen
/// check-digit-verified ASCII digits.
///
/// ```
/// use discid_core::Barcode;
///
/// let bc = Barcode::try_from("075678164125").unwrap();
/// assert_eq!(bc.as_str(), "0075678164125");
/// assert!(bc.is_upc());
/// assert_eq!(bc.to_string(), "0-75678-16412-5");
/// ```
pub struct Barcode([u8; 13]);

impl fmt::Display for Barcode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = self.as_str();

		// UPC-A: system, manufacturer, product, check.
		if self.is_upc() {
			write!(f, "{}-{}-{}-{}", &s[1..2], &s[2..7], &s[7..12], &s[12..])
		}
		// EAN-13: prefix, then two groups of six.
		else {
			write!(f, "{}-{}-{}", &s[..1], &s[1..7], &s[7..])
		}
	}
}

impl TryFrom<&[u8]> for Barcode {
	type Error = DiscIdError;

	fn try_from(mut src: &[u8]) -> Result<Self, Self::Error> {
		// Strip whitespace and leading zeroes from the front, and whitespace
		// and nulls from the back.
		src = src.trim_start_matches(|b| b.is_ascii_whitespace() || b == b'0');
		src = src.trim_end_matches(|b| b.is_ascii_whitespace() || b == 0);

		// Anything shorter than an EAN-8 is noise.
		if ! (8..=13).contains(&src.len()) || ! src.iter().all(u8::is_ascii_digit) {
			return Err(DiscIdError::Barcode);
		}

		// Left-pad with zeroes.
		let mut out = [b'0'; 13];
		out[13 - src.len()..].copy_from_slice(src);

		if check_digit(&out) { Ok(Self(out)) }
		else { Err(DiscIdError::Barcode) }
	}
}

impl TryFrom<&str> for Barcode {
	type Error = DiscIdError;

	#[inline]
	fn try_from(src: &str) -> Result<Self, Self::Error> {
		Self::try_from(src.as_bytes())
	}
}

impl Barcode {
	#[must_use]
	/// # As Str.
	///
	/// Return the thirteen digits as a string.
	pub fn as_str(&self) -> &str {
		// The contents are always ASCII digits.
		std::str::from_utf8(&self.0).unwrap_or_default()
	}

	#[must_use]
	/// # Is UPC?
	///
	/// UPC-A codes are EAN-13s with a leading zero.
	pub const fn is_upc(&self) -> bool { self.0[0] == b'0' }
}



/// # Verify Check Digit.
///
/// EAN-13 weights the digits alternately by one and three from the left; the
/// check digit brings the weighted total up to a multiple of ten.
fn check_digit(src: &[u8; 13]) -> bool {
	let total: u32 = src[..12].iter()
		.zip([1, 3].into_iter().cycle())
		.map(|(&b, w)| u32::from(b ^ b'0') * w)
		.sum();

	(10 - total % 10) % 10 == u32::from(src[12] ^ b'0')
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_check_digit() {
		assert!(check_digit(b"4006381333931"));
		assert!(check_digit(b"0075678164125"));
		assert!(check_digit(b"5099997200628"));
		assert!(! check_digit(b"0075678164126"));
		assert!(! check_digit(b"4006381333932"));
	}

	#[test]
	fn t_barcode() {
		let bc = Barcode::try_from("4006381333931").expect("Barcode failed.");
		assert!(! bc.is_upc());
		assert_eq!(bc.to_string(), "4-006381-333931");

		// Padding is fine.
		let bc2 = Barcode::try_from(&b"  4006381333931\0\0"[..]).expect("Barcode failed.");
		assert_eq!(bc, bc2);

		let bc = Barcode::try_from("0075678164125").expect("Barcode failed.");
		assert_eq!(bc.to_string(), "0-75678-16412-5");

		// Drives report a missing MCN as zeroes.
		assert_eq!(Barcode::try_from("0000000000000"), Err(DiscIdError::Barcode));
		assert_eq!(Barcode::try_from(""), Err(DiscIdError::Barcode));
		assert_eq!(Barcode::try_from("0075678164126"), Err(DiscIdError::Barcode));
		assert_eq!(Barcode::try_from("00756781641X5"), Err(DiscIdError::Barcode));
	}
}
