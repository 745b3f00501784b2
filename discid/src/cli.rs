/*!
# Disc ID: CLI
*/

use argyle::Argument;
use dactyl::traits::BytesToUnsigned;
use discid_core::{
	Disc,
	DiscIdError,
};
use fyi_msg::Msg;



/// # FLAG: Print Default Device.
const FLAG_DEVICE: u8 =  0b0000_0001;

/// # FLAG: Print FreeDB ID.
const FLAG_FREEDB: u8 =  0b0000_0010;

/// # FLAG: Print MusicBrainz ID.
const FLAG_ID: u8 =      0b0000_0100;

/// # FLAG: Print TOC String.
const FLAG_TOC: u8 =     0b0000_1000;

/// # FLAG: Print Submission URL.
const FLAG_URL: u8 =     0b0001_0000;

/// # FLAG: Verbose Logging.
const FLAG_VERBOSE: u8 = 0b0010_0000;

/// # FLAG: Any "Only" Output.
const FLAG_ONLY: u8 = FLAG_FREEDB | FLAG_ID | FLAG_TOC | FLAG_URL;



#[derive(Debug, Default)]
/// # Settings.
///
/// The raw CLI settings. The disc itself is built separately, after logging
/// has been set up.
pub(super) struct Settings {
	/// # First Track (Offsets Mode).
	first: Option<u8>,

	/// # Track ISRCs.
	isrcs: Vec<(u8, String)>,

	/// # Media Catalog Number.
	mcn: Option<String>,

	/// # TOC Parts.
	raw: Vec<String>,

	/// # Flags.
	flags: u8,
}

impl Settings {
	/// # Print Default Device?
	pub(super) const fn device(&self) -> bool { FLAG_DEVICE == self.flags & FLAG_DEVICE }

	/// # Verbose?
	pub(super) const fn verbose(&self) -> bool { FLAG_VERBOSE == self.flags & FLAG_VERBOSE }

	/// # Only?
	///
	/// Return the subset of values to print, in display order, if any were
	/// requested. The summary is printed otherwise.
	pub(super) fn only(&self, disc: &Disc) -> Option<Vec<String>> {
		if 0 == self.flags & FLAG_ONLY { return None; }

		let mut out = Vec::with_capacity(4);
		if 0 != self.flags & FLAG_ID { out.push(disc.id().to_string()); }
		if 0 != self.flags & FLAG_FREEDB { out.push(disc.freedb_id().to_string()); }
		if 0 != self.flags & FLAG_TOC { out.push(disc.toc_string()); }
		if 0 != self.flags & FLAG_URL { out.push(disc.submission_url()); }
		Some(out)
	}

	/// # Build Disc.
	///
	/// ## Errors
	///
	/// This returns an error if the TOC is missing or invalid.
	pub(super) fn disc(&self) -> Result<Disc, DiscIdError> {
		let mut disc =
			// Leadout and offsets.
			if let Some(first) = self.first {
				let mut offsets = Vec::with_capacity(100);
				let tokens = self.raw.iter().flat_map(|s| s.split_ascii_whitespace());
				for (index, token) in tokens.enumerate() {
					let num = u32::btou(token.as_bytes())
						.ok_or_else(|| DiscIdError::MalformedNumber {
							index,
							token: token.to_owned(),
						})?;
					offsets.push(num);
				}
				Disc::put(first, &offsets)?
			}
			// A TOC string, possibly spread across several arguments.
			else if self.raw.is_empty() { return Err(DiscIdError::PrintHelp); }
			else { Disc::parse(&self.raw.join(" "))? };

		if let Some(mcn) = self.mcn.as_deref() {
			disc = disc.with_mcn(mcn);
			if disc.mcn().is_some() && disc.barcode().is_none() {
				Msg::warning("The MCN is not a valid UPC/EAN barcode.").eprint();
			}
		}

		for (num, isrc) in &self.isrcs {
			if disc.track(*num).is_ok() { disc = disc.with_isrc(*num, isrc); }
			else {
				Msg::warning(format!("There is no track #{num}; ignoring its ISRC.")).eprint();
			}
		}

		Ok(disc)
	}
}



/// # Parse Options.
pub(super) fn parse() -> Result<Settings, DiscIdError> {
	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));

	let mut out = Settings::default();
	for arg in args {
		match arg {
			Argument::Key("--device") => { out.flags |= FLAG_DEVICE; },
			Argument::Key("--freedb") => { out.flags |= FLAG_FREEDB; },
			Argument::Key("-h" | "--help") => return Err(DiscIdError::PrintHelp),
			Argument::Key("--id") => { out.flags |= FLAG_ID; },
			Argument::Key("--toc") => { out.flags |= FLAG_TOC; },
			Argument::Key("--url") => { out.flags |= FLAG_URL; },
			Argument::Key("-v" | "--verbose") => { out.flags |= FLAG_VERBOSE; },
			Argument::Key("-V" | "--version") => return Err(DiscIdError::PrintVersion),

			Argument::KeyWithValue("-f" | "--first", s) => {
				let s = u8::btou(s.trim().as_bytes())
					.ok_or(DiscIdError::CliParse("-f/--first"))?;
				out.first.replace(s);
			},
			Argument::KeyWithValue("--isrc", s) => {
				out.isrcs.push(parse_isrc(&s)?);
			},
			Argument::KeyWithValue("--mcn", s) => { out.mcn.replace(s); },

			// Anything dash-prefixed is a typo.
			Argument::Other(s) =>
				if s.starts_with('-') { return Err(DiscIdError::CliArg(s)); }
				else { out.raw.push(s); },

			_ => {},
		}
	}

	Ok(out)
}



/// # Parse ISRC Option.
///
/// The value takes the form `NUM=ISRC`.
fn parse_isrc(raw: &str) -> Result<(u8, String), DiscIdError> {
	let (num, isrc) = raw.split_once('=')
		.ok_or(DiscIdError::CliParse("--isrc"))?;

	let num = u8::btou(num.trim().as_bytes())
		.ok_or(DiscIdError::CliParse("--isrc"))?;

	let isrc = isrc.trim();
	if isrc.is_empty() { Err(DiscIdError::CliParse("--isrc")) }
	else { Ok((num, isrc.to_owned())) }
}
