/*!
# Disc ID
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![expect(clippy::redundant_pub_crate, reason = "Unresolvable.")]



mod cli;

use discid_core::{
	DiscIdError,
	DEFAULT_DEVICE,
};
use env_logger::{
	Builder,
	Env,
};
use fyi_msg::Msg;
use std::process::ExitCode;



/// # Main.
///
/// This lets us bubble up startup errors so they can be pretty-printed.
fn main() -> ExitCode {
	match main__() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e @ (DiscIdError::PrintHelp | DiscIdError::PrintVersion)) => {
			println!("{e}");
			ExitCode::SUCCESS
		},
		Err(e) => {
			Msg::from(e).eprint();
			ExitCode::FAILURE
		},
	}
}

#[inline]
/// # Actual Main.
///
/// This does all the stuff.
fn main__() -> Result<(), DiscIdError> {
	let settings = cli::parse()?;

	// Logging goes to STDERR; RUST_LOG still wins if set.
	let level = if settings.verbose() { "debug" } else { "warn" };
	Builder::from_env(Env::default().default_filter_or(level))
		.format_timestamp(None)
		.init();

	// Just the device?
	if settings.device() {
		println!("{DEFAULT_DEVICE}");
		return Ok(());
	}

	let disc = settings.disc()?;

	// Specific values, one per line.
	if let Some(only) = settings.only(&disc) {
		for line in only { println!("{line}"); }
	}
	// The full summary.
	else {
		print!("{disc}");
		println!("\nSubmission: {}", disc.submission_url());
	}

	Ok(())
}
