use std::ops::Range;

use rand::Rng;

/// Session suffixes are drawn from this range. Collisions only overwrite
/// the potfile and outfile of an older run with the same handshake.
pub const SUFFIX_RANGE: Range<u32> = 0..1000;

/// Strip exactly one trailing `.<extension>` from a handshake file name.
pub fn session_base_name<'a>(handshake: &'a str, extension: &str) -> &'a str {
    handshake
        .strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .filter(|base| !base.is_empty())
        .unwrap_or(handshake)
}

/// `<base>-<suffix>`, used to namespace hashcat's restore, potfile and outfile.
pub fn session_name<R: Rng + ?Sized>(handshake: &str, extension: &str, rng: &mut R) -> String {
    let suffix = rng.gen_range(SUFFIX_RANGE);
    format!("{}-{}", session_base_name(handshake, extension), suffix)
}
