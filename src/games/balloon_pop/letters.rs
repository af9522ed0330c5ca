use rand::Rng;

pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Uniformly random uppercase ASCII letter.
pub fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
}

/// Folds a typed character to the form balloons carry. Anything that is not
/// an ASCII letter is not game input.
pub fn normalize_key(c: char) -> Option<char> {
    c.is_ascii_alphabetic().then(|| c.to_ascii_uppercase())
}
