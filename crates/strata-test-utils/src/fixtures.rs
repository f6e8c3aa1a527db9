//! Fixed scenario data.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Extents exercised by the layout equivalence tests, one through five
/// dimensions, with odd sizes so tiles never divide evenly.
pub const LAYOUT_EXTENTS: &[&[usize]] = &[
    &[127],
    &[288],
    &[35, 31],
    &[72, 13],
    &[15, 13, 33],
    &[11, 38, 7],
    &[12, 13, 9, 10],
    &[7, 4, 9, 3],
    &[5, 12, 3, 4, 7],
];

/// Thread counts every parallel operation must agree across.
pub const THREAD_COUNTS: &[usize] = &[1, 4, 8];

/// Thirty-six words for the non-numeric sample scenario (a 6x6 image).
pub const WORDS: [&str; 36] = [
    "Bling", "Bromance", "Chillax", "Crunk", "D'oh", "Droolworthy", "Frankenfood", "Grrrl",
    "Guyliner", "Hater", "Illiterati", "Infomania", "Jeggings", "La-la Land", "Locavore",
    "Mankini", "Mini-Me", "Muffin Top", "Muggle", "Noob", "Obvs", "OMG", "Po-po", "Purple State",
    "Screenager", "Sexting", "Textspeak", "Totes", "Truthiness", "Twitterati", "Unfriend",
    "Upcycle", "Whatevs", "Whovian", "Woot", "Jean-Yves",
];

/// [`WORDS`] as owned strings in a seeded random order.
pub fn shuffled_words(rng: &mut ChaCha8Rng) -> Vec<String> {
    let mut words: Vec<String> = WORDS.iter().map(|w| w.to_string()).collect();
    words.shuffle(rng);
    words
}

/// The 10x9 byte image used by the erosion scenario: all 255 except a
/// single 0 at `(1, 4)`, in canonical order.
pub fn single_hole_10x9() -> Vec<u8> {
    let mut pixels = vec![255u8; 90];
    pixels[4 * 10 + 1] = 0;
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut words = shuffled_words(&mut rng(7));
        words.sort();
        let mut expected: Vec<String> = WORDS.iter().map(|w| w.to_string()).collect();
        expected.sort();
        assert_eq!(words, expected);
    }

    #[test]
    fn hole_is_at_one_four() {
        let img = single_hole_10x9();
        assert_eq!(img.iter().filter(|&&v| v == 0).count(), 1);
        assert_eq!(img[41], 0);
    }
}
