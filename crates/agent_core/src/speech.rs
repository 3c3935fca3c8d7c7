//! Flavor lines for speech bubbles. Purely cosmetic.

use rand::Rng;

/// Said by a worker running home.
pub const FLEE_LINES: &[&str] = &["Run awaaayyy", "Nope, nope, nope", "Back to base!"];

/// Said by a warrior pulling the trigger.
pub const SHOOT_LINES: &[&str] = &[
    "Sorry, broke pipeline",
    "Nyt on kovaa koodia",
    "Wololooo",
    "Iffia ja hoelkynkoelkyn",
    "Game engine failed",
];

/// Uniform pick from a table.
pub fn pick<R: Rng + ?Sized>(rng: &mut R, lines: &'static [&'static str]) -> &'static str {
    if lines.is_empty() {
        return "";
    }
    lines[rng.gen_range(0..lines.len())]
}

/// Callout for a unit that just took damage.
#[must_use]
pub fn damage_callout(health: u32) -> String {
    format!("Health is {health}")
}
