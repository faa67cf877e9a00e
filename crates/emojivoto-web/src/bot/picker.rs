use emojivoto_core::tally::RandSource;

/// The shortcode the bot prefers.
pub const FAVORITE: &str = ":doughnut:";

/// How often the bot votes for [`FAVORITE`] instead of picking at random.
pub const FAVORITE_PROBABILITY: f64 = 0.15;

/// Chooses the next shortcode to vote for.
///
/// Draws once to decide on [`FAVORITE`]; otherwise draws again for a uniform
/// index into `shortcodes`. Returns `None` only when the favorite was not
/// chosen and `shortcodes` is empty.
pub fn pick_choice<'a, R: RandSource<f64>>(
    rand: &R,
    shortcodes: &'a [String],
) -> Option<&'a str> {
    if rand.rand() < FAVORITE_PROBABILITY {
        return Some(FAVORITE);
    }
    if shortcodes.is_empty() {
        return None;
    }
    let index = (rand.rand() * shortcodes.len() as f64) as usize;
    shortcodes
        .get(index.min(shortcodes.len() - 1))
        .map(String::as_str)
}
