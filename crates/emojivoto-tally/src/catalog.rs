//! The read-only registry of votable choices.
//!
//! A [`Catalog`] maps a shortcode (e.g. `:doughnut:`) to its display token.
//! The tally store never consults it directly; [`ValidatingTally`] is the only
//! place a vote is checked against it.
//!
//! [`ValidatingTally`]: crate::ValidatingTally

use std::collections::HashMap;

/// One votable option: a shortcode and the unicode emoji it names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Emoji {
    pub unicode: &'static str,
    pub shortcode: &'static str,
}

impl Emoji {
    pub const fn new(unicode: &'static str, shortcode: &'static str) -> Self {
        Self { unicode, shortcode }
    }
}

/// Read access to the set of valid choices.
pub trait Catalog: Send + Sync {
    /// All entries in catalog order.
    fn list(&self) -> &[Emoji];

    /// Looks up an entry by shortcode.
    fn find(&self, shortcode: &str) -> Option<&Emoji>;

    fn contains(&self, shortcode: &str) -> bool {
        self.find(shortcode).is_some()
    }
}

/// The fixed emoji set offered for voting.
pub const EMOJI: &[Emoji] = &[
    Emoji::new("👻", ":ghost:"),
    Emoji::new("🎱", ":8ball:"),
    Emoji::new("🏃", ":runner:"),
    Emoji::new("🌮", ":taco:"),
    Emoji::new("🍕", ":pizza:"),
    Emoji::new("🍩", ":doughnut:"),
    Emoji::new("❤️", ":heart:"),
    Emoji::new("🎉", ":tada:"),
    Emoji::new("🐶", ":dog:"),
    Emoji::new("🐱", ":cat:"),
    Emoji::new("🚀", ":rocket:"),
    Emoji::new("💯", ":100:"),
    Emoji::new("💩", ":poop:"),
    Emoji::new("😀", ":grinning:"),
    Emoji::new("😂", ":joy:"),
    Emoji::new("🤣", ":rofl:"),
    Emoji::new("😃", ":smiley:"),
    Emoji::new("😄", ":smile:"),
    Emoji::new("😅", ":sweat_smile:"),
    Emoji::new("😆", ":laughing:"),
    Emoji::new("😉", ":wink:"),
    Emoji::new("😊", ":blush:"),
    Emoji::new("😋", ":yum:"),
    Emoji::new("😎", ":sunglasses:"),
    Emoji::new("😍", ":heart_eyes:"),
    Emoji::new("😘", ":kissing_heart:"),
    Emoji::new("🤔", ":thinking:"),
    Emoji::new("🙄", ":roll_eyes:"),
    Emoji::new("😴", ":sleeping:"),
    Emoji::new("🤓", ":nerd_face:"),
    Emoji::new("😭", ":sob:"),
    Emoji::new("😱", ":scream:"),
    Emoji::new("🤯", ":exploding_head:"),
    Emoji::new("🥳", ":partying_face:"),
    Emoji::new("🤖", ":robot:"),
    Emoji::new("👽", ":alien:"),
    Emoji::new("🦄", ":unicorn:"),
    Emoji::new("🐙", ":octopus:"),
    Emoji::new("🐢", ":turtle:"),
    Emoji::new("🌈", ":rainbow:"),
    Emoji::new("🔥", ":fire:"),
    Emoji::new("⭐", ":star:"),
    Emoji::new("🍔", ":hamburger:"),
    Emoji::new("🍟", ":fries:"),
    Emoji::new("🍣", ":sushi:"),
    Emoji::new("🍦", ":icecream:"),
    Emoji::new("☕", ":coffee:"),
    Emoji::new("🍺", ":beer:"),
    Emoji::new("🎸", ":guitar:"),
    Emoji::new("⚽", ":soccer:"),
    Emoji::new("🏆", ":trophy:"),
    Emoji::new("👍", ":thumbsup:"),
    Emoji::new("👏", ":clap:"),
    Emoji::new("🙏", ":pray:"),
    Emoji::new("💪", ":muscle:"),
    Emoji::new("👀", ":eyes:"),
    Emoji::new("🧠", ":brain:"),
    Emoji::new("🦀", ":crab:"),
];

/// A [`Catalog`] over a static emoji table with a shortcode index.
#[derive(Clone, Debug)]
pub struct EmojiCatalog {
    emoji: &'static [Emoji],
    index: HashMap<&'static str, usize>,
}

impl EmojiCatalog {
    /// Builds the catalog over the built-in [`EMOJI`] table.
    pub fn new() -> Self {
        Self::from_static(EMOJI)
    }

    /// Builds a catalog over any static table.
    ///
    /// When a shortcode appears twice the first entry wins.
    pub fn from_static(emoji: &'static [Emoji]) -> Self {
        let mut index = HashMap::with_capacity(emoji.len());
        for (i, e) in emoji.iter().enumerate() {
            index.entry(e.shortcode).or_insert(i);
        }
        Self { emoji, index }
    }
}

impl Default for EmojiCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for EmojiCatalog {
    fn list(&self) -> &[Emoji] {
        self.emoji
    }

    fn find(&self, shortcode: &str) -> Option<&Emoji> {
        self.index.get(shortcode).map(|&i| &self.emoji[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_shortcodes_are_unique() {
        let seen: HashSet<_> = EMOJI.iter().map(|e| e.shortcode).collect();
        assert_eq!(seen.len(), EMOJI.len());
    }

    #[test]
    fn builtin_shortcodes_are_colon_wrapped() {
        for e in EMOJI {
            assert!(
                e.shortcode.starts_with(':') && e.shortcode.ends_with(':'),
                "{} is not a shortcode",
                e.shortcode
            );
        }
    }

    #[test]
    fn find_by_shortcode() {
        let catalog = EmojiCatalog::new();
        let doughnut = catalog.find(":doughnut:").unwrap();
        assert_eq!(doughnut.unicode, "🍩");
        assert!(catalog.contains(":heart:"));
        assert!(catalog.find(":not-an-emoji:").is_none());
        assert!(!catalog.contains("doughnut"));
    }

    #[test]
    fn list_preserves_table_order() {
        let catalog = EmojiCatalog::new();
        let shortcodes: Vec<_> = catalog.list().iter().map(|e| e.shortcode).collect();
        let expected: Vec<_> = EMOJI.iter().map(|e| e.shortcode).collect();
        assert_eq!(shortcodes, expected);
    }

    #[test]
    fn duplicate_shortcode_resolves_to_first_entry() {
        static TABLE: &[Emoji] = &[
            Emoji::new("🅰", ":dup:"),
            Emoji::new("🅱", ":dup:"),
        ];
        let catalog = EmojiCatalog::from_static(TABLE);
        assert_eq!(catalog.find(":dup:").unwrap().unicode, "🅰");
        assert_eq!(catalog.list().len(), 2);
    }
}
