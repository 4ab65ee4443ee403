// Nationality reference table and flag display resolution.

use crate::player::Player;

/// Fallback glyph shown when a player has no usable flag.
pub const FALLBACK_GLYPH: &str = "🏔️";

/// Directory (relative to the asset root) holding the flag images.
const FLAG_DIR: &str = "flag";

/// A supported nationality: selector key, display label, image asset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nationality {
    pub id: &'static str,
    pub label: &'static str,
    pub file: &'static str,
}

const NATIONALITIES: &[Nationality] = &[
    Nationality { id: "usa", label: "United States", file: "usa flag.png" },
    Nationality { id: "canada", label: "Canada", file: "canada flag.png" },
    Nationality { id: "uk", label: "United Kingdom", file: "uk flag.png" },
    Nationality { id: "china", label: "China", file: "china flag.png" },
    Nationality { id: "colombia", label: "Colombia", file: "colombia flag.png" },
    Nationality { id: "dominican", label: "Dominican Republic", file: "dr flag.png" },
    Nationality { id: "india", label: "India", file: "india flag.png" },
    Nationality { id: "italy", label: "Italy", file: "italy flag.png" },
    Nationality { id: "japan", label: "Japan", file: "japan flag.png" },
    Nationality { id: "switzerland", label: "Switzerland", file: "switzerland flag.png" },
    Nationality { id: "vietnam", label: "Vietnam", file: "vietnam flag.png" },
];

/// All nationalities in selector order.
pub fn all() -> &'static [Nationality] {
    NATIONALITIES
}

/// Find a nationality by key. Unknown keys return `None`.
pub fn lookup(id: &str) -> Option<&'static Nationality> {
    NATIONALITIES.iter().find(|n| n.id == id)
}

/// Relative, URI-encoded image path for a nationality key
/// (e.g. `usa` -> `flag/usa%20flag.png`).
pub fn flag_src(id: &str) -> Option<String> {
    lookup(id).map(|n| encode_uri(&format!("{FLAG_DIR}/{}", n.file)))
}

/// How a card should show its flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagDisplay {
    /// An image asset path plus an accessible label.
    Image { src: String, label: String },
    /// Freeform text or emoji, shown as-is.
    Glyph(String),
}

impl FlagDisplay {
    /// Short text form for surfaces that cannot draw images.
    pub fn text(&self) -> &str {
        match self {
            FlagDisplay::Image { label, .. } => label,
            FlagDisplay::Glyph(glyph) => glyph,
        }
    }
}

/// Resolve the flag for a player card.
///
/// Source preference: the stored `flagSrc`, then the table path for the
/// player's nationality key, then the legacy freeform `flag`. Only `.png`
/// sources are treated as images; anything else is shown as text, and a
/// player with nothing at all gets [`FALLBACK_GLYPH`].
pub fn resolve_flag(player: &Player) -> FlagDisplay {
    let key = player.nationality_key();
    let src = player
        .flag_src
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| key.and_then(flag_src))
        .or_else(|| player.flag.clone().filter(|s| !s.is_empty()));

    match src {
        Some(src) if src.contains(".png") => {
            let label = key
                .and_then(lookup)
                .map(|n| n.label)
                .unwrap_or("Flag")
                .to_string();
            FlagDisplay::Image { src, label }
        }
        Some(text) => FlagDisplay::Glyph(text),
        None => FlagDisplay::Glyph(FALLBACK_GLYPH.to_string()),
    }
}

/// Percent-encode a relative path the way a browser's `encodeURI` does:
/// reserved URI punctuation passes through, everything else outside the
/// unreserved set is UTF-8 percent-encoded.
fn encode_uri(input: &str) -> String {
    const KEEP: &[u8] = b";,/?:@&=+$-_.!~*'()#";

    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || KEEP.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
