//! Tag classification tables.

/// Elements that never have children, whether or not the source self-closes them.
pub const VOID_TAGS: [&str; 14] = [
    "!doctype", "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "source", "track", "wbr",
];

/// Elements always written with an explicit closing tag, even when empty.
pub const NEVER_SELF_CLOSING: [&str; 5] = ["script", "style", "html", "head", "body"];

/// Elements whose content is read as raw text rather than markup.
///
/// `block` is an internal marker element for opaque template blocks.
pub const RAW_TEXT_TAGS: [&str; 3] = ["script", "style", "block"];

/// The lowercased name the tokenizer gives a doctype declaration.
pub const DOCTYPE: &str = "!doctype";

/// Whether `name` is a void element.
#[must_use]
pub fn is_void(name: &str) -> bool {
    VOID_TAGS.contains(&name)
}

/// Whether `name` must always be written with a closing tag.
#[must_use]
pub fn is_never_self_closing(name: &str) -> bool {
    NEVER_SELF_CLOSING.contains(&name)
}

/// Whether `name` switches the tokenizer into raw-text reading.
#[must_use]
pub fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_TAGS.contains(&name)
}
