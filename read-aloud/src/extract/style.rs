//! Computed visibility and font size from inline styles.

use super::dom::Element;

/// Font size of the root element.
pub const ROOT_FONT_SIZE_PX: f32 = 16.0;

/// Elements the user agent never renders.
const HIDDEN_BY_DEFAULT: &[&str] = &[
    "head", "script", "style", "noscript", "template", "title", "meta", "link",
];

/// The style properties that decide whether text is legible on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    /// The element or an ancestor is `display: none`
    pub display_none: bool,
    pub visibility_hidden: bool,
    pub font_size_px: f32,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display_none: false,
            visibility_hidden: false,
            font_size_px: ROOT_FONT_SIZE_PX,
        }
    }
}

impl ComputedStyle {
    /// Style of `element` given that this is its parent's style.
    pub fn for_child(&self, element: &Element) -> Self {
        let mut display_none =
            HIDDEN_BY_DEFAULT.contains(&element.tag.as_str()) || element.attr("hidden").is_some();
        let mut visibility_hidden = self.visibility_hidden;
        let mut font_size_px = self.font_size_px;

        for (property, value) in declarations(element.attr("style").unwrap_or_default()) {
            match property.as_str() {
                "display" => display_none = value == "none",
                "visibility" => match value.as_str() {
                    "hidden" | "collapse" => visibility_hidden = true,
                    "visible" => visibility_hidden = false,
                    _ => {}
                },
                "font-size" => {
                    if let Some(px) = parse_font_size(&value, self.font_size_px) {
                        font_size_px = px;
                    }
                }
                _ => {}
            }
        }

        Self {
            display_none: display_none || self.display_none,
            visibility_hidden,
            font_size_px,
        }
    }

    /// Whether text directly inside an element with this style is legible.
    pub fn is_legible(&self, min_font_size_px: f32) -> bool {
        !self.display_none && !self.visibility_hidden && self.font_size_px >= min_font_size_px
    }
}

/// `property: value` pairs of an inline style, lowercased, `!important` dropped.
fn declarations(style: &str) -> impl Iterator<Item = (String, String)> + '_ {
    style.split(';').filter_map(|declaration| {
        let (property, value) = declaration.split_once(':')?;
        let value = value.trim().to_ascii_lowercase();
        let value = value.trim_end_matches("!important").trim().to_string();
        Some((property.trim().to_ascii_lowercase(), value))
    })
}

/// Resolve a `font-size` value to pixels. None for values we can't interpret.
fn parse_font_size(value: &str, parent_px: f32) -> Option<f32> {
    let keyword = match value {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        "xxx-large" => Some(48.0),
        "smaller" => Some(parent_px / 1.2),
        "larger" => Some(parent_px * 1.2),
        _ => None,
    };
    if keyword.is_some() {
        return keyword;
    }

    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f32 = number.parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }

    match unit.trim() {
        "px" => Some(number),
        "pt" => Some(number * 4.0 / 3.0),
        "em" => Some(number * parent_px),
        "rem" => Some(number * ROOT_FONT_SIZE_PX),
        "%" => Some(number / 100.0 * parent_px),
        "" if number == 0.0 => Some(0.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(tag: &str, style: &str) -> Element {
        Element::new(tag).with_attr("style", style)
    }

    #[test]
    fn test_defaults_are_visible() {
        let style = ComputedStyle::default().for_child(&Element::new("p"));
        assert!(style.is_legible(8.0));
        assert_eq!(style.font_size_px, 16.0);
    }

    #[test]
    fn test_hidden_by_user_agent_and_attribute() {
        let root = ComputedStyle::default();
        assert!(root.for_child(&Element::new("script")).display_none);
        assert!(root.for_child(&Element::new("noscript")).display_none);
        assert!(
            root.for_child(&Element::new("div").with_attr("hidden", ""))
                .display_none
        );
        // Author styles override the hidden attribute
        let shown = Element::new("div")
            .with_attr("hidden", "")
            .with_attr("style", "display: block");
        assert!(!root.for_child(&shown).display_none);
    }

    #[test]
    fn test_display_none_sticks_to_descendants() {
        let parent = ComputedStyle::default().for_child(&styled("div", "display:none"));
        let child = parent.for_child(&styled("span", "display: inline"));
        assert!(child.display_none);
    }

    #[test]
    fn test_visibility_inherits_and_can_be_reset() {
        let parent = ComputedStyle::default().for_child(&styled("div", "visibility: hidden"));
        assert!(parent.for_child(&Element::new("span")).visibility_hidden);
        assert!(
            !parent
                .for_child(&styled("span", "visibility: visible"))
                .visibility_hidden
        );
        assert!(
            ComputedStyle::default()
                .for_child(&styled("tr", "VISIBILITY: Collapse !important"))
                .visibility_hidden
        );
    }

    #[test]
    fn test_font_sizes() {
        assert_eq!(parse_font_size("12px", 16.0), Some(12.0));
        assert_eq!(parse_font_size("6pt", 16.0), Some(8.0));
        assert_eq!(parse_font_size("0.5em", 10.0), Some(5.0));
        assert_eq!(parse_font_size("2rem", 10.0), Some(32.0));
        assert_eq!(parse_font_size("50%", 12.0), Some(6.0));
        assert_eq!(parse_font_size("small", 40.0), Some(13.0));
        assert_eq!(parse_font_size("0", 16.0), Some(0.0));
        assert_eq!(parse_font_size("calc(1px + 2px)", 16.0), None);
        assert_eq!(parse_font_size("-3px", 16.0), None);
    }

    #[test]
    fn test_small_text_is_not_legible() {
        let parent = ComputedStyle::default().for_child(&styled("div", "font-size: 0.25em"));
        assert_eq!(parent.font_size_px, 4.0);
        assert!(!parent.is_legible(8.0));
        // Relative sizes resolve against the parent
        let child = parent.for_child(&styled("span", "font-size: 300%"));
        assert!(child.is_legible(8.0));
    }
}
