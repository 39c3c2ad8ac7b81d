//! Text direction and direction-aware class derivation.
//!
//! Layouts are written against logical roles ("margin at the start of the
//! line") rather than physical sides. [`derive_classes`] maps each role to
//! the utility-class fragment for the active direction, so the same markup
//! mirrors itself when the language switches between Arabic and English.
//!
//! ```
//! use planhub_style::direction::{derive_classes, LayoutRole};
//!
//! let rtl = derive_classes(true);
//! let ltr = derive_classes(false);
//! assert_eq!(rtl.get(LayoutRole::MarginStart), "mr-");
//! assert_eq!(ltr.get(LayoutRole::MarginStart), "ml-");
//! ```

use std::fmt;

use serde::Serialize;
use unicode_bidi::{bidi_class, BidiClass};

/// Text direction for bidirectional text support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// Left-to-right (e.g., English, French)
    #[default]
    Ltr,
    /// Right-to-left (e.g., Arabic, Hebrew)
    Rtl,
}

impl TextDirection {
    /// Detect the base direction of a string from its first strong
    /// directional character.
    ///
    /// Strings with no strong character (digits, punctuation, empty) are LTR.
    pub fn detect(text: &str) -> Self {
        for ch in text.chars() {
            match bidi_class(ch) {
                BidiClass::L => return TextDirection::Ltr,
                BidiClass::R | BidiClass::AL => return TextDirection::Rtl,
                _ => continue,
            }
        }

        TextDirection::Ltr
    }

    /// Direction conventionally used by a language or locale tag.
    ///
    /// Only the primary subtag is inspected, so `ar-EG` and `ar_SA` are RTL.
    pub fn for_language(tag: &str) -> Self {
        let lang = tag.trim().split(['-', '_']).next().unwrap_or_default();

        match lang.to_ascii_lowercase().as_str() {
            "ar" | "he" | "fa" | "ur" | "yi" | "ps" | "sd" | "ug" | "ckb" | "dv" => {
                TextDirection::Rtl
            }
            _ => TextDirection::Ltr,
        }
    }

    /// Returns true if this is left-to-right direction.
    pub fn is_ltr(&self) -> bool {
        matches!(self, TextDirection::Ltr)
    }

    /// Returns true if this is right-to-left direction.
    pub fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::Rtl)
    }

    /// Value for an HTML `dir` attribute.
    pub fn as_attr(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl From<bool> for TextDirection {
    fn from(is_rtl: bool) -> Self {
        if is_rtl {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

/// Logical layout roles that change physical side with text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutRole {
    TextAlign,
    SpaceReverse,
    MarginStart,
    MarginEnd,
    PaddingStart,
    PaddingEnd,
    RoundedStart,
    RoundedEnd,
    BorderStart,
    BorderEnd,
}

impl LayoutRole {
    /// Every role, in table order.
    pub const ALL: [LayoutRole; 10] = [
        LayoutRole::TextAlign,
        LayoutRole::SpaceReverse,
        LayoutRole::MarginStart,
        LayoutRole::MarginEnd,
        LayoutRole::PaddingStart,
        LayoutRole::PaddingEnd,
        LayoutRole::RoundedStart,
        LayoutRole::RoundedEnd,
        LayoutRole::BorderStart,
        LayoutRole::BorderEnd,
    ];

    /// The camelCase key used when the map is handed to templates.
    pub fn key(&self) -> &'static str {
        match self {
            LayoutRole::TextAlign => "textAlign",
            LayoutRole::SpaceReverse => "spaceReverse",
            LayoutRole::MarginStart => "marginStart",
            LayoutRole::MarginEnd => "marginEnd",
            LayoutRole::PaddingStart => "paddingStart",
            LayoutRole::PaddingEnd => "paddingEnd",
            LayoutRole::RoundedStart => "roundedStart",
            LayoutRole::RoundedEnd => "roundedEnd",
            LayoutRole::BorderStart => "borderStart",
            LayoutRole::BorderEnd => "borderEnd",
        }
    }
}

/// Class-name fragments for every [`LayoutRole`] under one direction.
///
/// Values are produced by [`derive_classes`] and never cached; hold on to
/// one only for the duration of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionClasses {
    pub text_align: &'static str,
    pub space_reverse: &'static str,
    pub margin_start: &'static str,
    pub margin_end: &'static str,
    pub padding_start: &'static str,
    pub padding_end: &'static str,
    pub rounded_start: &'static str,
    pub rounded_end: &'static str,
    pub border_start: &'static str,
    pub border_end: &'static str,
}

impl DirectionClasses {
    /// The fragment for a role.
    pub fn get(&self, role: LayoutRole) -> &'static str {
        match role {
            LayoutRole::TextAlign => self.text_align,
            LayoutRole::SpaceReverse => self.space_reverse,
            LayoutRole::MarginStart => self.margin_start,
            LayoutRole::MarginEnd => self.margin_end,
            LayoutRole::PaddingStart => self.padding_start,
            LayoutRole::PaddingEnd => self.padding_end,
            LayoutRole::RoundedStart => self.rounded_start,
            LayoutRole::RoundedEnd => self.rounded_end,
            LayoutRole::BorderStart => self.border_start,
            LayoutRole::BorderEnd => self.border_end,
        }
    }

    /// Iterate over `(role, fragment)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (LayoutRole, &'static str)> + '_ {
        LayoutRole::ALL.iter().map(move |&role| (role, self.get(role)))
    }

    /// Build a full class name from a role's fragment.
    ///
    /// Prefix fragments (ending in `-`) get `suffix` appended, complete
    /// classes such as `text-right` are returned as-is, and an empty
    /// fragment stays empty.
    pub fn compose(&self, role: LayoutRole, suffix: &str) -> String {
        let fragment = self.get(role);
        if fragment.ends_with('-') {
            format!("{fragment}{suffix}")
        } else {
            fragment.to_string()
        }
    }
}

/// Derive the class table for a direction.
pub fn derive_classes(is_rtl: bool) -> DirectionClasses {
    if is_rtl {
        DirectionClasses {
            text_align: "text-right",
            space_reverse: "space-x-reverse",
            margin_start: "mr-",
            margin_end: "ml-",
            padding_start: "pr-",
            padding_end: "pl-",
            rounded_start: "rounded-r-",
            rounded_end: "rounded-l-",
            border_start: "border-r-",
            border_end: "border-l-",
        }
    } else {
        DirectionClasses {
            text_align: "text-left",
            space_reverse: "",
            margin_start: "ml-",
            margin_end: "mr-",
            padding_start: "pl-",
            padding_end: "pr-",
            rounded_start: "rounded-l-",
            rounded_end: "rounded-r-",
            border_start: "border-l-",
            border_end: "border-r-",
        }
    }
}
