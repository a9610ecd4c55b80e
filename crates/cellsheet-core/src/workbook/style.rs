//! Per-cell text styling.
//!
//! Style commands never reach into the presentation layer: the surface
//! supplies an [`ActiveCellResolver`] and the workbook writes the resolved
//! cell's [`StyleMap`].

use cellsheet_engine::engine::CellId;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::Workbook;

/// The fixed set of style attributes a cell can carry.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum StyleAttribute {
    FontFamily,
    FontSize,
    FontWeight,
    FontStyle,
    TextDecoration,
    TextAlign,
    Color,
    BackgroundColor,
}

/// Style attributes recorded for one cell.
pub type StyleMap = BTreeMap<StyleAttribute, String>;

impl StyleAttribute {
    pub const ALL: [StyleAttribute; 8] = [
        StyleAttribute::FontFamily,
        StyleAttribute::FontSize,
        StyleAttribute::FontWeight,
        StyleAttribute::FontStyle,
        StyleAttribute::TextDecoration,
        StyleAttribute::TextAlign,
        StyleAttribute::Color,
        StyleAttribute::BackgroundColor,
    ];

    /// CSS property name.
    pub fn css_name(self) -> &'static str {
        match self {
            StyleAttribute::FontFamily => "font-family",
            StyleAttribute::FontSize => "font-size",
            StyleAttribute::FontWeight => "font-weight",
            StyleAttribute::FontStyle => "font-style",
            StyleAttribute::TextDecoration => "text-decoration",
            StyleAttribute::TextAlign => "text-align",
            StyleAttribute::Color => "color",
            StyleAttribute::BackgroundColor => "background-color",
        }
    }

    /// Value set by the on/off toggles (bold, italic, underline).
    pub fn toggle_value(self) -> Option<&'static str> {
        match self {
            StyleAttribute::FontWeight => Some("bold"),
            StyleAttribute::FontStyle => Some("italic"),
            StyleAttribute::TextDecoration => Some("underline"),
            _ => None,
        }
    }
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for StyleAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        StyleAttribute::ALL
            .into_iter()
            .find(|attr| attr.css_name() == wanted || attr.css_name().replace('-', "") == wanted)
            .ok_or_else(|| format!("Unknown style attribute: {}", s))
    }
}

/// Capability supplied by the surface: which cell owns the current selection.
pub trait ActiveCellResolver {
    fn resolve_active_cell(&self) -> Option<CellId>;
}

impl ActiveCellResolver for Option<CellId> {
    fn resolve_active_cell(&self) -> Option<CellId> {
        *self
    }
}

impl Workbook {
    /// Apply a style attribute to the active cell of the current sheet.
    ///
    /// Returns the styled cell, or `None` when nothing is selected.
    pub fn apply_style<R: ActiveCellResolver + ?Sized>(
        &mut self,
        resolver: &R,
        attribute: StyleAttribute,
        value: &str,
    ) -> Option<CellId> {
        let id = resolver.resolve_active_cell()?;
        self.current_sheet_mut().set_style(id, attribute, value);
        Some(id)
    }

    /// Flip an on/off attribute (bold, italic, underline) on the active cell.
    pub fn toggle_style<R: ActiveCellResolver + ?Sized>(
        &mut self,
        resolver: &R,
        attribute: StyleAttribute,
    ) -> Option<CellId> {
        let on = attribute.toggle_value()?;
        let id = resolver.resolve_active_cell()?;
        let sheet = self.current_sheet_mut();
        let is_on = sheet
            .style(id)
            .and_then(|map| map.get(&attribute))
            .is_some_and(|v| v == on);
        sheet.set_style(id, attribute, if is_on { "" } else { on });
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> CellId {
        CellId::parse(name).unwrap()
    }

    #[test]
    fn test_attribute_names_parse() {
        assert_eq!(
            "background-color".parse::<StyleAttribute>(),
            Ok(StyleAttribute::BackgroundColor)
        );
        assert_eq!("fontWeight".parse::<StyleAttribute>(), Ok(StyleAttribute::FontWeight));
        assert!("border".parse::<StyleAttribute>().is_err());
    }

    #[test]
    fn test_apply_style_merges() {
        let mut wb = Workbook::new();
        let target = Some(id("B2"));
        wb.apply_style(&target, StyleAttribute::Color, "red");
        wb.apply_style(&target, StyleAttribute::TextAlign, "center");
        let map = wb.current_sheet().style(id("B2")).unwrap();
        assert_eq!(map.get(&StyleAttribute::Color).map(String::as_str), Some("red"));
        assert_eq!(
            map.get(&StyleAttribute::TextAlign).map(String::as_str),
            Some("center")
        );
    }

    #[test]
    fn test_apply_style_without_selection_is_noop() {
        let mut wb = Workbook::new();
        assert_eq!(wb.apply_style(&None::<CellId>, StyleAttribute::Color, "red"), None);
        assert!(wb.current_sheet().is_empty());
    }

    #[test]
    fn test_toggle_style() {
        let mut wb = Workbook::new();
        let target = Some(id("A1"));
        wb.toggle_style(&target, StyleAttribute::FontWeight);
        assert_eq!(
            wb.current_sheet()
                .style(id("A1"))
                .and_then(|m| m.get(&StyleAttribute::FontWeight))
                .map(String::as_str),
            Some("bold")
        );
        wb.toggle_style(&target, StyleAttribute::FontWeight);
        assert!(wb.current_sheet().style(id("A1")).is_none());
    }

    #[test]
    fn test_toggle_rejects_valued_attributes() {
        let mut wb = Workbook::new();
        assert_eq!(wb.toggle_style(&Some(id("A1")), StyleAttribute::Color), None);
    }

    #[test]
    fn test_styles_are_per_sheet() {
        let mut wb = Workbook::new();
        wb.apply_style(&Some(id("A1")), StyleAttribute::Color, "blue");
        wb.create_sheet();
        assert!(wb.current_sheet().style(id("A1")).is_none());
        assert!(wb.get_style(0, id("A1")).unwrap().is_some());
    }
}
