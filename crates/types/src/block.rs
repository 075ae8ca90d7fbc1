//! The i3bar block: one renderable segment of the status line.
//!
//! See <https://i3wm.org/docs/i3bar-protocol.html> for the field meanings.
//! Serialization omits every empty/default field except `full_text`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Text alignment inside a block whose `min_width` exceeds its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    Center,
}

/// How the bar should interpret `full_text`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    None,
    Pango,
}

/// Separator behaviour after a block.
///
/// The bar treats a missing `separator` key as `true`, so three states are
/// observable on the wire and all three are kept distinct here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// Emit nothing; the bar uses its own defaults.
    #[default]
    UseDefault,
    /// `separator: false`, keeping `width` pixels of spacing.
    Suppressed { width: u32 },
    /// Separator drawn (key omitted), with explicit spacing when non-zero.
    Drawn { width: u32 },
}

impl Separator {
    /// Spacing carried by this separator, if any
    pub fn width(&self) -> Option<u32> {
        match self {
            Separator::UseDefault => None,
            Separator::Suppressed { width } | Separator::Drawn { width } => Some(*width),
        }
    }
}

/// One segment of the status line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub full_text: String,
    pub short_text: String,
    /// Foreground color as `#rrggbb`
    pub color: String,
    pub background: String,
    pub border: String,
    pub border_top: u32,
    pub border_right: u32,
    pub border_bottom: u32,
    pub border_left: u32,
    /// Either a pixel count or a sample string whose width is reserved
    pub min_width: String,
    pub align: Option<Align>,
    pub urgent: bool,
    /// Stable identifiers echoed back in click events
    pub name: String,
    pub instance: String,
    pub separator: Separator,
    pub markup: Option<Markup>,
}

impl Block {
    /// Create a block with the bar's default separator handling
    pub fn new(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            ..Self::default()
        }
    }

    /// Create an empty block with a suppressed separator and `width` pixels of spacing.
    ///
    /// This is the shape modules start from for every block they emit.
    pub fn spaced(width: u32) -> Self {
        Self {
            separator: Separator::Suppressed { width },
            ..Self::default()
        }
    }

    pub fn with_text(mut self, full_text: impl Into<String>) -> Self {
        self.full_text = full_text.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_min_width(mut self, min_width: impl Into<String>) -> Self {
        self.min_width = min_width.into();
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>, instance: impl Into<String>) -> Self {
        self.name = name.into();
        self.instance = instance.into();
        self
    }

    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Draw the separator, keeping any spacing already configured
    pub fn draw_separator(&mut self) {
        let width = self.separator.width().unwrap_or(0);
        self.separator = Separator::Drawn { width };
    }

    /// Hide the separator, keeping any spacing already configured
    pub fn suppress_separator(&mut self) {
        let width = self.separator.width().unwrap_or(0);
        self.separator = Separator::Suppressed { width };
    }

    /// Replace the spacing after this block without changing whether a separator is drawn
    pub fn set_separator_width(&mut self, width: u32) {
        self.separator = match self.separator {
            Separator::Drawn { .. } => Separator::Drawn { width },
            Separator::UseDefault | Separator::Suppressed { .. } => {
                Separator::Suppressed { width }
            }
        };
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("full_text", &self.full_text)?;

        for (key, value) in [
            ("short_text", &self.short_text),
            ("color", &self.color),
            ("background", &self.background),
            ("border", &self.border),
        ] {
            if !value.is_empty() {
                map.serialize_entry(key, value)?;
            }
        }

        for (key, value) in [
            ("border_top", self.border_top),
            ("border_right", self.border_right),
            ("border_bottom", self.border_bottom),
            ("border_left", self.border_left),
        ] {
            if value != 0 {
                map.serialize_entry(key, &value)?;
            }
        }

        if !self.min_width.is_empty() {
            map.serialize_entry("min_width", &self.min_width)?;
        }
        if let Some(align) = &self.align {
            map.serialize_entry("align", align)?;
        }
        if self.urgent {
            map.serialize_entry("urgent", &true)?;
        }
        if !self.name.is_empty() {
            map.serialize_entry("name", &self.name)?;
        }
        if !self.instance.is_empty() {
            map.serialize_entry("instance", &self.instance)?;
        }

        match self.separator {
            Separator::UseDefault => {}
            Separator::Suppressed { width } => {
                map.serialize_entry("separator", &false)?;
                if width != 0 {
                    map.serialize_entry("separator_block_width", &width)?;
                }
            }
            Separator::Drawn { width } => {
                if width != 0 {
                    map.serialize_entry("separator_block_width", &width)?;
                }
            }
        }

        if let Some(markup) = &self.markup {
            map.serialize_entry("markup", markup)?;
        }
        map.end()
    }
}
