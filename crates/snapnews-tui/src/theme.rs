use ratatui::style::Color;

/// Dashboard palette, one color per role
#[derive(Debug, Clone)]
pub struct Theme {
    pub panel_bg: Color,
    pub popup_bg: Color,
    pub status_bg: Color,

    pub text: Color,
    /// Secondary text: descriptions, status hints
    pub dim_text: Color,
    /// Source, date and placeholder lines
    pub meta: Color,

    pub border: Color,
    pub border_focused: Color,
    pub highlight: Color,

    pub headline: Color,
    pub source: Color,
    pub tag_selected: Color,
    /// Failed summaries
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox-derived dark palette
        let dark = Color::Rgb(0x28, 0x28, 0x28);
        let raised = Color::Rgb(0x45, 0x40, 0x3d);

        Self {
            panel_bg: dark,
            popup_bg: Color::Rgb(0x32, 0x30, 0x2f),
            status_bg: raised,
            text: Color::Rgb(0xd4, 0xbe, 0x98),
            dim_text: Color::Rgb(0xa8, 0x99, 0x84),
            meta: Color::Rgb(0x92, 0x83, 0x74),
            border: Color::Rgb(0x7c, 0x6f, 0x64),
            border_focused: Color::Rgb(0x89, 0xb4, 0x82),
            highlight: raised,
            headline: Color::Rgb(0xd8, 0xa6, 0x57),
            source: Color::Rgb(0xd3, 0x86, 0x9b),
            tag_selected: Color::Rgb(0xa9, 0xb6, 0x65),
            error: Color::Rgb(0xea, 0x69, 0x62),
        }
    }
}
