use ratatui::style::Color;

/// Semantic color slots for the diffwatch UI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub text: Color,
    pub text_muted: Color,

    pub diff_add_fg: Color,
    pub diff_del_fg: Color,
    pub diff_add_bg: Color,
    pub diff_del_bg: Color,
    pub diff_hunk_header_fg: Color,

    pub heading: Color,
    pub divider: Color,
    pub gutter: Color,

    pub status_fg: Color,
    pub status_bg: Color,
    pub warning: Color,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "github-dark" => github_dark(),
            _ => one_dark(),
        }
    }
}

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        text: Color::Rgb(0xab, 0xb2, 0xbf),
        text_muted: Color::Rgb(0x5c, 0x63, 0x70),
        diff_add_fg: Color::Rgb(0x98, 0xc3, 0x79),
        diff_del_fg: Color::Rgb(0xe0, 0x6c, 0x75),
        diff_add_bg: Color::Rgb(0x20, 0x30, 0x20),
        diff_del_bg: Color::Rgb(0x32, 0x20, 0x22),
        diff_hunk_header_fg: Color::Rgb(0xc6, 0x78, 0xdd),
        heading: Color::Rgb(0x61, 0xaf, 0xef),
        divider: Color::Rgb(0x3e, 0x44, 0x51),
        gutter: Color::Rgb(0x5c, 0x63, 0x70),
        status_fg: Color::Rgb(0xab, 0xb2, 0xbf),
        status_bg: Color::Rgb(0x2c, 0x31, 0x3c),
        warning: Color::Rgb(0xe5, 0xc0, 0x7b),
    }
}

fn github_dark() -> Theme {
    Theme {
        name: "github-dark".to_string(),
        text: Color::Rgb(0xc9, 0xd1, 0xd9),
        text_muted: Color::Rgb(0x6e, 0x76, 0x81),
        diff_add_fg: Color::Rgb(0x3f, 0xb9, 0x50),
        diff_del_fg: Color::Rgb(0xf8, 0x51, 0x49),
        diff_add_bg: Color::Rgb(0x12, 0x26, 0x1e),
        diff_del_bg: Color::Rgb(0x2d, 0x12, 0x14),
        diff_hunk_header_fg: Color::Rgb(0xd2, 0xa8, 0xff),
        heading: Color::Rgb(0x58, 0xa6, 0xff),
        divider: Color::Rgb(0x30, 0x36, 0x3d),
        gutter: Color::Rgb(0x6e, 0x76, 0x81),
        status_fg: Color::Rgb(0xc9, 0xd1, 0xd9),
        status_bg: Color::Rgb(0x21, 0x26, 0x2d),
        warning: Color::Rgb(0xd2, 0x99, 0x22),
    }
}
