#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colours shared by both front-ends. Built once in `main` and passed down.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub title: &'static str,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub heading: Rgb,
    pub grid_current: Rgb,
    pub grid_idle: Rgb,
    pub error: Rgb,
    pub muted: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: "TNPSC",
            primary: Rgb(0x2E, 0x7D, 0x32),
            secondary: Rgb(0x15, 0x65, 0xC0),
            heading: Rgb(0x1A, 0x23, 0x7E),
            grid_current: Rgb(0xF5, 0x9E, 0x0B),
            grid_idle: Rgb(0x22, 0xC5, 0x5E),
            error: Rgb(0xD3, 0x2F, 0x2F),
            muted: Rgb(0x75, 0x75, 0x75),
        }
    }
}
