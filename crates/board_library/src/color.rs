/// 24-bit color handed to the host when a surface is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

// Colors of the OLED on the simulated board
pub const ON_COLOR: Rgb = Rgb::new(255, 255, 0); // yellow
pub const OFF_COLOR: Rgb = Rgb::new(15, 15, 15); // very dark gray
