use colored::{Color, Colorize};

/// Prints the given string with the given color.
///
/// ## Example
/// ```
/// use armkin::utils::utils_console::{armkin_print, PrintMode, PrintColor};
/// armkin_print("test", PrintMode::Print, PrintColor::Blue, false);
/// ```
pub fn armkin_print(s: &str, mode: PrintMode, color: PrintColor, bolded: bool) {
    let mut string = s.normal();
    if bolded { string = string.bold() }
    if &color != &PrintColor::None {
        string = string.color(color.get_color());
    }
    match mode {
        PrintMode::Println => { println!("{}", string); }
        PrintMode::Print => { print!("{}", string); }
    }
}

pub fn armkin_print_new_line() {
    armkin_print("\n", PrintMode::Print, PrintColor::None, false);
}

/// Println will cause a new line after each line, while Print will not.
#[derive(Clone, Debug)]
pub enum PrintMode {
    Println,
    Print
}

/// Defines color for an armkin print command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrintColor {
    None,
    Blue,
    Green,
    Red,
    Yellow,
    Cyan,
    Magenta
}
impl PrintColor {
    pub fn get_color(&self) -> Color {
        match self {
            PrintColor::None => { Color::White }
            PrintColor::Blue => { return Color::Blue }
            PrintColor::Green => { return Color::Green }
            PrintColor::Red => { return Color::Red }
            PrintColor::Yellow => { return Color::Yellow }
            PrintColor::Cyan => { return Color::Cyan }
            PrintColor::Magenta => { return Color::Magenta }
        }
    }
}
