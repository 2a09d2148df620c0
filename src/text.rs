use console::{style, Emoji};

pub static CHECK: Emoji<'static, 'static> = Emoji("✓", "+");
pub static ARROW: Emoji<'static, 'static> = Emoji("▶", ">");

pub const LINE_WIDTH: usize = 72;

pub fn line() -> String {
    "-".repeat(LINE_WIDTH)
}

pub fn double_line() -> String {
    "=".repeat(LINE_WIDTH)
}

pub fn check_icon() -> String {
    style(format!("{}", CHECK)).green().to_string()
}

pub fn bold<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).bold().to_string()
}

pub fn success<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).green().to_string()
}

pub fn highlight<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).blue().bold().to_string()
}

pub fn warning<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).color256(214).bold().to_string()
}

pub fn error<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).red().bold().to_string()
}

pub fn light<T: AsRef<str>>(text: T) -> String {
    style(text.as_ref()).color256(245).to_string()
}

// Coefficient values, right-aligned so the X and Y columns line up.
pub fn number(value: f64) -> String {
    format!("{:>14.6}", value)
}
