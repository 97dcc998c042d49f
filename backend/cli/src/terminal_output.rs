//! Terminal output helpers: ANSI notes and plain tables.
//!
//! Notes go to stdout except errors; answers and tables are printed by the
//! commands themselves.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}i{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}!{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}x{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}ok{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Left }
    }
    pub fn right(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Right }
    }
}

/// Render rows under a bold header and a dashed separator.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|c| visible_width(&c.header))
        .collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(visible_width(cell));
        }
    }

    let (bold, reset) = if supports_color() { (BOLD, RESET) } else { ("", "") };
    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, width)| pad_cell(&col.header, *width, &col.align))
        .collect();
    out.push_str(&format!("{bold}  {}{reset}\n", header.join("  ").trim_end()));

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", sep.join("  ")));

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (col, width))| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                pad_cell(cell, *width, &col.align)
            })
            .collect();
        out.push_str(&format!("  {}\n", cells.join("  ").trim_end()));
    }

    out
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

fn pad_cell(s: &str, width: usize, align: &Align) -> String {
    let pad = width.saturating_sub(visible_width(s));
    match align {
        Align::Left => format!("{s}{}", " ".repeat(pad)),
        Align::Right => format!("{}{s}", " ".repeat(pad)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn renders_aligned_table() {
        let cols = vec![Column::left("Document"), Column::right("Chars")];
        let rows = vec![
            vec!["guide.pdf".to_string(), "1200".to_string()],
            vec!["faq.txt".to_string(), "87".to_string()],
        ];
        let table = strip_ansi(&render_table(&cols, &rows));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "  Document   Chars");
        assert_eq!(lines[1], "  ---------  -----");
        assert_eq!(lines[2], "  guide.pdf   1200");
        assert_eq!(lines[3], "  faq.txt       87");
    }

    #[test]
    fn counts_multibyte_names_by_chars() {
        let cols = vec![Column::left("Document"), Column::right("Chars")];
        let rows = vec![vec!["matrícula.docx".to_string(), "5".to_string()]];
        let table = strip_ansi(&render_table(&cols, &rows));
        assert!(table.lines().nth(2).unwrap().ends_with("matrícula.docx      5"));
    }
}
