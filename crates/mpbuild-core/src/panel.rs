//! Boxed text panels for terminal output.

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Renders `body` inside a box, with an optional title on the top border.
///
/// Long lines are not wrapped; the box grows to fit them so a command can
/// be copied out of the panel intact. The title is bold only when `ansi`
/// is set.
pub fn render(title: Option<&str>, body: &str, ansi: bool) -> String {
    let lines: Vec<&str> = body.lines().collect();
    let title_width = title.map_or(0, |t| t.chars().count() + 2);
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title_width)
        + 2;

    let mut out = String::new();
    match title {
        Some(t) => {
            let fill = width.saturating_sub(t.chars().count() + 2);
            let (bold, reset) = if ansi { (BOLD, RESET) } else { ("", "") };
            out.push_str(&format!("╭ {bold}{t}{reset} {}╮\n", "─".repeat(fill)));
        }
        None => out.push_str(&format!("╭{}╮\n", "─".repeat(width))),
    }
    out.push_str(&format!("│{}│\n", " ".repeat(width)));
    for line in &lines {
        let pad = width - 2 - line.chars().count();
        out.push_str(&format!("│ {line}{} │\n", " ".repeat(pad)));
    }
    out.push_str(&format!("│{}│\n", " ".repeat(width)));
    out.push_str(&format!("╰{}╯\n", "─".repeat(width)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_has_the_same_width() {
        let out = render(Some("Build rp2/RPI_PICO"), "make -j 8\nshort", true);
        let plain = out.replace(BOLD, "").replace(RESET, "");
        let widths: Vec<usize> = plain.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }

    #[test]
    fn body_is_kept_intact() {
        let cmd = "docker run --rm -it image bash -c \"make\"";
        assert!(render(None, cmd, false).contains(cmd));
    }

    #[test]
    fn title_wider_than_body_fits() {
        let out = render(Some("a very long title indeed"), "x", false);
        let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let out = render(Some("Build rp2/RPI_PICO"), "make", false);
        assert!(!out.contains('\x1b'));
        assert!(out.starts_with("╭ Build rp2/RPI_PICO ─"));
    }

    #[test]
    fn terminal_output_bolds_the_title() {
        let out = render(Some("Build rp2/RPI_PICO"), "make", true);
        assert!(out.starts_with(&format!("╭ {BOLD}Build rp2/RPI_PICO{RESET} ─")));
    }
}
