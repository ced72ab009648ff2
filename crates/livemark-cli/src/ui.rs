use livemark_engine::{
    Rgb,
    render::{RenderedLine, RenderedRun},
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let registry = app.editor.registry();
    let background = to_color(registry.palette().code);
    let title = format!(
        " {}{} ",
        app.path.display(),
        if app.editor.host().modified { " *" } else { "" }
    );
    let pane = Block::default().borders(Borders::ALL).title(title);
    let inner = pane.inner(chunks[0]);
    app.viewport = inner;

    // Keep the caret block on screen
    let caret = app.editor.caret();
    let height = usize::from(inner.height).max(1);
    if caret.block < app.scroll {
        app.scroll = caret.block;
    } else if caret.block >= app.scroll + height {
        app.scroll = caret.block + 1 - height;
    }

    let lines = app.editor.render();
    let visible: Vec<Line> = lines
        .iter()
        .skip(app.scroll)
        .take(height)
        .map(to_line)
        .collect();
    f.render_widget(Paragraph::new(visible).block(pane), chunks[0]);

    if let Some(line) = lines.get(caret.block) {
        let before: usize = text_before(line, caret.offset);
        let x = inner.x as usize + prefix_width(line) + before;
        let y = inner.y as usize + caret.block - app.scroll;
        f.set_cursor_position(Position::new(
            u16::try_from(x).unwrap_or(u16::MAX),
            u16::try_from(y).unwrap_or(u16::MAX),
        ));
    }

    f.render_widget(
        Paragraph::new(status_line(app)).style(Style::default().bg(background)),
        chunks[1],
    );
}

/// Columns taken by indentation and the list/quote marker.
pub fn prefix_width(line: &RenderedLine) -> usize {
    line.attrs.indent + line.marker.as_deref().map_or(0, |m| m.chars().count())
}

/// Number of visible characters before a byte offset in the line's text.
fn text_before(line: &RenderedLine, offset: usize) -> usize {
    let mut remaining = offset;
    let mut count = 0;
    for run in &line.runs {
        for c in run.text.chars() {
            if remaining < c.len_utf8() {
                return count;
            }
            remaining -= c.len_utf8();
            count += 1;
        }
    }
    count
}

fn to_line(line: &RenderedLine) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(line.attrs.indent))];
    if let Some(marker) = &line.marker {
        spans.push(Span::styled(
            marker.clone(),
            Style::default().fg(to_color(line.marker_color)),
        ));
    }
    spans.extend(line.runs.iter().map(|run| to_span(line, run)));
    Line::from(spans)
}

fn to_span(line: &RenderedLine, run: &RenderedRun) -> Span<'static> {
    let mut style = Style::default().fg(to_color(run.fg));
    if let Some(bg) = run.bg {
        style = style.bg(to_color(bg));
    }

    let mut modifiers = Modifier::empty();
    if run.style.bold || line.attrs.bold {
        modifiers |= Modifier::BOLD;
    }
    if run.style.italic || line.attrs.italic {
        modifiers |= Modifier::ITALIC;
    }
    if run.style.strike {
        modifiers |= Modifier::CROSSED_OUT;
    }
    // Terminals have one font size, so large headers are underlined instead
    if run.style.underline || run.style.link || line.attrs.font_scale >= 1.6 {
        modifiers |= Modifier::UNDERLINED;
    }
    Span::styled(run.text.clone(), style.add_modifier(modifiers))
}

fn status_line(app: &App) -> Line<'static> {
    let host = app.editor.host();
    let theme = if app.editor.registry().is_dark() {
        "dark"
    } else {
        "light"
    };
    let mut text = format!(
        " Ln {}, Col {} | {} words, {} chars | {theme} | ^S save  ^T theme  ^Q quit",
        host.caret.block + 1,
        host.caret.offset + 1,
        host.stats.words,
        host.stats.chars,
    );
    if let Some(message) = &app.message {
        text.push_str(" | ");
        text.push_str(message);
    }
    Line::from(text)
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
