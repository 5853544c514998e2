//! TUI rendering for Nebula Field using ratatui.

mod input;
mod panels;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use nebula_core::{PresetCycle, format_address};
use nebula_engine::{App, DraftInput, FocusField, ProviderKind, WalletConnector};

pub const EMIT_LABEL: &str = "Emit Intent";
pub const EMITTING_LABEL: &str = "Emitting…";

/// Main draw function
pub fn draw<W: WalletConnector>(frame: &mut Frame, app: &App<W>) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Dashboard
            Constraint::Length(8), // Feed
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, rows[0], &palette, &glyphs);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(34),
            Constraint::Percentage(26),
        ])
        .split(rows[1]);

    draw_intent_panel(frame, app, columns[0], &palette);

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(4),
            Constraint::Length(5),
        ])
        .split(columns[1]);
    panels::draw_waveform(frame, app, middle[0], &palette, &glyphs);
    panels::draw_creature(frame, app, middle[1], &palette, &glyphs);
    panels::draw_holomap(frame, app, middle[2], &palette);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(8)])
        .split(columns[2]);
    panels::draw_panel_tabs(frame, app, right[0], &palette, &glyphs);
    panels::draw_dna(frame, app, right[1], &palette, &glyphs);

    panels::draw_feed(frame, rows[2], &palette, &glyphs);
    draw_status_bar(frame, app, rows[3], &palette, &glyphs);

    if app.is_wallet_modal_open() {
        draw_wallet_modal(frame, app, &palette, &glyphs);
    }
}

fn draw_header<W: WalletConnector>(
    frame: &mut Frame,
    app: &App<W>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let wallet_span = match app.wallet().address() {
        Some(address) => Span::styled(
            format!("{} {}", glyphs.complete, format_address(address)),
            Style::default().fg(palette.primary),
        ),
        None => Span::styled(
            "Connect Wallet (Ctrl+W)",
            Style::default().fg(palette.text_muted),
        ),
    };

    let title = Line::from(vec![
        Span::styled(
            " NEBULA FIELD ",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} intent engine", glyphs.separator),
            styles::label(palette),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.bg_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(32)])
        .split(inner);
    frame.render_widget(Paragraph::new(title), halves[0]);
    frame.render_widget(
        Paragraph::new(Line::from(vec![wallet_span, Span::raw(" ")])).alignment(Alignment::Right),
        halves[1],
    );
}

fn draw_intent_panel<W: WalletConnector>(
    frame: &mut Frame,
    app: &App<W>,
    area: Rect,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette, !app.is_wallet_modal_open()))
        .padding(Padding::horizontal(1))
        .title(Span::styled(" Intent Console ", styles::title(palette)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Narrative label
            Constraint::Min(3),    // Narrative field
            Constraint::Length(1), // Wallet label
            Constraint::Length(3), // Wallet field
            Constraint::Length(1), // Emit button
            Constraint::Length(2), // Warning / wallet error
        ])
        .split(inner);

    let focus = app.focus();
    frame.render_widget(
        Paragraph::new(Span::styled("NARRATIVE", styles::label(palette))),
        chunks[0],
    );
    draw_field(
        frame,
        &app.form().narrative,
        PresetCycle::placeholder(),
        chunks[1],
        focus == FocusField::Narrative,
        !app.is_wallet_modal_open(),
        palette,
    );
    frame.render_widget(
        Paragraph::new(Span::styled("WALLET", styles::label(palette))),
        chunks[2],
    );
    draw_field(
        frame,
        &app.form().wallet,
        "0x...",
        chunks[3],
        focus == FocusField::Wallet,
        !app.is_wallet_modal_open(),
        palette,
    );

    let emitting = app.emission().is_emitting();
    let (label, style) = if emitting {
        (EMITTING_LABEL, Style::default().fg(palette.accent))
    } else if app.can_emit() {
        (
            EMIT_LABEL,
            Style::default()
                .fg(palette.bg_dark)
                .bg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (EMIT_LABEL, Style::default().fg(palette.text_muted))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {label} "), style),
            Span::styled("  Enter", styles::key_highlight(palette)),
        ])),
        chunks[4],
    );

    let mut notices = Vec::new();
    if let Some(warning) = app.emission().warning() {
        notices.push(Line::from(Span::styled(
            warning.to_string(),
            Style::default().fg(palette.error),
        )));
    }
    if !app.is_wallet_modal_open()
        && let Some(error) = app.wallet().error()
    {
        notices.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(palette.error),
        )));
    }
    frame.render_widget(
        Paragraph::new(notices).wrap(Wrap { trim: true }),
        chunks[5],
    );
}

fn draw_field(
    frame: &mut Frame,
    input: &DraftInput,
    placeholder: &str,
    area: Rect,
    focused: bool,
    accepts_cursor: bool,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette, focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if input.text().is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                placeholder.to_string(),
                Style::default().fg(palette.text_muted),
            ))
            .wrap(Wrap { trim: true }),
            inner,
        );
        if focused && accepts_cursor {
            frame.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    let (visible, cursor_col) = visible_window(input, inner.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(
            visible,
            Style::default().fg(palette.text_primary),
        )),
        inner,
    );
    if focused && accepts_cursor {
        frame.set_cursor_position(Position::new(inner.x + cursor_col as u16, inner.y));
    }
}

/// Slice of the input that fits `width` columns with the cursor visible, and
/// the cursor column within that slice.
fn visible_window(input: &DraftInput, width: usize) -> (String, usize) {
    let width = width.max(1);
    let text = input.text();
    let cursor_byte = input.byte_index();

    let mut start = 0;
    let mut prefix_width = text[..cursor_byte].width();
    let mut graphemes = text.grapheme_indices(true);
    while prefix_width >= width {
        match graphemes.next() {
            Some((idx, g)) => {
                start = idx + g.len();
                prefix_width = prefix_width.saturating_sub(g.width());
            }
            None => break,
        }
    }

    let mut visible = String::new();
    let mut used = 0;
    for g in text[start..].graphemes(true) {
        let w = g.width();
        if used + w > width {
            break;
        }
        visible.push_str(g);
        used += w;
    }
    (visible, prefix_width)
}

fn draw_status_bar<W: WalletConnector>(
    frame: &mut Frame,
    app: &App<W>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let state = app.emission();
    let options = app.ui_options();
    let phase_icon = if state.is_emitting() {
        spinner_frame(app.tick_count(), options)
    } else if state.intent_active() {
        glyphs.processing
    } else {
        glyphs.pending
    };

    let mut spans = vec![
        Span::styled(
            format!(" {phase_icon} {} ", state.phase().label()),
            Style::default().fg(palette.primary),
        ),
        Span::styled(glyphs.separator, styles::label(palette)),
        Span::styled(
            format!(" score {} ", state.intent_score()),
            Style::default().fg(palette.text_secondary),
        ),
        Span::styled(glyphs.separator, styles::label(palette)),
    ];
    for (key, hint) in [
        ("Tab", "field"),
        ("Enter", "emit"),
        ("^R", "reset"),
        ("^S", "suggest"),
        ("^W", "wallet"),
        ("^T", "panel"),
        ("Esc", "quit"),
    ] {
        spans.push(Span::styled(format!(" {key}"), styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {hint}"), styles::key_hint(palette)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bg_panel)),
        area,
    );
}

fn draw_wallet_modal<W: WalletConnector>(
    frame: &mut Frame,
    app: &App<W>,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let area = frame.area();
    let modal_width = 56.min(area.width.saturating_sub(4)).max(30);
    let content_width = modal_width.saturating_sub(4).max(1) as usize;

    let mut lines: Vec<Line> = Vec::new();
    if let Some(address) = app.wallet().address() {
        lines.push(Line::from(vec![
            Span::styled("Connected: ", styles::label(palette)),
            Span::styled(format_address(address), styles::value(palette)),
        ]));
        lines.push(Line::from(""));
    }

    for (i, kind) in ProviderKind::ALL.iter().enumerate() {
        let selected = i == app.modal_selected();
        let prefix = if selected { glyphs.selected } else { " " };
        let mut name_style = if selected {
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_secondary)
        };
        if selected {
            name_style = name_style.bg(palette.bg_highlight);
        }
        let name = format!(" {prefix} {}", kind.label());
        let filler = content_width.saturating_sub(name.width());
        let filler_style = if selected {
            Style::default().bg(palette.bg_highlight)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(name, name_style),
            Span::styled(" ".repeat(filler), filler_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     {}", kind.description()),
            styles::label(palette),
        )));
    }

    if let Some(error) = app.wallet().error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(palette.error),
        )));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(content_width),
        Style::default().fg(palette.bg_border),
    )));
    lines.push(Line::from(vec![
        Span::styled("↑↓", styles::key_highlight(palette)),
        Span::styled(" select  ", styles::key_hint(palette)),
        Span::styled("Enter", styles::key_highlight(palette)),
        Span::styled(" connect  ", styles::key_hint(palette)),
        Span::styled("d", styles::key_highlight(palette)),
        Span::styled(" disconnect  ", styles::key_hint(palette)),
        Span::styled("Esc", styles::key_highlight(palette)),
        Span::styled(" close", styles::key_hint(palette)),
    ]));

    let modal_height = (lines.len() as u16).saturating_add(4);
    let modal_area = Rect {
        x: area.x + (area.width.saturating_sub(modal_width) / 2),
        y: area.y + (area.height.saturating_sub(modal_height) / 2),
        width: modal_width,
        height: modal_height.min(area.height),
    };
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_popup))
        .padding(Padding::uniform(1))
        .title(Line::from(Span::styled(
            " Connect Wallet ",
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        modal_area,
    );
}
