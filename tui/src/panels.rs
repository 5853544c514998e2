//! Dashboard panels: waveform, creature, holomap, validator/trace tabs, DNA
//! metrics and the intent feed.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use nebula_core::{
    INTENT_FEED, StepStatus, TRACE_STEPS, TrustTier, format_block_latency, format_causality_risk,
    format_decentralization, validator_consensus,
};
use nebula_engine::{App, IntentScore, PanelTab, WalletConnector};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::{Glyphs, Palette, styles};

pub const AWAITING_SIGNAL: &str = "AWAITING SIGNAL";
pub const SIGNAL_EMITTING: &str = "SIGNAL EMITTING...";

fn panel_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette, false))
        .padding(Padding::horizontal(1))
        .title(Span::styled(format!(" {title} "), styles::title(palette)))
}

fn bar(value: u8, width: usize, glyphs: &Glyphs) -> String {
    let filled = (usize::from(value.min(100)) * width + 50) / 100;
    let mut out = glyphs.bar_full.repeat(filled);
    out.push_str(&glyphs.bar_empty.repeat(width.saturating_sub(filled)));
    out
}

/// Height of waveform column `i` in `0..levels`.
fn wave_level(i: usize, tick: usize, score: Option<IntentScore>, levels: usize) -> usize {
    let levels = levels.max(1);
    match score {
        Some(score) => {
            let peak = usize::from(score.get()) * (levels - 1) / 100;
            let ripple = (i * 7 + tick) % 3;
            peak.saturating_sub(ripple)
        }
        None => (i * 5 + tick * 3) % levels,
    }
}

pub(crate) fn draw_waveform<W: WalletConnector>(
    frame: &mut Frame,
    app: &App<W>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let block = panel_block("Waveform", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = app.emission();
    let width = inner.width as usize;
    let tick = if app.ui_options().reduced_motion {
        0
    } else {
        app.tick_count()
    };

    let mut lines = Vec::new();
    let (headline, wave_color) = if let Some(score) = state.wave_score() {
        (format!("SCORE LINKED: {score}"), palette.primary)
    } else if state.is_emitting() {
        (SIGNAL_EMITTING.to_string(), palette.accent)
    } else {
        (AWAITING_SIGNAL.to_string(), palette.text_muted)
    };

    let wave: String = if state.is_emitting() || state.wave_score().is_some() {
        (0..width)
            .map(|i| glyphs.wave[wave_level(i, tick, state.wave_score(), glyphs.wave.len())])
            .collect()
    } else {
        glyphs.wave[0].repeat(width)
    };
    lines.push(Line::from(Span::styled(wave, Style::default().fg(wave_color))));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        headline,
        Style::default().fg(wave_color).add_modifier(Modifier::BOLD),
    )));

    if let Some(result) = state.intent_result() {
        for summary in &result.summary_lines {
            lines.push(Line::from(Span::styled(
                summary.clone(),
                Style::default().fg(palette.text_secondary),
            )));
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

pub(crate) fn draw_creature<W: WalletConnector>(
    frame: &mut Frame,
    app: &App<W>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let block = panel_block("Creature", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = app.emission();
    let (label, color) = if state.intent_result().is_some() {
        ("SYNCHRONIZED", palette.primary)
    } else {
        ("STABLE", palette.text_secondary)
    };
    let glow = if state.intent_active() {
        glyphs.processing
    } else {
        glyphs.pending
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{glow} "), Style::default().fg(palette.accent)),
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(
            format!("epoch {}", state.epoch().get()),
            styles::label(palette),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

pub(crate) fn draw_holomap<W: WalletConnector>(
    frame: &mut Frame,
    app: &App<W>,
    area: Rect,
    palette: &Palette,
) {
    let block = panel_block("Holomap", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = app.emission();
    let lines = if state.intent_result().is_some() {
        let metrics = state.metrics();
        vec![
            Line::from(vec![
                Span::styled("Latency  ", styles::label(palette)),
                Span::styled(format!("{}ms", metrics.latency_ms), styles::value(palette)),
            ]),
            Line::from(vec![
                Span::styled("Nodes    ", styles::label(palette)),
                Span::styled(metrics.nodes_text, styles::value(palette)),
            ]),
            Line::from(vec![
                Span::styled("Trust    ", styles::label(palette)),
                Span::styled(format!("{}%", metrics.trust), styles::value(palette)),
            ]),
        ]
    } else {
        vec![Line::from(Span::styled(
            "Awaiting synchronization",
            styles::label(palette),
        ))]
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

pub(crate) fn draw_panel_tabs<W: WalletConnector>(
    frame: &mut Frame,
    app: &App<W>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let active = app.panel_tab();
    let mut title = vec![Span::raw(" ")];
    for tab in [PanelTab::Validator, PanelTab::Trace] {
        let style = if tab == active {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            styles::label(palette)
        };
        title.push(Span::styled(tab.label(), style));
        title.push(Span::raw(" "));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette, false))
        .padding(Padding::horizontal(1))
        .title(Line::from(title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match active {
        PanelTab::Validator => validator_lines(app, palette, glyphs, inner.width as usize),
        PanelTab::Trace => trace_lines(palette, glyphs),
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

fn tier_color(tier: TrustTier, palette: &Palette) -> Color {
    match tier {
        TrustTier::High => palette.primary,
        TrustTier::Mid => palette.accent,
        TrustTier::Low => palette.error,
    }
}

fn validator_lines<W: WalletConnector>(
    app: &App<W>,
    palette: &Palette,
    glyphs: &Glyphs,
    width: usize,
) -> Vec<Line<'static>> {
    let bar_width = width.saturating_sub(8).clamp(4, 16);
    validator_consensus(&app.emission().metrics().validators)
        .into_iter()
        .flat_map(|(profile, trust, tier)| {
            let color = tier_color(tier, palette);
            [
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", profile.badge()),
                        Style::default().fg(palette.info),
                    ),
                    Span::styled(profile.name, Style::default().fg(palette.text_primary)),
                    Span::styled(format!(" {}", profile.kind), styles::label(palette)),
                ]),
                Line::from(Span::styled(
                    truncate_to_width(profile.comment, width),
                    Style::default().fg(palette.text_secondary),
                )),
                Line::from(vec![
                    Span::styled(bar(trust, bar_width, glyphs), Style::default().fg(color)),
                    Span::styled(format!(" {trust}%"), Style::default().fg(color)),
                ]),
            ]
        })
        .collect()
}

/// Cut `text` to `width` columns, ending in "..." when shortened.
fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

fn trace_lines(palette: &Palette, glyphs: &Glyphs) -> Vec<Line<'static>> {
    TRACE_STEPS
        .iter()
        .map(|step| {
            let (icon, color) = match step.status {
                StepStatus::Complete => (glyphs.complete, palette.primary),
                StepStatus::Processing => (glyphs.processing, palette.accent),
                StepStatus::Pending => (glyphs.pending, palette.text_muted),
            };
            Line::from(vec![
                Span::styled(format!("{icon} "), Style::default().fg(color)),
                Span::styled(step.label, Style::default().fg(palette.text_primary)),
                Span::styled(format!("  {}", step.desc), styles::label(palette)),
            ])
        })
        .collect()
}

pub(crate) fn draw_dna<W: WalletConnector>(
    frame: &mut Frame,
    app: &App<W>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let block = panel_block("Intent DNA", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let metrics = app.emission().metrics();
    let bar_width = (inner.width as usize).saturating_sub(22).clamp(4, 12);
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<17}"), styles::label(palette)),
            Span::styled(value, styles::value(palette)),
        ])
    };
    let lines = vec![
        row(
            "Mutation",
            format!("{} {}%", bar(metrics.mutation, bar_width, glyphs), metrics.mutation),
        ),
        row(
            "Similarity",
            format!(
                "{} {}%",
                bar(metrics.similarity, bar_width, glyphs),
                metrics.similarity
            ),
        ),
        row("Complexity", metrics.complexity.as_str().to_string()),
        row("Decentralization", format_decentralization(metrics)),
        row("Causality risk", format_causality_risk(metrics)),
        row("Block latency", format_block_latency(metrics)),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

pub(crate) fn draw_feed(frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = panel_block("Intent Feed", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = INTENT_FEED
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(entry.address, Style::default().fg(palette.info)),
                Span::styled(format!(" {} ", glyphs.separator), styles::label(palette)),
                Span::styled(
                    format!("{:<22}", entry.kind),
                    Style::default().fg(palette.text_primary),
                ),
                Span::styled(format!("{:.1}", entry.score), styles::value(palette)),
                Span::styled(format!("  {}s ago", entry.age_secs), styles::label(palette)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::{bar, truncate_to_width, wave_level};
    use crate::theme::glyphs;
    use nebula_engine::{IntentScore, UiOptions};

    #[test]
    fn bar_fills_proportionally() {
        let g = glyphs(UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        });
        assert_eq!(bar(50, 10, &g), "#####-----");
        assert_eq!(bar(100, 4, &g), "####");
        assert_eq!(bar(0, 4, &g), "----");
    }

    #[test]
    fn long_comments_are_cut_to_width() {
        assert_eq!(truncate_to_width("Latency optimal.", 20), "Latency optimal.");
        assert_eq!(truncate_to_width("Latency optimal.", 10), "Latency...");
    }

    #[test]
    fn wave_levels_stay_in_range() {
        for tick in 0..20 {
            for i in 0..40 {
                assert!(wave_level(i, tick, None, 8) < 8);
                assert!(wave_level(i, tick, Some(IntentScore::clamped(100)), 8) < 8);
            }
        }
    }
}
