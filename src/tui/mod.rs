// TUI module for rendering the terminal interface
pub mod colors;
pub mod input;

// Re-exports
pub use colors::*;
pub use input::{handle_checkout_input, handle_key_event, handle_mouse_event, KeyAction, PointerAction};

use crate::controller::DeckView;
use crate::domain::{Cart, Item, SessionStats, Surface};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Terminal cells are about twice as tall as they are wide. Vertical
/// distances are scaled by this so swipe thresholds feel the same both ways.
pub const CELL_ASPECT: f64 = 2.0;

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Main card view
    Swiping,
    /// Help overlay visible
    Help,
    /// Checkout prompt after every N swipes
    Checkout,
    /// Summary screen at end
    Summary,
    /// Welcome screen shown on first launch
    Welcome,
}

fn split(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Deck
            Constraint::Length(3), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Where the active card rests inside the whole frame
pub fn card_area(frame_area: Rect) -> Rect {
    centered_rect(50, 60, split(frame_area)[1])
}

/// Gesture surface for a frame: the deck area, in horizontal cell units
pub fn surface_for(frame_area: Rect) -> Surface {
    let deck = split(frame_area)[1];
    Surface::new(
        f64::from(deck.width.max(1)),
        f64::from(deck.height.max(1)) * CELL_ASPECT,
    )
}

/// Renders the deck, header and footer
pub fn render(frame: &mut Frame, view: &DeckView, cart: &Cart) {
    let [header, deck, footer] = split(frame.area());

    render_header(frame, header, view, cart);
    render_deck(frame, deck, view);
    render_footer(frame, footer);
}

fn render_header(frame: &mut Frame, area: Rect, view: &DeckView, cart: &Cart) {
    let position = if view.total == 0 {
        "No cards".to_string()
    } else {
        format!("Card {}/{}", view.current_index + 1, view.total)
    };

    let line = Line::from(vec![
        Span::styled(
            " swipedeck ",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(position, Style::default().fg(TEXT_PRIMARY)),
        Span::styled("  ·  ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled(format!("Swipes {}", view.swipes), Style::default().fg(TEXT_PRIMARY)),
        Span::styled("  ·  ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled(
            format!("Cart {} ({} staked)", cart.len(), cart.total_stake()),
            Style::default().fg(ACCENT_SECONDARY),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(TEXT_SECONDARY)),
    );
    frame.render_widget(header, area);
}

fn render_deck(frame: &mut Frame, area: Rect, view: &DeckView) {
    let (current, transform) = match (&view.current, view.active) {
        (Some(item), Some(transform)) => (item, transform),
        _ => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No markets to show",
                    Style::default()
                        .fg(TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "The deck is empty.",
                    Style::default().fg(TEXT_SECONDARY),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }
    };

    let base = centered_rect(50, 60, area);

    // Deepest placeholder first so nearer cards cover it
    for card in view.stack.iter().rev() {
        let width = (f64::from(base.width) * card.placeholder.scale).round() as i32;
        let inset = (i32::from(base.width) - width) / 2;
        let rows = card.placeholder.translate_y.round() as i32;
        let rect = Rect {
            width: width.max(0) as u16,
            ..base
        };
        if let Some(rect) = offset_rect(rect, inset, rows, area) {
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(TEXT_SECONDARY))
                    .style(Style::default().bg(BG_DARK)),
                rect,
            );
        }
    }

    let dx = transform.offset.dx.round() as i32;
    let dy = (transform.offset.dy / CELL_ASPECT).round() as i32;
    let rect = match offset_rect(base, dx, dy, area) {
        Some(rect) => rect,
        None => return,
    };

    let (stamp, stamp_color, strength) = [
        ("YES", ACCENT_SECONDARY, transform.yes_opacity),
        ("NO", ACCENT_PRIMARY, transform.no_opacity),
        ("SKIP", ACCENT_SKIP, transform.skip_opacity),
    ]
    .into_iter()
    .fold(("", TEXT_SECONDARY, 0.0), |best, candidate| {
        if candidate.2 > best.2 {
            candidate
        } else {
            best
        }
    });

    let border_color = if strength >= 1.0 {
        stamp_color
    } else {
        ACCENT_HIGHLIGHT
    };

    let tilt = if transform.rotation_deg.abs() >= 0.5 {
        format!(" {:+.0}° ", transform.rotation_deg)
    } else {
        String::new()
    };

    let block = Block::default()
        .title(format!(" {} ", current.category))
        .title_bottom(Line::from(tilt).right_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(CARD_BG));

    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);

    let mut lines = card_lines(current, Utc::now());
    if strength > 0.0 {
        let mut style = Style::default().fg(stamp_color);
        style = if strength >= 1.0 {
            style.add_modifier(Modifier::BOLD)
        } else {
            style.add_modifier(Modifier::DIM)
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("[ {} ]", stamp), style)));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn card_lines(item: &Item, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let open = item.is_open_at(now);
    let days = (item.ends_at - now).num_days();
    let ends = if !open {
        "Closed".to_string()
    } else if days > 0 {
        format!("Ends in {} days", days)
    } else {
        "Ending soon".to_string()
    };
    let mut title_style = Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD);
    if !open {
        title_style = title_style.add_modifier(Modifier::DIM);
    }

    vec![
        Line::from(""),
        Line::from(Span::styled(item.title.clone(), title_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("YES {}¢", item.yes_price),
                Style::default().fg(ACCENT_SECONDARY),
            ),
            Span::raw("   "),
            Span::styled(
                format!("NO {}¢", item.no_price),
                Style::default().fg(ACCENT_PRIMARY),
            ),
        ]),
        Line::from(Span::styled(ends, Style::default().fg(TEXT_SECONDARY))),
    ]
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
    };
    let line = Line::from(vec![
        key("←"),
        Span::raw(" No  "),
        key("→"),
        Span::raw(" Yes  "),
        key("↑"),
        Span::raw(" Skip  "),
        key("↓"),
        Span::raw(" Back  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit"),
    ]);

    let footer = Paragraph::new(line)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_SECONDARY))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(TEXT_SECONDARY)),
        );
    frame.render_widget(footer, area);
}

/// Renders the checkout prompt
pub fn render_checkout_overlay(frame: &mut Frame, cart: &Cart, swipes: u64) {
    let area = frame.area();
    let checkout_area = centered_rect(50, 50, area);

    frame.render_widget(Clear, checkout_area);

    let block = Block::default()
        .title(" Checkout ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_SECONDARY))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(checkout_area);
    frame.render_widget(block, checkout_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} swipes in. Review your picks?", swipes),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Picks: ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(format!("{}", cart.len()), Style::default().fg(TEXT_PRIMARY)),
        ]),
        Line::from(vec![
            Span::styled("  Staked: ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(
                format!("{}", cart.total_stake()),
                Style::default().fg(TEXT_PRIMARY),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(" Checkout     "),
            Span::styled("[Esc]", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw(" Keep swiping"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));
    frame.render_widget(paragraph, inner);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let help_area = centered_rect(50, 70, area);

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let row = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", keys), Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::styled(action, Style::default().fg(TEXT_PRIMARY)),
        ])
    };

    let lines = vec![
        Line::from(""),
        row("→ / y", "Yes"),
        row("← / n", "No"),
        row("↑ / s", "Skip"),
        row("↓ / b", "Previous card"),
        row("mouse drag", "Swipe the card"),
        row("?", "Toggle help"),
        row("q / Esc", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Drag past a quarter of the width to commit.",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders the summary screen at the end
pub fn render_summary(frame: &mut Frame, stats: &SessionStats, cart: &Cart) {
    let area = frame.area();
    let summary_area = centered_rect(60, 50, area);

    frame.render_widget(Clear, summary_area);

    let block = Block::default()
        .title(" Session Complete ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(summary_area);
    frame.render_widget(block, summary_area);

    let count = |label: &'static str, value: String, color: ratatui::style::Color| {
        Line::from(vec![
            Span::raw(label),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Summary",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        count("   Markets:  ", stats.total_items.to_string(), ACCENT_HIGHLIGHT),
        count("   Yes:      ", stats.yes.to_string(), ACCENT_SECONDARY),
        count("   No:       ", stats.no.to_string(), ACCENT_PRIMARY),
        count("   Skipped:  ", stats.skipped.to_string(), TEXT_SECONDARY),
        count("   In cart:  ", cart.len().to_string(), TEXT_PRIMARY),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to exit",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));
    frame.render_widget(paragraph, inner);
}

/// Renders the welcome overlay shown on first launch
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to swipedeck",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Every card is a question about the future."),
        Line::from("Swipe right for YES, left for NO."),
        Line::from("Swipe up to skip, down to go back."),
        Line::from(""),
        Line::from("Picks are paper bets: no real money moves."),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let welcome = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    frame.render_widget(welcome, area);
}

/// Shifts `base` by a cell offset and clips it to `bounds`.
/// Returns `None` once the rect is entirely outside.
fn offset_rect(base: Rect, dx: i32, dy: i32, bounds: Rect) -> Option<Rect> {
    let left = (i32::from(base.x) + dx).max(i32::from(bounds.x));
    let top = (i32::from(base.y) + dy).max(i32::from(bounds.y));
    let right = (i32::from(base.right()) + dx).min(i32::from(bounds.right()));
    let bottom = (i32::from(base.bottom()) + dy).min(i32::from(bounds.bottom()));

    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
