//! Terminal UI rendering for the birthday card

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Tabs, Wrap},
    Frame,
};

use birthday_core::app::GALLERY_COLUMNS;
use birthday_core::particles::Particle;
use birthday_core::timeline::MilestoneIcon;
use birthday_core::{App, LetterStage, Mode, Rgb, Section, Theme};

const CONFETTI_GLYPHS: [&str; 4] = ["*", "•", "+", "✦"];

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn draw(frame: &mut Frame, app: &App) {
    let theme = &app.content.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(color(theme.background))),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(1), // Section tabs
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_tabs(frame, app, chunks[1]);

    match app.section {
        Section::Hero => draw_hero(frame, app, chunks[2]),
        Section::Gallery => draw_gallery(frame, app, chunks[2]),
        Section::Timeline => draw_timeline(frame, app, chunks[2]),
        Section::Letter => draw_letter(frame, app, chunks[2]),
        Section::Gift => draw_gift(frame, app, chunks[2]),
    }

    draw_status_bar(frame, app, chunks[3]);

    // Draw popups/overlays
    match app.mode {
        Mode::Lightbox => draw_lightbox(frame, app),
        Mode::Help => draw_help(frame, theme),
        Mode::Normal => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.content.theme;
    let mut spans = vec![Span::raw(" 🎂 ")];
    spans.extend(gradient_spans(&app.title(), theme, Modifier::BOLD));

    let title_bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(color(theme.text)));
    frame.render_widget(title_bar, area);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.content.theme;
    let titles: Vec<String> = Section::all()
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{} {}", i + 1, s.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.section.index())
        .style(Style::default().fg(color(theme.light_text)).bg(color(theme.background_alt)))
        .highlight_style(
            Style::default()
                .fg(color(theme.secondary))
                .add_modifier(Modifier::BOLD),
        )
        .divider("·");
    frame.render_widget(tabs, area);
}

fn draw_hero(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.content.theme;
    let elapsed = app.elapsed();

    draw_particles(frame, &app.hero.particles, elapsed, area);
    if app.hero.confetti.is_active() {
        draw_confetti(frame, theme, elapsed, area);
    }

    let text = vec![
        Line::from(gradient_spans("Happy Birthday", theme, Modifier::BOLD)),
        Line::from(""),
        Line::from(Span::styled(
            app.content.recipient.clone(),
            Style::default()
                .fg(color(theme.accent3))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Celebrating {} wonderful years of you", app.hero.age),
            Style::default().fg(color(theme.text)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to see our memories",
            Style::default().fg(color(theme.light_text)),
        )),
    ];

    let height = text.len() as u16;
    let inner = centered_rect(area.width.saturating_sub(4), height, area);
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn draw_gallery(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.content.theme;
    let photos = &app.content.photos;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color(theme.secondary)))
        .title(format!(" Our Memories ({} photos, {} liked) ", photos.len(), app.gallery.liked_count()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.gallery.is_empty() {
        let empty = Paragraph::new("No photos yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(color(theme.light_text)));
        frame.render_widget(empty, inner);
        return;
    }

    const CARD_HEIGHT: u16 = 5;
    let rows_visible = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = app.gallery.selected() / GALLERY_COLUMNS;
    let first_row = selected_row.saturating_sub(rows_visible - 1);
    let card_width = inner.width / GALLERY_COLUMNS as u16;

    for (index, photo) in photos.iter().enumerate() {
        let row = index / GALLERY_COLUMNS;
        if row < first_row || row >= first_row + rows_visible {
            continue;
        }

        let col = (index % GALLERY_COLUMNS) as u16;
        let card = Rect::new(
            inner.x + col * card_width,
            inner.y + (row - first_row) as u16 * CARD_HEIGHT,
            card_width,
            CARD_HEIGHT.min(inner.height),
        );

        let selected = index == app.gallery.selected();
        let accent = theme.accents()[index % 5];
        let border = if selected {
            Style::default()
                .fg(color(theme.accent3))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color(accent))
        };
        let heart = if app.gallery.is_liked(index) { " ❤" } else { "" };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if selected { BorderType::Double } else { BorderType::Rounded })
            .border_style(border)
            .title(format!(" {}{} ", index + 1, heart));

        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                photo.caption.clone(),
                Style::default().fg(color(theme.text)).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("📍 {}", photo.location),
                Style::default().fg(color(theme.light_text)),
            )),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(body, card);
    }
}

fn draw_lightbox(frame: &mut Frame, app: &App) {
    let theme = &app.content.theme;
    let Some(index) = app.gallery.current() else {
        return;
    };
    let Some(photo) = app.content.photos.get(index) else {
        return;
    };

    let area = centered_rect(60, 13, frame.area());
    frame.render_widget(Clear, area);

    let heart = if app.gallery.is_liked(index) { "❤ liked" } else { "♡ space to like" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(color(theme.primary)))
        .style(Style::default().bg(color(theme.white)))
        .title(format!(" {} / {} ", index + 1, app.gallery.len()))
        .title_bottom(Line::from(" ←/→ browse · Esc close ").alignment(Alignment::Right));

    let mut text = vec![
        Line::from(""),
        Line::from(gradient_spans(&photo.caption, theme, Modifier::BOLD)),
        Line::from(""),
        Line::from(Span::styled(
            format!("📍 {}", photo.location),
            Style::default().fg(color(theme.accent2)),
        )),
    ];
    if !photo.description.is_empty() {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            photo.description.clone(),
            Style::default().fg(color(theme.text)).add_modifier(Modifier::ITALIC),
        )));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(heart, Style::default().fg(color(theme.accent3)))));

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_timeline(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.content.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color(theme.accent1)))
        .title(format!(
            " Our Story ({} / {}) ",
            (app.timeline.selected() + 1).min(app.timeline.len()),
            app.timeline.len()
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.timeline.is_empty() {
        let empty = Paragraph::new("Our story is still being written")
            .alignment(Alignment::Center)
            .style(Style::default().fg(color(theme.light_text)));
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;

    for (i, milestone) in app.content.milestones.iter().enumerate() {
        let selected = i == app.timeline.selected();
        let marker_style = Style::default().fg(color(milestone.color));
        if selected {
            selected_line = lines.len();
        }

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", MilestoneIcon::for_index(i).glyph()), marker_style),
            Span::styled(
                format!("{:<18}", milestone.date),
                Style::default().fg(color(theme.light_text)),
            ),
            Span::styled(
                milestone.title.clone(),
                if selected {
                    marker_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(color(theme.text)).add_modifier(Modifier::BOLD)
                },
            ),
        ]));

        if selected {
            lines.push(Line::from(vec![
                Span::styled("  │  ", marker_style),
                Span::styled(
                    milestone.description.clone(),
                    Style::default().fg(color(theme.text)),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  │  ", marker_style),
                Span::styled(
                    format!("📍 {}", milestone.location),
                    Style::default().fg(color(theme.accent2)),
                ),
            ]));
        }
        lines.push(Line::from(Span::styled("  │", marker_style)));
    }

    let scroll = (selected_line as u16).saturating_sub(inner.height / 2);
    let paragraph = Paragraph::new(lines)
        .scroll((scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn draw_letter(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.content.theme;
    draw_particles(frame, &app.letter.particles, app.elapsed(), area);

    match app.letter.stage() {
        LetterStage::Sealed | LetterStage::Opening => {
            let prompt = if app.letter.stage() == LetterStage::Sealed {
                "Press Enter to read my message ✨"
            } else {
                "Opening..."
            };
            let text = vec![
                Line::from(gradient_spans("A Special Birthday Message For You", theme, Modifier::BOLD)),
                Line::from(""),
                Line::from("┌──────────────────┐"),
                Line::from("│╲                ╱│"),
                Line::from("│  ╲     💌     ╱  │"),
                Line::from("│    ╲────────╱    │"),
                Line::from("└──────────────────┘"),
                Line::from(""),
                Line::from(Span::styled(prompt, Style::default().fg(color(theme.accent3)))),
            ];
            let inner = centered_rect(area.width.saturating_sub(4), text.len() as u16, area);
            let paragraph = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(color(theme.secondary)));
            frame.render_widget(paragraph, inner);
        }
        LetterStage::Typing | LetterStage::Revealed => {
            let letter_area = centered_rect(area.width.saturating_sub(8).min(90), area.height.saturating_sub(2), area);
            frame.render_widget(Clear, letter_area);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color(theme.secondary)))
                .style(Style::default().bg(color(theme.white)))
                .title(Line::from(" 💌 A Letter for You ").alignment(Alignment::Center));
            let inner = block.inner(letter_area);
            frame.render_widget(block, letter_area);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(inner);

            let lines = letter_lines(app, theme);
            let text_area = chunks[0].inner(Margin::new(2, 1));
            let wrapped: u16 = lines
                .iter()
                .map(|l| (l.width() as u16).max(1).div_ceil(text_area.width.max(1)))
                .sum();
            let scroll = wrapped.saturating_sub(text_area.height);

            let paragraph = Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .scroll((scroll, 0));
            frame.render_widget(paragraph, text_area);

            if app.letter.stage() == LetterStage::Typing {
                let gauge = Gauge::default()
                    .ratio(app.letter.progress().clamp(0.0, 1.0) as f64)
                    .gauge_style(Style::default().fg(color(theme.primary)).bg(color(theme.background_alt)))
                    .label("");
                frame.render_widget(gauge, chunks[1]);
            } else {
                let signature = Paragraph::new(Line::from(Span::styled(
                    format!("{} ", app.content.signature),
                    Style::default()
                        .fg(color(theme.secondary))
                        .add_modifier(Modifier::ITALIC | Modifier::BOLD),
                )))
                .alignment(Alignment::Right);
                frame.render_widget(signature, chunks[1]);
            }
        }
    }
}

/// Letter paragraphs as styled lines, with a caret while typing
fn letter_lines<'a>(app: &App, theme: &Theme) -> Vec<Line<'a>> {
    let paragraphs = app.letter.paragraphs();
    let typing = app.letter.stage() == LetterStage::Typing;
    let last = paragraphs.len().saturating_sub(1);
    let mut lines = Vec::new();

    for (i, paragraph) in paragraphs.iter().enumerate() {
        // Salutation stands out
        let base = if i == 0 {
            Style::default()
                .fg(color(theme.accent3))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color(theme.text))
        };
        let highlight = Style::default()
            .fg(color(theme.secondary))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC);

        let mut spans: Vec<Span> = paragraph
            .segments
            .iter()
            .map(|s| Span::styled(s.text.clone(), if s.highlight { highlight } else { base }))
            .collect();
        if typing && i == last {
            spans.push(Span::styled("▌", Style::default().fg(color(theme.primary))));
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines
}

fn draw_gift(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.content.theme;
    if app.gift.confetti.is_active() {
        draw_confetti(frame, theme, app.elapsed(), area);
    }

    let mut text = vec![
        Line::from(gradient_spans("One Last Surprise For You", theme, Modifier::BOLD)),
        Line::from(""),
    ];

    if app.gift.is_unwrapped() {
        text.extend([
            Line::from("   🎉  🎁  🎉   "),
            Line::from(""),
            Line::from(Span::styled(
                app.content.gift.clone(),
                Style::default()
                    .fg(color(theme.accent3))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("All for you, {}. Happy birthday!", app.content.recipient),
                Style::default().fg(color(theme.text)),
            )),
        ]);
    } else {
        let ribbon = Style::default().fg(color(theme.accent3));
        let paper = Style::default().fg(color(theme.primary));
        text.extend([
            Line::from(Span::styled("  ╲ ╱  ", ribbon)),
            Line::from(vec![
                Span::styled("┏━━━━━", paper),
                Span::styled("┳", ribbon),
                Span::styled("━━━━━┓", paper),
            ]),
            Line::from(vec![
                Span::styled("┃     ", paper),
                Span::styled("┃", ribbon),
                Span::styled("     ┃", paper),
            ]),
            Line::from(vec![
                Span::styled("┣━━━━━", paper),
                Span::styled("╋", ribbon),
                Span::styled("━━━━━┫", paper),
            ]),
            Line::from(vec![
                Span::styled("┗━━━━━", paper),
                Span::styled("┻", ribbon),
                Span::styled("━━━━━┛", paper),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Because you deserve to be spoiled on your special day.",
                Style::default().fg(color(theme.text)),
            )),
            Line::from(Span::styled(
                "Press Enter to unwrap your gift...",
                Style::default().fg(color(theme.light_text)),
            )),
        ]);
    }

    let inner = centered_rect(area.width.saturating_sub(4), text.len() as u16, area);
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.content.theme;
    let mode_str = match app.mode {
        Mode::Normal => "CARD",
        Mode::Lightbox => "PHOTO",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let help_hint = "Tab sections | Enter open | Esc close | q quit | ? help";

    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    );

    let status_bar = Paragraph::new(status_text)
        .style(Style::default().fg(color(theme.white)).bg(color(theme.light_text)));

    frame.render_widget(status_bar, area);
}

fn draw_help(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(56, 18, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(theme.accent2)))
        .style(Style::default().bg(color(theme.white)).fg(color(theme.text)))
        .title("Help (press any key to close)");

    let heading = Style::default()
        .fg(color(theme.accent3))
        .add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Sections", heading)),
        Line::from("  Tab/S-Tab  Next/previous section"),
        Line::from("  1-5        Jump to a section"),
        Line::from("  j/k h/l    Move around"),
        Line::from(""),
        Line::from(Span::styled("Card", heading)),
        Line::from("  Enter      Open photo, letter or gift"),
        Line::from("  space      Like a photo"),
        Line::from("  r          Type the letter again"),
        Line::from("  Esc        Close photo / reseal letter"),
        Line::from("  drag       Swipe between photos"),
        Line::from(""),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(color(theme.light_text)))),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

/// Text with each character colored along the title gradient
fn gradient_spans<'a>(text: &str, theme: &Theme, modifier: Modifier) -> Vec<Span<'a>> {
    let count = text.chars().count().max(2) - 1;
    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            let rgb = theme.title_gradient(i as f32 / count as f32);
            Span::styled(ch.to_string(), Style::default().fg(color(rgb)).add_modifier(modifier))
        })
        .collect()
}

fn draw_particles(frame: &mut Frame, particles: &[Particle], elapsed: Duration, area: Rect) {
    let buf = frame.buffer_mut();
    for particle in particles {
        let Some(at) = particle.frame_at(elapsed) else {
            continue;
        };
        // Terminal cells cannot fade, so only draw the visible part of a cycle
        if at.opacity < 0.3 {
            continue;
        }
        let x = area.x + (at.x / 100.0 * area.width as f32) as u16;
        let y = area.y + (at.y / 100.0 * area.height as f32) as u16;
        if x + 1 < area.right() && y < area.bottom() {
            buf.set_string(x, y, particle.glyph, Style::default());
        }
    }
}

fn draw_confetti(frame: &mut Frame, theme: &Theme, elapsed: Duration, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let accents = theme.accents();
    let step = (elapsed.as_millis() / 120) as usize;
    let width = area.width as usize;
    let height = area.height as usize;
    let buf = frame.buffer_mut();

    for i in 0..(width * height / 40).max(8) {
        // Each piece falls one row per step from its own column
        let x = (i * 37 + i / 3) % width;
        let y = (i * 13 + step) % height;
        let glyph = CONFETTI_GLYPHS[i % CONFETTI_GLYPHS.len()];
        let style = Style::default().fg(color(accents[i % accents.len()]));
        buf.set_string(area.x + x as u16, area.y + y as u16, glyph, style);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
