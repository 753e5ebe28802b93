use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};
use crate::app::App;
use crate::client::AnswerClient;
use crate::message::{Message, MessageKind, Role};

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'*') {
            chars.next();

            // Push any accumulated plain text
            if !current_text.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_text)));
            }

            // Find closing **
            let mut bold_text = String::new();
            let mut found_close = false;

            while let Some(c) = chars.next() {
                if c == '*' && chars.peek() == Some(&'*') {
                    chars.next();
                    found_close = true;
                    break;
                }
                bold_text.push(c);
            }

            if found_close && !bold_text.is_empty() {
                spans.push(Span::styled(
                    bold_text,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                // No closing **, treat as literal
                current_text.push_str("**");
                current_text.push_str(&bold_text);
                if found_close {
                    current_text.push_str("**");
                }
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::raw(current_text));
    }

    Line::from(spans)
}

fn message_lines(msg: &Message) -> Vec<Line<'static>> {
    let label_style = match msg.role {
        Role::User => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Role::Bot => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    };
    let mut lines = vec![Line::from(Span::styled(msg.role.label(), label_style))];

    match &msg.kind {
        MessageKind::Plain => {
            lines.extend(msg.text.lines().map(|l| Line::from(l.to_string())));
        }
        MessageKind::Placeholder => {
            lines.push(Line::from(Span::styled(
                msg.text.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
        MessageKind::Answer { source } => {
            lines.extend(msg.text.lines().map(parse_markdown_line));
            lines.push(Line::from(Span::styled(
                format!("Source: {source}"),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
            )));
        }
        MessageKind::Error => {
            lines.push(Line::from(Span::styled(
                msg.text.clone(),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::default());
    lines
}

pub fn render<C: AnswerClient>(app: &mut App<C>, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, chat log, input, footer
    let [header_area, log_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_log(app, frame, log_area);
    render_input(app, frame, input_area);
    render_footer(frame, footer_area);
}

fn render_header<C: AnswerClient>(app: &App<C>, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" askchat ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(app.endpoint.clone(), Style::default().fg(Color::Gray)),
    ];
    if app.controller.is_waiting() {
        spans.push(Span::styled(
            "  waiting for answer",
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_log<C: AnswerClient>(app: &mut App<C>, frame: &mut Frame, area: Rect) {
    app.log_area = Some(area);

    let log = app.controller.log();
    let text = if log.is_empty() {
        Text::from(Span::styled(
            "Type a question and press Enter...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(log.messages().iter().flat_map(message_lines).collect::<Vec<_>>())
    };

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true });
    let total_lines = u16::try_from(paragraph.line_count(inner_width)).unwrap_or(u16::MAX);

    let log = app.controller.log_mut();
    log.fit_scroll(total_lines, inner_height);
    let scroll = log.scroll();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Chat ");

    frame.render_widget(paragraph.block(block).scroll((scroll, 0)), area);

    if total_lines > inner_height {
        let mut scrollbar_state = ScrollbarState::new(usize::from(total_lines - inner_height))
            .position(usize::from(scroll));
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

fn render_input<C: AnswerClient>(app: &App<C>, frame: &mut Frame, area: Rect) {
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Ask ");

    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let (visible_text, cursor_x) = app.controller.input().visible_window(inner_width);

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, area);
    frame.set_cursor_position((area.x + cursor_x as u16 + 1, area.y + 1));
}

fn render_footer(frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = Line::from(vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" send ", label_style),
        Span::styled(" ↑/↓ PgUp/PgDn ", key_style),
        Span::styled(" scroll ", label_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", label_style),
    ]);

    let footer = Paragraph::new(hints).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}
