//! TUI Rendering
//!
//! Translates `AppState` into Ratatui `Widget`s and draws to the terminal frame.

use docchat_core::{Message, Role};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;

/// Main draw loop function.
pub fn draw_ui(f: &mut Frame, state: &AppState) {
    let usage_height = if state.latest_usage.is_none() {
        0
    } else if state.usage_panel_open {
        7
    } else {
        1
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),            // Title + greeting
            Constraint::Length(3),            // Example questions
            Constraint::Min(3),               // Transcript
            Constraint::Length(usage_height), // Usage & cost
            Constraint::Length(3),            // Input box
        ])
        .split(f.size());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            state.text.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(state.text.greeting.as_str()),
    ]);
    f.render_widget(header, chunks[0]);

    draw_examples(f, state, chunks[1]);
    draw_transcript(f, state, chunks[2]);
    if usage_height > 0 {
        f.render_widget(Paragraph::new(usage_lines(state)), chunks[3]);
    }

    let (input, input_style) = if state.input.is_empty() {
        (state.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        (state.input.as_str(), Style::default().fg(Color::Yellow))
    };
    let input_title = if state.busy {
        "Processing... (Esc to cancel)"
    } else {
        "Message (Enter to send)"
    };
    let input_widget = Paragraph::new(input)
        .style(input_style)
        .block(Block::default().title(input_title).borders(Borders::ALL));
    f.render_widget(input_widget, chunks[4]);
}

fn draw_examples(f: &mut Frame, state: &AppState, area: Rect) {
    let questions = &state.text.example_questions;
    if questions.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, questions.len() as u32); questions.len()];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let style = if state.busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    for (i, (question, cell)) in questions.iter().zip(cells.iter()).enumerate() {
        let widget = Paragraph::new(question.as_str())
            .style(style)
            .block(Block::default().title(format!("F{}", i + 1)).borders(Borders::ALL));
        f.render_widget(widget, *cell);
    }
}

fn draw_transcript(f: &mut Frame, state: &AppState, area: Rect) {
    let lines = transcript_lines(&state.transcript, &state.notices);
    let inner_width = area.width.saturating_sub(2);
    let visible = area.height.saturating_sub(2);
    let height = wrapped_height(&lines, inner_width);
    let offset = height
        .saturating_sub(visible)
        .saturating_sub(state.scroll_back);

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(Block::default().title("Conversation").borders(Borders::ALL));
    f.render_widget(widget, area);
}

/// One labelled block per message, then any notices.
pub fn transcript_lines<'a>(transcript: &'a [Message], notices: &'a [String]) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for message in transcript {
        let (label, style) = match message.role {
            Role::User => ("You: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Role::Assistant => (
                "Assistant: ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Role::System => continue,
        };
        let mut content = message.content.lines();
        let first = content.next().unwrap_or_default();
        lines.push(Line::from(vec![Span::styled(label, style), Span::raw(first)]));
        lines.extend(content.map(Line::from));
        lines.push(Line::default());
    }
    for notice in notices {
        lines.push(Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

/// Usage panel contents: a one-line toggle, expanded with six-decimal costs.
pub fn usage_lines(state: &AppState) -> Vec<Line<'static>> {
    let Some(latest) = state.latest_usage else {
        return Vec::new();
    };
    let marker = if state.usage_panel_open { "v" } else { ">" };
    let mut lines = vec![Line::from(Span::styled(
        format!("{marker} Usage & cost (Tab)"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if state.usage_panel_open {
        let session = state.session_usage;
        lines.extend([
            Line::from(format!("  Prompt tokens:     {}", latest.prompt_tokens)),
            Line::from(format!("  Completion tokens: {}", latest.completion_tokens)),
            Line::from(format!("  Total tokens:      {}", latest.total_tokens)),
            Line::from(format!("  Cost:              ${:.6}", latest.cost)),
            Line::from(format!("  Session tokens:    {}", session.total_tokens)),
            Line::from(format!("  Session cost:      ${:.6}", session.total_cost)),
        ]);
    }
    lines
}

fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = usize::from(width);
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}
