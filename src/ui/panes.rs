//! Rendering logic for each TUI pane

use crate::compilers::binary_search::{BinarySearchInput, BinarySearchStep};
use crate::compilers::palindrome::{PalindromeInput, PalindromeStep};
use crate::compilers::queue::{QueueOutcome, QueueStep};
use crate::compilers::selection_sort::{SelectionSortInput, SelectionSortStep, SortAction};
use crate::compilers::sliding_window::{DequeAction, SlidingWindowInput, SlidingWindowStep};
use crate::playback::Position;
use crate::trace::StepTrace;
use crate::ui::theme::DEFAULT_THEME;
use crate::visualization::Visualization;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// A row of boxed cells, one per value
fn cell_row(values: &[String], styles: &[Style], width: usize) -> Line<'static> {
    let spans: Vec<Span> = values
        .iter()
        .zip(styles)
        .map(|(v, style)| Span::styled(format!("│{:^width$}", v), *style))
        .chain(std::iter::once(Span::styled(
            "│",
            Style::default().fg(DEFAULT_THEME.comment),
        )))
        .collect();
    Line::from(spans)
}

/// Index labels under a cell row
fn index_row(count: usize, width: usize) -> Line<'static> {
    let text: String = (0..count).map(|i| format!(" {:^width$}", i)).collect();
    Line::from(Span::styled(text, Style::default().fg(DEFAULT_THEME.comment)))
}

/// Pointer labels under a cell row; later markers on the same cell are
/// joined with the earlier ones
fn pointer_row(count: usize, width: usize, markers: &[(usize, &str, Color)]) -> Line<'static> {
    let mut spans = Vec::new();
    for cell in 0..count {
        let here: Vec<&(usize, &str, Color)> = markers.iter().filter(|m| m.0 == cell).collect();
        if here.is_empty() {
            spans.push(Span::raw(" ".repeat(width + 1)));
            continue;
        }
        let label: Vec<&str> = here.iter().map(|m| m.1).collect();
        spans.push(Span::styled(
            format!(" {:^width$}", label.join("/")),
            Style::default().fg(here[0].2).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn cell_width<T: ToString>(values: &[T]) -> usize {
    values
        .iter()
        .map(|v| v.to_string().chars().count())
        .max()
        .unwrap_or(1)
        .max(3)
        + 2
}

fn plain(style_fg: Color) -> Style {
    Style::default().fg(style_fg)
}

fn binary_search_lines(
    input: &BinarySearchInput,
    step: Option<&BinarySearchStep>,
) -> Vec<Line<'static>> {
    let values = input.values();
    let width = cell_width(values);
    let labels: Vec<String> = values.iter().map(|v| v.to_string()).collect();

    let styles: Vec<Style> = (0..values.len())
        .map(|i| match step {
            Some(s) if s.found && i == s.mid => {
                plain(DEFAULT_THEME.success).add_modifier(Modifier::BOLD)
            }
            Some(s) if i == s.mid => plain(DEFAULT_THEME.mid_pointer).add_modifier(Modifier::BOLD),
            Some(s) if s.eliminated.contains(&i) => plain(DEFAULT_THEME.eliminated),
            Some(s) if i >= s.left && i <= s.right => plain(DEFAULT_THEME.window),
            _ => plain(DEFAULT_THEME.fg),
        })
        .collect();

    let mut lines = vec![
        Line::from(format!("Target: {}", input.target())),
        Line::default(),
        cell_row(&labels, &styles, width),
        index_row(values.len(), width),
    ];
    if let Some(s) = step {
        lines.push(pointer_row(
            values.len(),
            width,
            &[
                (s.left, "L", DEFAULT_THEME.left_pointer),
                (s.mid, "M", DEFAULT_THEME.mid_pointer),
                (s.right, "R", DEFAULT_THEME.right_pointer),
            ],
        ));
        lines.push(Line::default());
        lines.push(Line::from(format!(
            "left = {}  right = {}  mid = {}  arr[mid] = {}",
            s.left, s.right, s.mid, s.mid_value
        )));
    }
    lines
}

fn sliding_window_lines(
    input: &SlidingWindowInput,
    step: Option<&SlidingWindowStep>,
) -> Vec<Line<'static>> {
    let values = input.values();
    let width = cell_width(values);
    let labels: Vec<String> = values.iter().map(|v| v.to_string()).collect();

    let styles: Vec<Style> = (0..values.len())
        .map(|i| match step {
            Some(s) if i == s.current => {
                plain(DEFAULT_THEME.mid_pointer).add_modifier(Modifier::BOLD)
            }
            Some(s) if s.deque.first() == Some(&i) => plain(DEFAULT_THEME.success),
            Some(s) if i >= s.window_start && i <= s.window_end => plain(DEFAULT_THEME.window),
            _ => plain(DEFAULT_THEME.fg),
        })
        .collect();

    let mut lines = vec![
        Line::from(format!("Window size: {}", input.window())),
        Line::default(),
        cell_row(&labels, &styles, width),
        index_row(values.len(), width),
    ];

    if let Some(s) = step {
        lines.push(pointer_row(
            values.len(),
            width,
            &[
                (s.window_start, "[", DEFAULT_THEME.left_pointer),
                (s.window_end, "]", DEFAULT_THEME.right_pointer),
            ],
        ));
        lines.push(Line::default());

        let action = match s.action {
            DequeAction::RemoveFront(i) => format!("pop front {}", i),
            DequeAction::RemoveBack(i) => format!("pop back {}", i),
            DequeAction::AddBack(i) => format!("push back {}", i),
            DequeAction::RecordMax(v) => format!("record max {}", v),
        };
        let deque: Vec<String> = s
            .deque
            .iter()
            .map(|&i| format!("{}:{}", i, values[i]))
            .collect();
        lines.push(Line::from(vec![
            Span::styled("Deque  ", plain(DEFAULT_THEME.comment)),
            Span::styled(format!("[{}]", deque.join(", ")), plain(DEFAULT_THEME.primary)),
            Span::styled(format!("   ({})", action), plain(DEFAULT_THEME.secondary)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Result ", plain(DEFAULT_THEME.comment)),
            Span::styled(
                crate::compilers::format_values(&s.result),
                plain(DEFAULT_THEME.success),
            ),
        ]));
    }
    lines
}

fn palindrome_lines(input: &PalindromeInput, step: Option<&PalindromeStep>) -> Vec<Line<'static>> {
    let chars = input.chars();
    let width = 3;
    let labels: Vec<String> = chars.iter().map(|c| c.to_string()).collect();

    let styles: Vec<Style> = (0..chars.len())
        .map(|i| match step {
            Some(s) if (i == s.left || i == s.right) && s.matches => {
                plain(DEFAULT_THEME.success).add_modifier(Modifier::BOLD)
            }
            Some(s) if i == s.left || i == s.right => {
                plain(DEFAULT_THEME.error).add_modifier(Modifier::BOLD)
            }
            Some(s) if i < s.left || i > s.right => plain(DEFAULT_THEME.comment),
            _ => plain(DEFAULT_THEME.fg),
        })
        .collect();

    let mut lines = vec![
        cell_row(&labels, &styles, width),
        index_row(chars.len(), width),
    ];
    if let Some(s) = step {
        let markers: Vec<(usize, &str, Color)> = if s.is_center {
            vec![(s.left, "C", DEFAULT_THEME.mid_pointer)]
        } else {
            vec![
                (s.left, "L", DEFAULT_THEME.left_pointer),
                (s.right, "R", DEFAULT_THEME.right_pointer),
            ]
        };
        lines.push(pointer_row(chars.len(), width, &markers));
        lines.push(Line::default());
        let verdict = if s.is_center {
            Span::styled("centre", plain(DEFAULT_THEME.mid_pointer))
        } else if s.matches {
            Span::styled("match", plain(DEFAULT_THEME.success))
        } else {
            Span::styled("mismatch", plain(DEFAULT_THEME.error))
        };
        lines.push(Line::from(vec![
            Span::raw(format!("'{}' vs '{}': ", s.left_char, s.right_char)),
            verdict,
        ]));
    }
    lines
}

fn selection_sort_lines(
    input: &SelectionSortInput,
    step: Option<&SelectionSortStep>,
) -> Vec<Line<'static>> {
    let array: Vec<i64> = match step {
        Some(s) => s.array.clone(),
        None => input.values().to_vec(),
    };
    let width = cell_width(&array);
    let labels: Vec<String> = array.iter().map(|v| v.to_string()).collect();
    let sorted_len = step.map_or(0, |s| s.sorted_len);

    let styles: Vec<Style> = (0..array.len())
        .map(|idx| match step {
            Some(s)
                if s.action == SortAction::Swap
                    && (Some(idx) == s.i || Some(idx) == s.min_index) =>
            {
                plain(DEFAULT_THEME.secondary).add_modifier(Modifier::BOLD)
            }
            Some(s) if Some(idx) == s.min_index => {
                plain(DEFAULT_THEME.mid_pointer).add_modifier(Modifier::BOLD)
            }
            Some(s) if Some(idx) == s.j => plain(DEFAULT_THEME.right_pointer),
            _ if idx < sorted_len => plain(DEFAULT_THEME.success),
            _ => plain(DEFAULT_THEME.fg),
        })
        .collect();

    let mut lines = vec![
        cell_row(&labels, &styles, width),
        index_row(array.len(), width),
    ];
    if let Some(s) = step {
        let mut markers = Vec::new();
        if let Some(i) = s.i {
            markers.push((i, "i", DEFAULT_THEME.left_pointer));
        }
        if let Some(j) = s.j {
            markers.push((j, "j", DEFAULT_THEME.right_pointer));
        }
        if let Some(min) = s.min_index {
            markers.push((min, "min", DEFAULT_THEME.mid_pointer));
        }
        lines.push(pointer_row(array.len(), width, &markers));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Sorted prefix: {} of {}", sorted_len, array.len()),
            plain(DEFAULT_THEME.comment),
        )));
    }
    lines
}

fn queue_lines(trace: &StepTrace<QueueStep>, step: Option<&QueueStep>) -> Vec<Line<'static>> {
    let contents: Vec<i64> = step.map(|s| s.queue.clone()).unwrap_or_default();
    let mut lines = Vec::new();

    if contents.is_empty() {
        lines.push(Line::from(Span::styled("(empty queue)", plain(DEFAULT_THEME.comment))));
    } else {
        let width = cell_width(&contents);
        let labels: Vec<String> = contents.iter().map(|v| v.to_string()).collect();
        let last = contents.len() - 1;
        let styles: Vec<Style> = (0..contents.len())
            .map(|i| match step.map(|s| s.outcome) {
                Some(QueueOutcome::Enqueued(_)) if i == last => {
                    plain(DEFAULT_THEME.success).add_modifier(Modifier::BOLD)
                }
                _ => plain(DEFAULT_THEME.fg),
            })
            .collect();
        lines.push(cell_row(&labels, &styles, width));
        lines.push(pointer_row(
            contents.len(),
            width,
            &[
                (0, "front", DEFAULT_THEME.left_pointer),
                (last, "back", DEFAULT_THEME.right_pointer),
            ],
        ));
    }

    if let Some(s) = step {
        lines.push(Line::default());
        let returned = match s.outcome {
            QueueOutcome::Enqueued(_) => Span::styled("-", plain(DEFAULT_THEME.comment)),
            QueueOutcome::Dequeued { value, position } => Span::styled(
                format!("{} (slot {})", value, position),
                plain(DEFAULT_THEME.success),
            ),
            QueueOutcome::Empty => Span::styled("EMPTY", plain(DEFAULT_THEME.error)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}  ", s.op), plain(DEFAULT_THEME.secondary)),
            Span::styled("returned ", plain(DEFAULT_THEME.comment)),
            returned,
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("{} operation(s) in the log", trace.len()),
        plain(DEFAULT_THEME.comment),
    )));
    lines
}

/// Render the algorithm state at `position`
pub fn render_visualization_pane(
    frame: &mut Frame,
    area: Rect,
    viz: &Visualization,
    position: Position,
    is_finished: bool,
    is_focused: bool,
) {
    let block = Block::default()
        .title(format!(" {} ", viz.title()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
        .padding(Padding::new(1, 1, 1, 0));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Input: ", plain(DEFAULT_THEME.comment)),
            Span::styled(viz.input_summary(), plain(DEFAULT_THEME.fg)),
        ]),
        Line::default(),
    ];

    let body = match viz {
        Visualization::BinarySearch { input, trace } => {
            binary_search_lines(input, trace.at(position).map(|s| &s.payload))
        }
        Visualization::SlidingWindow { input, trace } => {
            sliding_window_lines(input, trace.at(position).map(|s| &s.payload))
        }
        Visualization::Palindrome { input, trace } => {
            palindrome_lines(input, trace.at(position).map(|s| &s.payload))
        }
        Visualization::SelectionSort { input, trace } => {
            selection_sort_lines(input, trace.at(position).map(|s| &s.payload))
        }
        Visualization::Queue { trace, .. } => {
            queue_lines(trace, trace.at(position).map(|s| &s.payload))
        }
    };
    lines.extend(body);
    lines.push(Line::default());

    match viz.description_at(position) {
        Some(description) => lines.push(Line::from(Span::styled(
            description.to_string(),
            plain(DEFAULT_THEME.primary).add_modifier(Modifier::BOLD),
        ))),
        None if viz.is_empty() => lines.push(Line::from(Span::styled(
            "Nothing to show: this input produces no steps",
            plain(DEFAULT_THEME.comment),
        ))),
        None => lines.push(Line::from(Span::styled(
            "Not started. Press space to play or → to step.",
            plain(DEFAULT_THEME.comment),
        ))),
    }

    if is_finished && !viz.is_empty() {
        if let Some(outcome) = viz.outcome() {
            lines.push(Line::from(Span::styled(
                outcome,
                plain(DEFAULT_THEME.success).add_modifier(Modifier::BOLD),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Render the list of step descriptions, highlighting the current one
///
/// `current_index` uses the playback convention: 0 is "not started" and
/// `i` highlights the step with ordinal `i - 1`.
pub fn render_trace_pane(
    frame: &mut Frame,
    area: Rect,
    descriptions: &[&str],
    current_index: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
    follow_current: bool,
) {
    let block = Block::default()
        .title(format!(" Trace ({} steps) ", descriptions.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if descriptions.is_empty() {
        let paragraph = Paragraph::new("(no steps)")
            .block(block)
            .style(plain(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let total_items = descriptions.len();
    // Account for borders, min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the highlighted step in view while playing or stepping
    if follow_current && current_index > 0 {
        let current = current_index - 1;
        if current < *scroll_offset {
            *scroll_offset = current;
        } else if current >= *scroll_offset + visible_height {
            *scroll_offset = current + 1 - visible_height;
        }
    }

    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = descriptions
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(ordinal, description)| {
            let is_current = ordinal + 1 == current_index;
            let is_past = ordinal + 1 < current_index;
            let style = if is_current {
                Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD)
            } else if is_past {
                plain(DEFAULT_THEME.fg)
            } else {
                plain(DEFAULT_THEME.comment)
            };
            let marker = if is_current { "▶" } else { " " };
            ListItem::new(format!("{} {:>3}  {}", marker, ordinal + 1, description)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Render the status bar at the bottom
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    current_index: usize,
    total_steps: usize,
    is_playing: bool,
    speed: f64,
) {
    // Split status bar into left and right
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(45),
            ratatui::layout::Constraint::Percentage(55),
        ])
        .split(area);

    // Left side: Step info and status
    let left_spans = vec![
        Span::styled(
            format!(" Step {}/{} ", current_index, total_steps),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}x ", speed),
            Style::default()
                .bg(DEFAULT_THEME.comment)
                .fg(Color::Black),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" ←/→ ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" +/- ", key_style),
        Span::styled(" speed ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↵ / ⌫ ", key_style),
        Span::styled(" end/start ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" 1-9 ", key_style),
        Span::styled(" jump ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" Tab ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" scroll ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    // Show status indicators based on position and state
    let is_at_start = current_index == 0;
    let is_at_end = current_index >= total_steps;

    if is_playing {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " ▶ PLAYING ",
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    } else if is_at_end {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " END ",
            Style::default()
                .bg(DEFAULT_THEME.error)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    } else if is_at_start {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            " START ",
            Style::default()
                .bg(DEFAULT_THEME.success)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
