use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};

use crate::answers::KeyValueStore;
use crate::output::{format_badge, format_last_saved, rating_split, EMPTY_DOT, FILLED_DOT};
use crate::scoring::{advise, Overall};
use crate::tui::app::{App, InputMode, View};
use crate::tui::theme::ThemeColors;

const TITLE: &str = "Diagnóstico de Negocio";

pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal demasiado pequeña").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Questions or results
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_view {
        View::Questions => render_questions(frame, chunks[2], app),
        View::Results => render_results(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::ConfirmReset => render_reset_popup(frame, &app.theme),
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::Normal => {}
    }
}

fn render_title<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let mut spans = vec![Span::styled(
        TITLE,
        Style::default().fg(app.theme.title_color).bold(),
    )];

    // Progress on the right
    let progress = format!(
        "{}/{} respondidas",
        app.session.answered_count(),
        app.question_count()
    );
    let padding_len =
        (area.width as usize).saturating_sub(TITLE.chars().count() + progress.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(progress, Style::default().fg(app.theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let selected = match app.current_view {
        View::Questions => 0,
        View::Results => 1,
    };

    let tabs = Tabs::new(vec!["Preguntas", "Resultados"])
        .select(selected)
        .style(Style::default().fg(app.theme.muted))
        .highlight_style(Style::default().fg(app.theme.title_color).bold().reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

/// Dots for a rating; dimmed when the question has no answer yet
fn rating_line(rating: u8, answered: bool, theme: &ThemeColors) -> Line<'static> {
    let (filled, empty) = rating_split(rating);
    let filled_color = if answered {
        theme.dot_filled
    } else {
        theme.unanswered
    };

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(FILLED_DOT.repeat(filled), Style::default().fg(filled_color)));
    }
    if empty > 0 {
        spans.push(Span::styled(EMPTY_DOT.repeat(empty), Style::default().fg(theme.dot_empty)));
    }
    spans.push(Span::styled(
        format!(" {}", rating),
        Style::default().fg(filled_color).bold(),
    ));
    Line::from(spans)
}

fn render_questions<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &mut App<S>) {
    let theme = app.theme.clone();

    let rows: Vec<Row> = app
        .session
        .catalog()
        .questions()
        .enumerate()
        .map(|(row_idx, q)| {
            let category = if q.index == 0 {
                q.category.name.clone()
            } else {
                String::new()
            };
            let answered = app.session.answer(&q.id).is_some();
            let rating = app.session.rating(&q.id);

            // Alternating row background (odd rows get subtle background)
            let row_style = if row_idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(category).style(Style::default().fg(theme.category_color).bold()),
                Cell::from(rating_line(rating, answered, &theme)),
                Cell::from(q.prompt.to_string()),
                Cell::from(q.id.clone()).style(Style::default().fg(theme.id_color)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(24), // Category name on its first question
        Constraint::Length(8),  // "●●●○○ 3"
        Constraint::Fill(1),    // Prompt
        Constraint::Length(14), // "operaciones-2"
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Área", "Valor", "Pregunta", "Id"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_results<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let theme = &app.theme;

    let overall = match &app.results {
        Some((_, overall)) => overall,
        None => {
            let msg = Paragraph::new("Pulsa Enter para calcular tu diagnóstico")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted));
            frame.render_widget(msg, area);
            return;
        }
    };

    let result = match overall {
        Overall::Insufficient => {
            let msg = Paragraph::new(overall.message())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(msg, area);
            return;
        }
        Overall::Scored(result) => result,
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Overall message
        Constraint::Fill(1),   // Category table
    ])
    .split(area);

    let message = Paragraph::new(result.message.clone())
        .style(Style::default().fg(theme.level_color(result.level)).bold())
        .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let rows: Vec<Row> = result
        .ranked
        .iter()
        .map(|score| {
            let level = score.level();
            let color = theme.level_color(level);
            Row::new(vec![
                Cell::from(score.name.clone()).style(Style::default().bold()),
                Cell::from(format_badge(score.average)).style(Style::default().fg(color)),
                Cell::from(level.label()).style(Style::default().fg(color)),
                Cell::from(advise(level)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(24),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths).header(
        Row::new(vec!["Área", "Promedio", "Nivel", "Recomendación"])
            .style(theme.header_style)
            .bottom_margin(1),
    );

    frame.render_widget(table, chunks[1]);
}

fn render_status_bar<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let theme = &app.theme;

    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(theme.flash_color(kind)),
        ))
    } else {
        let saved = format_last_saved(app.session.last_saved());

        let hints: &[(&str, &str)] = match app.current_view {
            View::Questions => &[
                ("j/k", ":nav "),
                ("h/l", ":valor "),
                ("Enter", ":resultados "),
                ("R", ":resetear "),
                ("?", ":ayuda "),
                ("q", ":salir"),
            ],
            View::Results => &[
                ("Tab", ":preguntas "),
                ("R", ":resetear "),
                ("?", ":ayuda "),
                ("q", ":salir"),
            ],
        };

        let mut spans = vec![
            Span::styled(saved, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(theme.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_reset_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(56, 6, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Resetear ")
        .title_style(theme.popup_title)
        .border_style(Style::default().fg(theme.popup_warning));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let lines = vec![
        Line::from("¿Seguro que quieres resetear todas las respuestas?"),
        Line::from(Span::styled(
            "Esta acción no se puede deshacer.",
            Style::default().fg(theme.popup_warning),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("s/y", Style::default().fg(theme.status_key_color).bold()),
            Span::raw(": confirmar   "),
            Span::styled("otra tecla", Style::default().fg(theme.status_key_color).bold()),
            Span::raw(": cancelar"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 15, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Atajos de teclado ")
        .title_style(theme.popup_title)
        .border_style(Style::default().fg(theme.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let entries = [
        ("j / Down      ", "Siguiente pregunta"),
        ("k / Up        ", "Pregunta anterior"),
        ("l / Right / + ", "Subir valor"),
        ("h / Left / -  ", "Bajar valor"),
        ("1-5           ", "Fijar valor"),
        ("Space         ", "Responder con el valor mostrado"),
        ("Enter / c     ", "Calcular resultados"),
        ("Tab           ", "Preguntas / Resultados"),
        ("R             ", "Resetear respuestas"),
        ("q / Ctrl-c    ", "Salir"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(*key, Style::default().fg(theme.status_key_color).bold()),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Pulsa cualquier tecla para cerrar",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
