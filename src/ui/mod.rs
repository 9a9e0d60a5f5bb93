mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::api::InventoryApi;
use crate::app::{App, Popup};
use crate::view::{sanitize, EMPTY_MESSAGE};
use components::{centered_fixed, centered_rect, input_field, stat_card};

pub fn draw<A: InventoryApi>(f: &mut Frame, app: &App<A>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line / toast
            Constraint::Length(3), // Stats cards
            Constraint::Min(4),    // Inventory table
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_stats(f, app, chunks[1]);
    draw_table(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::AddItem => draw_form(f, app, " Add Item ".to_string()),
        Popup::Checkout => draw_form(f, app, format!(" Checkout {} ", form_item(app))),
        Popup::EditQuantity => draw_form(f, app, format!(" Edit Quantity: {} ", form_item(app))),
        Popup::Help => draw_help_popup(f, app),
        Popup::Confirm => draw_confirm_popup(f, app),
    }
}

fn form_item<A>(app: &App<A>) -> String {
    sanitize(app.form.item_name.as_deref().unwrap_or(""))
}

fn draw_info_line<A: InventoryApi>(f: &mut Frame, app: &App<A>, area: Rect) {
    let theme = &app.theme;

    // Priority: toast > load state > ready
    let line = if let Some(toast) = app.client.notifier().current() {
        let color = theme.severity_color(toast.severity);
        Line::from(vec![
            Span::styled(format!("{} ", toast.severity.icon()), Style::default().fg(color)),
            Span::styled(sanitize(&toast.message), Style::default().fg(color)),
            Span::styled("  (Esc)", Style::default().fg(theme.text_dim)),
        ])
    } else if !app.view.loaded {
        Line::from(Span::styled(
            format!("Not loaded from {} (R to retry)", app.source),
            Style::default().fg(theme.text_dim),
        ))
    } else {
        Line::from(vec![
            Span::styled("SwagTrackr", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" │ {}", app.source), Style::default().fg(theme.text_dim)),
        ])
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_stats<A>(f: &mut Frame, app: &App<A>, area: Rect) {
    let theme = &app.theme;
    let stats = &app.view.stats;

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    stat_card(f, cards[0], theme, "Total Items", stats.total_items.to_string(), theme.info);
    stat_card(f, cards[1], theme, "Total Quantity", stats.total_quantity.to_string(), theme.success);
    stat_card(f, cards[2], theme, "Low Stock", stats.low_stock.to_string(), theme.warning);
    stat_card(f, cards[3], theme, "Out of Stock", stats.out_of_stock.to_string(), theme.danger);
}

fn draw_table<A>(f: &mut Frame, app: &App<A>, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .title(Span::styled(" Inventory ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    let header = Row::new(vec![
        Span::styled("Name", Style::default().fg(theme.header)),
        Span::styled("Quantity", Style::default().fg(theme.header)),
        Span::styled("Status", Style::default().fg(theme.header)),
    ]);

    let widths = [
        Constraint::Percentage(55),
        Constraint::Percentage(15),
        Constraint::Percentage(30),
    ];

    if app.view.is_empty() {
        let message = if app.view.loaded { EMPTY_MESSAGE } else { "Inventory not loaded" };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(theme.text_dim))),
            Line::from(Span::styled("Press 'a' to add an item", Style::default().fg(theme.accent))),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app
        .view
        .rows
        .iter()
        .map(|row| {
            let status_color = theme.status_color(row.status);
            Row::new(vec![
                Span::styled(row.display_name.as_str(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
                Span::styled(row.quantity.to_string(), Style::default().fg(theme.text)),
                Span::styled(format!("● {}", row.status), Style::default().fg(status_color)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header.style(Style::default()).bottom_margin(1))
        .row_highlight_style(Style::default().bg(theme.bg_selected).fg(theme.text))
        .block(block);

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_footer<A>(f: &mut Frame, app: &App<A>, area: Rect) {
    let theme = &app.theme;

    let hints: Vec<(&str, &str)> = match app.popup {
        Popup::AddItem | Popup::Checkout | Popup::EditQuantity => vec![
            ("Tab", "Next field"),
            ("Enter", "Submit"),
            ("Esc", "Cancel"),
        ],
        Popup::Confirm => vec![("y", "Yes"), ("n", "No")],
        _ => vec![
            ("↑↓", "Nav"),
            ("a", "Add"),
            ("c", "Checkout"),
            ("e", "Edit"),
            ("d", "Del"),
            ("R", "Reload"),
            ("h", "Help"),
            ("q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 80 { 6 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(theme.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(theme.text_dim)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_form<A>(f: &mut Frame, app: &App<A>, title: String) {
    let theme = &app.theme;
    let area = f.area();
    let fields = &app.form.fields;

    // 3 rows per field, plus borders and the hint line
    let height = fields.len() as u16 * 3 + 3;
    let popup_area = centered_fixed(if area.width < 80 { 90 } else { 60 }, height, area);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(theme.accent)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    f.render_widget(block, popup_area);

    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1));

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(popup_area);

    for (i, field) in fields.iter().enumerate() {
        input_field(f, inner[i], theme, field.label, &field.value, i == app.form.focus);
    }

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
        Span::raw(" submit │ "),
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" switch │ "),
        Span::styled("Esc", Style::default().fg(theme.danger)),
        Span::raw(" cancel"),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(theme.text_dim));
    f.render_widget(hint, inner[fields.len()]);
}

fn draw_help_popup<A>(f: &mut Frame, app: &App<A>) {
    let theme = &app.theme;
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(theme.header).add_modifier(Modifier::BOLD)))
    };
    let entry = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(theme.accent)),
            Span::raw(text),
        ])
    };

    let help_text = vec![
        section("═══ Navigation ═══"),
        entry("↑/↓ j/k", "Move up/down in the table"),
        entry("Home/End", "Jump to first/last item"),
        entry("R", "Reload inventory from the server"),
        Line::from(""),
        section("═══ Items ═══"),
        entry("a", "Add an item (adds to an existing name)"),
        entry("c/Enter", "Check out units of the selected item"),
        entry("e", "Set the quantity of the selected item"),
        entry("d/Del", "Delete the selected item"),
        Line::from(""),
        section("═══ Stock Status ═══"),
        Line::from(vec![
            Span::styled("  ● Out of Stock", Style::default().fg(theme.danger)),
            Span::raw("  quantity 0"),
        ]),
        Line::from(vec![
            Span::styled("  ● Low Stock", Style::default().fg(theme.warning)),
            Span::raw("     quantity 1-10"),
        ]),
        Line::from(vec![
            Span::styled("  ● In Stock", Style::default().fg(theme.success)),
            Span::raw("      quantity above 10"),
        ]),
        Line::from(""),
        section("═══ Command Line ═══"),
        entry("swagtrackr list", ""),
        entry("swagtrackr checkout NAME AMOUNT --to WHO", ""),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("h", Style::default().fg(theme.accent)),
            Span::styled("/", Style::default().fg(theme.text_dim)),
            Span::styled("?", Style::default().fg(theme.accent)),
            Span::styled("/", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" to close", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" SwagTrackr Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn draw_confirm_popup<A: InventoryApi>(f: &mut Frame, app: &App<A>) {
    let theme = &app.theme;
    let popup_area = centered_fixed(50, 8, f.area());

    f.render_widget(Clear, popup_area);

    let message = sanitize(&app.confirm_message());

    let confirm = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(theme.warning))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes   "),
            Span::styled("n", Style::default().fg(theme.danger).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Delete Item ", Style::default().fg(theme.warning)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.warning)),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(confirm, popup_area);
}
