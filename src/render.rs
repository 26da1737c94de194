use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::access::AccessLevel;
use crate::index::{FileEntry, Folder, TreeIndex};
use crate::mime::MimeCategory;
use crate::overlay::{MenuAction, Overlays, ToastKind};
use crate::query::{child_files, child_folders};
use crate::state::{SelectionKey, SortKey, ViewMode, ViewState};

const CARD_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 4;
const MENU_WIDTH: u16 = 14;
const SIZE_COL: u16 = 12;
const KIND_COL: u16 = 18;

/// What an interactive zone maps to when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Item { key: SelectionKey, checkbox: bool },
    Crumb { folder_id: String },
    SortHeader(SortKey),
    ViewToggle,
    SearchBox,
    SearchClear,
    SelectionCopy,
    SelectionClear,
    MenuEntry(MenuAction),
    ModalBody,
    ModalCopyUrl,
    ModalDownload,
    ModalClose,
}

/// A clickable rectangle from the last draw pass. The whole list is rebuilt
/// every frame; regions from earlier frames are dead the moment a new one is
/// drawn (the discard-and-rebind contract).
#[derive(Debug, Clone)]
pub struct HitRegion {
    pub rect: Rect,
    pub target: HitTarget,
}

impl HitRegion {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.x
            && x < self.rect.x.saturating_add(self.rect.width)
            && y >= self.rect.y
            && y < self.rect.y.saturating_add(self.rect.height)
    }
}

/// Read-only inputs to a draw pass. The renderer mutates nothing; it derives
/// widgets and hit regions from this snapshot alone.
pub struct UiSnapshot<'a> {
    pub index: &'a TreeIndex,
    pub view: &'a ViewState,
    pub overlays: &'a Overlays,
    pub access: AccessLevel,
    pub title: &'a str,
    pub search_input: &'a str,
    pub search_focused: bool,
    pub cursor: Option<&'a SelectionKey>,
}

/// Full draw pass: header, selection toolbar, breadcrumb bar, listing, and
/// overlays, returning the hit regions for this frame.
pub fn draw(frame: &mut Frame, ui: &UiSnapshot) -> Vec<HitRegion> {
    let area = frame.area();
    let mut regions = Vec::new();

    if ui.access.is_denied() {
        draw_denied(frame, area);
        return regions;
    }

    let has_selection = !ui.view.selection.is_empty();
    let mut constraints = vec![Constraint::Length(3)];
    if has_selection {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(1));
    let rows = Layout::vertical(constraints).split(area);

    let mut row = 0;
    draw_header(frame, rows[row], ui, &mut regions);
    row += 1;
    if has_selection {
        draw_selection_toolbar(frame, rows[row], ui, &mut regions);
        row += 1;
    }
    draw_crumb_bar(frame, rows[row], ui, &mut regions);
    row += 1;
    draw_listing(frame, rows[row], ui, &mut regions);
    row += 1;
    draw_footer(frame, rows[row]);

    draw_toasts(frame, area, ui);
    if ui.overlays.context_menu.is_some() {
        draw_context_menu(frame, area, ui, &mut regions);
    }
    if ui.overlays.modal.is_some() {
        draw_modal(frame, area, ui, &mut regions);
    }

    regions
}

fn draw_denied(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let message = Paragraph::new(vec![
        Line::raw(""),
        Line::styled("Access denied", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::raw("This asset library is restricted. Ask the operator for access."),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(message, inner);
}

/// Accumulates spans along a single row, tracking the x cursor so hit regions
/// line up with the text they label.
struct LineBuilder<'a> {
    x: u16,
    y: u16,
    max_x: u16,
    spans: Vec<Span<'a>>,
}

impl<'a> LineBuilder<'a> {
    fn new(area: Rect) -> Self {
        Self {
            x: area.x,
            y: area.y,
            max_x: area.x.saturating_add(area.width),
            spans: Vec::new(),
        }
    }

    fn push(&mut self, text: impl Into<String>, style: Style) {
        let text: String = text.into();
        self.x = self
            .x
            .saturating_add(text.chars().count() as u16)
            .min(self.max_x);
        self.spans.push(Span::styled(text, style));
    }

    fn push_hit(
        &mut self,
        text: impl Into<String>,
        style: Style,
        target: HitTarget,
        regions: &mut Vec<HitRegion>,
    ) {
        let text: String = text.into();
        let width = (text.chars().count() as u16).min(self.max_x.saturating_sub(self.x));
        if width > 0 {
            regions.push(HitRegion {
                rect: Rect::new(self.x, self.y, width, 1),
                target,
            });
        }
        self.push(text, style);
    }

    fn into_line(self) -> Line<'a> {
        Line::from(self.spans)
    }
}

fn draw_header(frame: &mut Frame, area: Rect, ui: &UiSnapshot, regions: &mut Vec<HitRegion>) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::horizontal([Constraint::Min(12), Constraint::Length(34)]).split(inner);

    let mut title = LineBuilder::new(cols[0]);
    title.push(
        format!(" {}", sanitize(ui.title)),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    );
    if ui.access.is_admin() {
        title.push("  ADMIN", Style::default().fg(Color::Yellow));
    }
    frame.render_widget(Paragraph::new(title.into_line()), cols[0]);

    let search_style = if ui.search_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut search = LineBuilder::new(cols[1]);
    let caret = if ui.search_focused { "▏" } else { "" };
    search.push_hit(
        format!("/ Search: {}{caret}", sanitize(ui.search_input)),
        search_style,
        HitTarget::SearchBox,
        regions,
    );
    if !ui.search_input.is_empty() {
        search.push(" ", Style::default());
        search.push_hit("✕", Style::default().fg(Color::Red), HitTarget::SearchClear, regions);
    }
    frame.render_widget(Paragraph::new(search.into_line()), cols[1]);
}

fn draw_selection_toolbar(frame: &mut Frame, area: Rect, ui: &UiSnapshot, regions: &mut Vec<HitRegion>) {
    let mut line = LineBuilder::new(area);
    line.push(
        format!(" {} selected  ", ui.view.selection.len()),
        Style::default().fg(Color::Cyan),
    );
    line.push_hit(
        "[Copy URLs]",
        Style::default().fg(Color::Green),
        HitTarget::SelectionCopy,
        regions,
    );
    line.push("  ", Style::default());
    line.push_hit(
        "[Clear]",
        Style::default().fg(Color::Red),
        HitTarget::SelectionClear,
        regions,
    );
    frame.render_widget(Paragraph::new(line.into_line()), area);
}

fn draw_crumb_bar(frame: &mut Frame, area: Rect, ui: &UiSnapshot, regions: &mut Vec<HitRegion>) {
    let cols = Layout::horizontal([Constraint::Min(10), Constraint::Length(9)]).split(area);

    let mut line = LineBuilder::new(cols[0]);
    line.push(" ", Style::default());
    let last = ui.view.breadcrumbs.len().saturating_sub(1);
    for (i, crumb) in ui.view.breadcrumbs.iter().enumerate() {
        let style = if i == last {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue)
        };
        line.push_hit(
            sanitize(&crumb.name),
            style,
            HitTarget::Crumb {
                folder_id: crumb.id.clone(),
            },
            regions,
        );
        if i != last {
            line.push(" / ", Style::default().fg(Color::DarkGray));
        }
    }
    frame.render_widget(Paragraph::new(line.into_line()), cols[0]);

    let toggle_label = match ui.view.view_mode {
        ViewMode::Grid => "[▦ Grid]",
        ViewMode::List => "[≡ List]",
    };
    let mut toggle = LineBuilder::new(cols[1]);
    toggle.push_hit(
        toggle_label,
        Style::default().fg(Color::Magenta),
        HitTarget::ViewToggle,
        regions,
    );
    frame.render_widget(Paragraph::new(toggle.into_line()), cols[1]);
}

/// One display row/card of the listing, folders first.
struct ListedItem<'a> {
    key: SelectionKey,
    folder: Option<&'a Folder>,
    file: Option<&'a FileEntry>,
}

fn listed_items<'a>(ui: &UiSnapshot<'a>) -> Vec<ListedItem<'a>> {
    let view = ui.view;
    let mut items: Vec<ListedItem> = child_folders(ui.index, &view.current_folder_id)
        .into_iter()
        .map(|folder| ListedItem {
            key: SelectionKey::Folder(folder.id.clone()),
            folder: Some(folder),
            file: None,
        })
        .collect();
    items.extend(
        child_files(
            ui.index,
            &view.current_folder_id,
            &view.search_query,
            view.sort_key,
            view.sort_order,
        )
        .into_iter()
        .map(|file| ListedItem {
            key: SelectionKey::File(file.id.clone()),
            folder: None,
            file: Some(file),
        }),
    );
    items
}

fn draw_listing(frame: &mut Frame, area: Rect, ui: &UiSnapshot, regions: &mut Vec<HitRegion>) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 8 || inner.height < 2 {
        return;
    }

    let items = listed_items(ui);
    if items.is_empty() {
        let message = if ui.view.search_query.is_empty() {
            "This folder is empty".to_string()
        } else {
            format!("No items match \"{}\"", sanitize(&ui.view.search_query))
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1),
        );
        return;
    }

    match ui.view.view_mode {
        ViewMode::List => draw_list_rows(frame, inner, ui, &items, regions),
        ViewMode::Grid => draw_grid_cards(frame, inner, ui, &items, regions),
    }
}

fn cursor_position(ui: &UiSnapshot, items: &[ListedItem]) -> Option<usize> {
    ui.cursor.and_then(|cursor| items.iter().position(|item| &item.key == cursor))
}

fn draw_list_rows(
    frame: &mut Frame,
    inner: Rect,
    ui: &UiSnapshot,
    items: &[ListedItem],
    regions: &mut Vec<HitRegion>,
) {
    // Narrow terminals shed the fixed columns, Kind first, so the name is the
    // last column standing.
    let show_kind = inner.width >= 56;
    let show_size = inner.width >= 30;
    let fixed = 6 + if show_size { SIZE_COL } else { 0 } + if show_kind { KIND_COL } else { 0 };
    let name_width = inner.width.saturating_sub(fixed) as usize;
    let mut columns = vec![(SortKey::Name, name_width)];
    if show_size {
        columns.push((SortKey::Size, SIZE_COL as usize));
    }
    if show_kind {
        columns.push((SortKey::Kind, KIND_COL as usize));
    }

    let header_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let mut header = LineBuilder::new(header_area);
    header.push("      ", Style::default());
    let header_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
    for (key, width) in columns {
        let marker = if ui.view.sort_key == key {
            ui.view.sort_order.marker()
        } else {
            " "
        };
        header.push_hit(
            pad(&format!("{} {marker}", key.label()), width),
            header_style,
            HitTarget::SortHeader(key),
            regions,
        );
    }
    frame.render_widget(Paragraph::new(header.into_line()), header_area);

    let visible = inner.height.saturating_sub(1) as usize;
    let offset = cursor_position(ui, items)
        .map_or(0, |i| (i + 1).saturating_sub(visible));

    for (slot, item) in items.iter().skip(offset).take(visible).enumerate() {
        let row_area = Rect::new(inner.x, inner.y + 1 + slot as u16, inner.width, 1);
        let selected = ui.view.selection.contains(&item.key);
        let at_cursor = ui.cursor == Some(&item.key);
        let base = row_style(selected, at_cursor);

        let mut line = LineBuilder::new(row_area);
        let checkbox = if selected { "[x] " } else { "[ ] " };
        line.push_hit(
            checkbox,
            base.fg(Color::Cyan),
            HitTarget::Item {
                key: item.key.clone(),
                checkbox: true,
            },
            regions,
        );

        let (glyph, name, size, kind) = match (item.folder, item.file) {
            (Some(folder), _) => (
                Span::styled("▸ ", base.fg(folder_color(folder))),
                folder.name.clone(),
                "—".to_string(),
                "folder".to_string(),
            ),
            (_, Some(file)) => (
                Span::styled(
                    format!("{} ", MimeCategory::of(&file.mime_type).glyph()),
                    base.fg(Color::Gray),
                ),
                file.name.clone(),
                file.size.map(format_size).unwrap_or_else(|| "—".to_string()),
                file.mime_type.clone(),
            ),
            _ => continue,
        };

        let row_start_x = line.x;
        line.spans.push(glyph);
        line.x = line.x.saturating_add(2);
        line.push(pad(&sanitize(&name), name_width.saturating_sub(2)), base);
        if show_size {
            line.push(pad(&size, SIZE_COL as usize), base.fg(Color::Gray));
        }
        if show_kind {
            line.push(pad(&sanitize(&kind), KIND_COL as usize), base.fg(Color::DarkGray));
        }
        frame.render_widget(Paragraph::new(line.into_line()), row_area);

        regions.push(HitRegion {
            rect: Rect::new(
                row_start_x,
                row_area.y,
                row_area.width.saturating_sub(row_start_x - row_area.x),
                1,
            ),
            target: HitTarget::Item {
                key: item.key.clone(),
                checkbox: false,
            },
        });
    }
}

fn draw_grid_cards(
    frame: &mut Frame,
    inner: Rect,
    ui: &UiSnapshot,
    items: &[ListedItem],
    regions: &mut Vec<HitRegion>,
) {
    let cols = (inner.width / (CARD_WIDTH + 1)).max(1) as usize;
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let cursor_row = cursor_position(ui, items).map_or(0, |i| i / cols);
    let offset_rows = (cursor_row + 1).saturating_sub(visible_rows);

    for (slot, item) in items
        .iter()
        .skip(offset_rows * cols)
        .take(visible_rows * cols)
        .enumerate()
    {
        let col = (slot % cols) as u16;
        let row = (slot / cols) as u16;
        let card = Rect::new(
            inner.x + col * (CARD_WIDTH + 1),
            inner.y + row * CARD_HEIGHT,
            CARD_WIDTH.min(inner.width),
            CARD_HEIGHT,
        );
        if card.y + card.height > inner.y + inner.height {
            break;
        }

        let selected = ui.view.selection.contains(&item.key);
        let at_cursor = ui.cursor == Some(&item.key);
        let border_style = if at_cursor {
            Style::default().fg(Color::Yellow)
        } else if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default().borders(Borders::ALL).border_style(border_style);
        let card_inner = block.inner(card);
        frame.render_widget(block, card);

        let base = row_style(selected, at_cursor);
        let name_width = card_inner.width.saturating_sub(6) as usize;
        let top = Rect::new(card_inner.x, card_inner.y, card_inner.width, 1);
        let mut line = LineBuilder::new(top);
        line.push_hit(
            if selected { "[x] " } else { "[ ] " },
            base.fg(Color::Cyan),
            HitTarget::Item {
                key: item.key.clone(),
                checkbox: true,
            },
            regions,
        );
        match (item.folder, item.file) {
            (Some(folder), _) => {
                line.push("▸ ", base.fg(folder_color(folder)));
                line.push(truncate(&sanitize(&folder.name), name_width), base);
            }
            (_, Some(file)) => {
                line.push(
                    format!("{} ", MimeCategory::of(&file.mime_type).glyph()),
                    base.fg(Color::Gray),
                );
                line.push(truncate(&sanitize(&file.name), name_width), base);
            }
            _ => {}
        }
        frame.render_widget(Paragraph::new(line.into_line()), top);

        if card_inner.height > 1 {
            let detail = match (item.folder, item.file) {
                (Some(_), _) => "folder".to_string(),
                (_, Some(file)) => match file.size {
                    Some(size) => format!("{}  {}", format_size(size), file.mime_type),
                    None => file.mime_type.clone(),
                },
                _ => String::new(),
            };
            let bottom = Rect::new(card_inner.x, card_inner.y + 1, card_inner.width, 1);
            frame.render_widget(
                Paragraph::new(truncate(&sanitize(&detail), card_inner.width as usize))
                    .style(Style::default().fg(Color::DarkGray)),
                bottom,
            );
        }

        regions.push(HitRegion {
            rect: card,
            target: HitTarget::Item {
                key: item.key.clone(),
                checkbox: false,
            },
        });
    }
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(" q quit  / search  g view  ↑↓ move  ⏎ open  space select  ctrl-a all  esc clear")
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_toasts(frame: &mut Frame, area: Rect, ui: &UiSnapshot) {
    for (i, toast) in ui.overlays.toasts.iter().rev().enumerate() {
        let y = area
            .y
            .saturating_add(area.height.saturating_sub(2))
            .saturating_sub(i as u16);
        if y <= area.y {
            break;
        }
        let text = format!(" {} ", sanitize(&toast.message));
        let width = (text.chars().count() as u16).min(area.width);
        let rect = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            y,
            width,
            1,
        );
        let style = match toast.kind {
            ToastKind::Info => Style::default().fg(Color::Black).bg(Color::Gray),
            ToastKind::Success => Style::default().fg(Color::Black).bg(Color::Green),
            ToastKind::Error => Style::default().fg(Color::White).bg(Color::Red),
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(text).style(style), rect);
    }
}

fn draw_context_menu(frame: &mut Frame, area: Rect, ui: &UiSnapshot, regions: &mut Vec<HitRegion>) {
    let Some(menu) = ui.overlays.context_menu.as_ref() else {
        return;
    };
    let height = MenuAction::ALL.len() as u16 + 2;
    let rect = crate::overlay::place_menu(menu.anchor, MENU_WIDTH, height, area);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    for (i, action) in MenuAction::ALL.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        regions.push(HitRegion {
            rect: row,
            target: HitTarget::MenuEntry(*action),
        });
        frame.render_widget(
            Paragraph::new(format!(" {}", action.label())).style(Style::default().fg(Color::White)),
            row,
        );
    }
}

fn draw_modal(frame: &mut Frame, area: Rect, ui: &UiSnapshot, regions: &mut Vec<HitRegion>) {
    let Some(modal) = ui.overlays.modal.as_ref() else {
        return;
    };
    let width = area.width.saturating_sub(4).min(64).max(20);
    let height = area.height.saturating_sub(2).min(14).max(8);
    let rect = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, rect);

    // Anything inside the modal that is not a control is inert; clicks with no
    // region at all count as backdrop and close it.
    regions.push(HitRegion {
        rect,
        target: HitTarget::ModalBody,
    });

    let file = ui.index.file(&modal.file_id);
    let title = file
        .map(|f| format!(" {} ", sanitize(&f.name)))
        .unwrap_or_else(|| " Preview ".to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut lines: Vec<Line> = Vec::new();
    match file {
        Some(file) => {
            let category = MimeCategory::of(&file.mime_type);
            let banner = match category {
                MimeCategory::Image => "◩ ◩ ◩  image preview  ◩ ◩ ◩",
                MimeCategory::Video => "▶ video — plays with controls in the host viewer",
                MimeCategory::Pdf => "▤ PDF document — opens in an embedded frame",
                MimeCategory::Other => "■ no inline preview for this type",
            };
            lines.push(Line::raw(""));
            lines.push(Line::styled(banner, Style::default().fg(Color::Cyan)).alignment(Alignment::Center));
            lines.push(Line::raw(""));
            lines.push(Line::raw(format!("  Type: {}", sanitize(&file.mime_type))));
            if let Some(size) = file.size {
                lines.push(Line::raw(format!("  Size: {}", format_size(size))));
            }
            if !file.description.is_empty() {
                lines.push(Line::raw(format!("  {}", sanitize(&file.description))));
            }
            lines.push(Line::styled(
                format!("  {}", sanitize(&file.url)),
                Style::default().fg(Color::Blue),
            ));
        }
        None => {
            lines.push(Line::raw(""));
            lines.push(Line::raw("  This file is no longer in the library."));
        }
    }
    let body = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines), body);

    let footer_area = Rect::new(
        inner.x,
        inner.y + inner.height.saturating_sub(1),
        inner.width,
        1,
    );
    let mut footer = LineBuilder::new(footer_area);
    footer.push(" ", Style::default());
    footer.push_hit(
        "[c Copy URL]",
        Style::default().fg(Color::Green),
        HitTarget::ModalCopyUrl,
        regions,
    );
    footer.push("  ", Style::default());
    footer.push_hit(
        "[d Download]",
        Style::default().fg(Color::Cyan),
        HitTarget::ModalDownload,
        regions,
    );
    footer.push("  ", Style::default());
    footer.push_hit(
        "[esc Close]",
        Style::default().fg(Color::Red),
        HitTarget::ModalClose,
        regions,
    );
    frame.render_widget(Paragraph::new(footer.into_line()), footer_area);
}

fn row_style(selected: bool, at_cursor: bool) -> Style {
    let mut style = Style::default().fg(Color::White);
    if selected {
        style = style.bg(Color::Rgb(35, 55, 85));
    }
    if at_cursor {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Untrusted names go through here before reaching the terminal buffer:
/// control characters (including newlines and escape) are stripped.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Char-safe truncation with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let truncated = truncate(text, width);
    let len = truncated.chars().count();
    format!("{truncated}{}", " ".repeat(width.saturating_sub(len)))
}

fn folder_color(folder: &Folder) -> Color {
    match folder.color.as_deref() {
        Some("red") => Color::Red,
        Some("green") => Color::Green,
        Some("blue") => Color::Blue,
        Some("purple") | Some("violet") => Color::Magenta,
        Some("orange") => Color::Rgb(230, 140, 50),
        // Colors are free-form config input; the length check counts bytes,
        // so non-ASCII must be rejected before slicing by offset.
        Some(hex) if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            parse_hex(hex).unwrap_or(Color::Yellow)
        }
        _ => Color::Yellow,
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
    let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
    let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn format_size(size: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = size as f64;
    let mut unit_index = 0;
    while value >= 1024.0 && unit_index < UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }
    format!("{:.1} {}", value, UNITS[unit_index])
}
