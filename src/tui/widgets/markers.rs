//! Problems table widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::table::{COLUMN_SPACING, MarkersView, RenderedRow};
use crate::tui::state::AppState;
use crate::tui::style::Styles;
use crate::view;

fn to_line(cell: &view::Cell) -> Line<'static> {
    Line::from(
        cell.segments
            .iter()
            .map(|s| Span::styled(s.text.clone(), Styles::from_segment(s.style)))
            .collect::<Vec<_>>(),
    )
}

/// Tooltip of the cell under the pointer on the settled hover row.
fn hover_tooltip(rows: &[RenderedRow], column: Option<usize>) -> Option<&str> {
    let row = rows.iter().find(|r| r.hovered)?;
    row.cells.get(column?)?.tooltip.as_deref()
}

fn row_style(row: &RenderedRow) -> ratatui::style::Style {
    let mut style = Styles::default();
    if row.selected {
        style = style.patch(Styles::marked());
    }
    if row.hovered {
        style = style.patch(Styles::hovered());
    }
    if row.focused {
        style = style.patch(Styles::selected());
    }
    style
}

/// Renders the markers table into `area`.
///
/// Lays the table out for the body height first, so the scroll window
/// matches what is drawn. Records the body area for mouse hit testing.
pub fn render_markers(frame: &mut Frame, area: Rect, state: &mut AppState) {
    frame.render_widget(Clear, area);

    if !state.table.is_visible() {
        let hint = Paragraph::new("Problems hidden, press h to show")
            .alignment(Alignment::Center)
            .style(Styles::dim());
        frame.render_widget(hint, area);
        state.table_body = Rect::default();
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.table.aria_label()));
    let inner = block.inner(area);

    // One line for the column header.
    let body = Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    };
    state.table.layout(body.height, inner.width);
    state.table_body = body;

    if state.table.visible_item_count() == 0 {
        frame.render_widget(block, area);
        let message = if state.table.total_marker_count() == 0 {
            "No problems have been detected."
        } else {
            "No results found with provided filter criteria."
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Styles::dim());
        frame.render_widget(empty, body);
        return;
    }

    let header_cells: Vec<Cell> = state
        .table
        .column_defs()
        .map(|def| Cell::from(def.label))
        .collect();
    let header = Row::new(header_cells)
        .style(Styles::table_header())
        .height(1);

    let window = state.table.render_window(&state.quick_fixes);
    let column = state.pointer_column.and_then(|x| state.table.column_at(x));
    let block = match hover_tooltip(&window, column) {
        Some(tip) if !tip.is_empty() => {
            block.title_bottom(Line::from(Span::styled(format!(" {} ", tip), Styles::dim())))
        }
        _ => block,
    };

    let rows: Vec<Row> = window
        .iter()
        .map(|row| {
            let cells: Vec<Cell> = row.cells.iter().map(|c| Cell::from(to_line(c))).collect();
            Row::new(cells).style(row_style(row)).height(1)
        })
        .collect();

    let widths: Vec<Constraint> = state
        .table
        .column_widths()
        .iter()
        .map(|&w| Constraint::Length(w))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(block);
    frame.render_widget(table, area);
}
