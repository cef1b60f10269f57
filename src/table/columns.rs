//! Column definitions and width allocation.

/// Column kind; doubles as the renderer template id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Severity,
    Message,
    File,
    Owner,
}

impl ColumnKind {
    pub fn template_id(self) -> &'static str {
        match self {
            ColumnKind::Severity => "severity",
            ColumnKind::Message => "message",
            ColumnKind::File => "file",
            ColumnKind::Owner => "owner",
        }
    }
}

/// How a column claims horizontal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthPolicy {
    Fixed(u16),
    Weighted {
        weight: u16,
        min: u16,
        max: Option<u16>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub label: &'static str,
    pub tooltip: &'static str,
    pub template_id: &'static str,
    pub width: WidthPolicy,
}

impl ColumnDef {
    pub fn new(label: &'static str, kind: ColumnKind, width: WidthPolicy) -> Self {
        Self {
            label,
            tooltip: "",
            template_id: kind.template_id(),
            width,
        }
    }

    pub fn with_tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = tooltip;
        self
    }
}

/// Gap ratatui leaves between adjacent columns.
pub const COLUMN_SPACING: u16 = 1;

/// Severity, Message, File, Owner.
pub fn default_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("", ColumnKind::Severity, WidthPolicy::Fixed(4)).with_tooltip("Severity"),
        ColumnDef::new(
            "Message",
            ColumnKind::Message,
            WidthPolicy::Weighted {
                weight: 4,
                min: 20,
                max: None,
            },
        ),
        ColumnDef::new(
            "File",
            ColumnKind::File,
            WidthPolicy::Weighted {
                weight: 2,
                min: 16,
                max: None,
            },
        ),
        ColumnDef::new(
            "Source",
            ColumnKind::Owner,
            WidthPolicy::Weighted {
                weight: 1,
                min: 8,
                max: Some(24),
            },
        ),
    ]
}

/// Splits `total` cells between `columns`.
///
/// Fixed columns take their width first. The rest is shared by weight; columns
/// whose share falls outside their min/max are pinned there and the remainder
/// is shared again among the others. Rounding leftovers go to the heaviest
/// unpinned column. When even the minimums do not fit, minimums are returned
/// and the renderer truncates.
pub fn allocate_widths(columns: &[ColumnDef], total: u16) -> Vec<u16> {
    let mut widths = vec![0u16; columns.len()];
    let spacing = COLUMN_SPACING as u32 * columns.len().saturating_sub(1) as u32;
    let mut remaining = (total as u32).saturating_sub(spacing);

    let mut open: Vec<usize> = Vec::new();
    for (i, col) in columns.iter().enumerate() {
        match col.width {
            WidthPolicy::Fixed(w) => {
                widths[i] = w;
                remaining = remaining.saturating_sub(w as u32);
            }
            WidthPolicy::Weighted { .. } => open.push(i),
        }
    }

    loop {
        let total_weight: u32 = open.iter().map(|&i| weight_of(&columns[i]) as u32).sum();
        if open.is_empty() || total_weight == 0 {
            break;
        }

        let mut pinned = Vec::new();
        for &i in &open {
            let share = remaining * weight_of(&columns[i]) as u32 / total_weight;
            let (min, max) = bounds_of(&columns[i]);
            if share < min as u32 {
                pinned.push((i, min));
            } else if max.is_some_and(|m| share > m as u32) {
                pinned.push((i, max.unwrap_or_default()));
            }
        }

        if pinned.is_empty() {
            let mut used = 0;
            for &i in &open {
                let share = remaining * weight_of(&columns[i]) as u32 / total_weight;
                widths[i] = share as u16;
                used += share;
            }
            let heaviest = open
                .iter()
                .copied()
                .max_by_key(|&i| (weight_of(&columns[i]), std::cmp::Reverse(i)));
            if let Some(i) = heaviest {
                widths[i] = widths[i].saturating_add((remaining - used) as u16);
            }
            break;
        }

        for (i, width) in pinned {
            widths[i] = width;
            remaining = remaining.saturating_sub(width as u32);
            open.retain(|&o| o != i);
        }
    }

    widths
}

fn weight_of(col: &ColumnDef) -> u16 {
    match col.width {
        WidthPolicy::Fixed(_) => 0,
        WidthPolicy::Weighted { weight, .. } => weight,
    }
}

fn bounds_of(col: &ColumnDef) -> (u16, Option<u16>) {
    match col.width {
        WidthPolicy::Fixed(w) => (w, Some(w)),
        WidthPolicy::Weighted { min, max, .. } => (min, max),
    }
}
