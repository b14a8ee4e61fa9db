//! Table rendering utilities for CLI outputs.

use crate::models::dose::DoseOccurrence;
use crate::utils::formatting::{pad_left, pad_right, taken_mark};
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub right_align: bool,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            right_align: false,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            right_align: true,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub separator: String,
}

impl Table {
    pub fn new(columns: Vec<Column>, separator: &str) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: separator.chars().next().unwrap_or('-').to_string(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(col.header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| pad_right(&col.header, *w))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&self.separator.repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (col, w))| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    if col.right_align {
                        pad_left(cell, *w)
                    } else {
                        pad_right(cell, *w)
                    }
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }

        out
    }
}

/// Standard dose listing.
pub fn render_doses(doses: &[DoseOccurrence], separator: &str) -> String {
    let mut table = Table::new(
        vec![
            Column::right("ID"),
            Column::left("WHEN"),
            Column::left("MEDICATION"),
            Column::right("DOSE"),
            Column::left("TYPE"),
            Column::left("FREQUENCY"),
            Column::left("STATUS"),
        ],
        separator,
    );

    for d in doses {
        table.add_row(vec![
            if d.is_persisted() {
                d.id.to_string()
            } else {
                "-".to_string()
            },
            d.dose_time_str(),
            d.name.clone(),
            d.dosage.to_string(),
            d.med_type.display_name().to_string(),
            d.frequency_label.clone(),
            taken_mark(d.taken).to_string(),
        ]);
    }

    table.render()
}
