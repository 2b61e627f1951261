//! Console tables for pipeline results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use natality_model::{CategoryMatrix, CodeDictionary, MonthlySeries};
use natality_signal::{DecomposedSeries, KeyDateMark, LinearTrend, OscillationStats};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn total_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn signed_cell(value: f64) -> Cell {
    let cell = Cell::new(format!("{value:.1}"));
    if value > 0.0 {
        cell.fg(Color::Green)
    } else if value < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn value_cell(value: f64) -> Cell {
    if value.is_nan() {
        dim_cell("-")
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        Cell::new(format!("{value:.0}"))
    } else {
        Cell::new(format!("{value:.3}"))
    }
}

/// One row per month, one column per series.
///
/// Every series is expected on the axis of the first one; months a later
/// series lacks render as `-`.
pub fn series_table(series: &[&MonthlySeries]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Month")];
    header.extend(series.iter().map(|s| header_cell(&s.name)));
    table.set_header(header);
    apply_table_style(&mut table);
    for idx in 1..=series.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }

    let Some(axis) = series.first() else {
        return table;
    };
    for month in &axis.months {
        let mut row = vec![Cell::new(month)];
        row.extend(series.iter().map(|s| match s.value_for(*month) {
            Some(value) => value_cell(value),
            None => dim_cell("-"),
        }));
        table.add_row(row);
    }
    table
}

/// Totals per code, labelled from the dictionary when it knows the code.
pub fn category_table(matrix: &CategoryMatrix, dictionary: Option<&CodeDictionary>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Label"),
        header_cell("Records"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let totals = matrix.code_totals();
    let grand: u64 = totals.iter().sum();
    let label = dictionary.and_then(|dict| dict.label(&matrix.variable));
    for (code, total) in matrix.codes.iter().zip(&totals) {
        let share = if grand == 0 {
            0.0
        } else {
            *total as f64 / grand as f64 * 100.0
        };
        table.add_row(vec![
            Cell::new(format!("{}_{code}", matrix.variable))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            match label {
                Some(label) => Cell::new(label),
                None => dim_cell("-"),
            },
            Cell::new(total),
            Cell::new(format!("{share:.1}%")),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        total_cell(&matrix.variable),
        Cell::new(grand).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

/// Yearly medians of the baseline.
pub fn baseline_table(decomposed: &DecomposedSeries) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Year"),
        header_cell("Months"),
        header_cell("Median"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (segment, median) in decomposed
        .baseline
        .segments
        .iter()
        .zip(&decomposed.baseline.medians)
    {
        table.add_row(vec![
            Cell::new(segment.year),
            Cell::new(segment.len()),
            value_cell(*median),
        ]);
    }
    table
}

/// Detected peaks and troughs of the residual, in axis order.
pub fn extrema_table(decomposed: &DecomposedSeries) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Month"),
        header_cell("Index"),
        header_cell("Residual"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut extrema: Vec<(usize, bool)> = decomposed
        .peaks
        .iter()
        .map(|&idx| (idx, true))
        .chain(decomposed.troughs.iter().map(|&idx| (idx, false)))
        .collect();
    extrema.sort_unstable();
    for (idx, is_peak) in extrema {
        let kind = if is_peak {
            Cell::new("peak").fg(Color::Green)
        } else {
            Cell::new("trough").fg(Color::Red)
        };
        table.add_row(vec![
            kind,
            Cell::new(decomposed.months[idx]),
            Cell::new(idx),
            signed_cell(decomposed.residual[idx]),
        ]);
    }
    table
}

pub fn trend_table(trend: &LinearTrend) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("slope"), Cell::new(format!("{:.3}", trend.slope))]);
    table.add_row(vec![
        Cell::new("intercept"),
        Cell::new(format!("{:.3}", trend.intercept)),
    ]);
    table.add_row(vec![Cell::new("r"), Cell::new(format!("{:.4}", trend.r))]);
    table.add_row(vec![Cell::new("p"), Cell::new(format!("{:.3e}", trend.p_value))]);
    table.add_row(vec![Cell::new("n"), Cell::new(trend.n)]);
    table
}

/// Amplitude and spacing per detected cycle.
pub fn oscillation_table(stats: &OscillationStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Cycle"),
        header_cell("Amplitude"),
        header_cell("Change"),
        header_cell("Peak spacing"),
        header_cell("Trough spacing"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..5 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    let optional = |value: Option<usize>| value.map_or_else(|| dim_cell("-"), Cell::new);
    for (cycle, amplitude) in stats.amplitudes.iter().enumerate() {
        let change = cycle
            .checked_sub(1)
            .and_then(|prev| stats.amplitude_changes.get(prev))
            .map_or_else(|| dim_cell("-"), |change| signed_cell(*change));
        table.add_row(vec![
            Cell::new(cycle + 1),
            Cell::new(format!("{amplitude:.1}")),
            change,
            optional(stats.peak_spacing.get(cycle).copied()),
            optional(stats.trough_spacing.get(cycle).copied()),
        ]);
    }
    table
}

pub fn code_table(dictionary: &CodeDictionary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Label"),
        header_cell("Range"),
    ]);
    apply_table_style(&mut table);
    for entry in dictionary.iter() {
        table.add_row(vec![
            Cell::new(&entry.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&entry.label),
            entry
                .range
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    table
}

pub fn key_date_table(marks: &[KeyDateMark]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Event"),
        header_cell("Month"),
        header_cell("Gestation"),
    ]);
    apply_table_style(&mut table);
    for mark in marks {
        let gestation = match mark.gestation_index {
            Some(_) => Cell::new(mark.gestation),
            None => dim_cell(format!("{} (off axis)", mark.gestation)),
        };
        table.add_row(vec![Cell::new(&mark.event), Cell::new(mark.month), gestation]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use natality_model::{CodeEntry, CodeValue, Month};

    fn months(count: u32) -> Vec<Month> {
        (1..=count).map(|m| Month::new(2020, m).unwrap()).collect()
    }

    #[test]
    fn test_series_table_rows() {
        let births = MonthlySeries::new("births", months(3), vec![10.0, 11.0, 12.5]).unwrap();
        let rate =
            MonthlySeries::new("births_per_day", months(2), vec![0.3, 0.4]).unwrap();
        let table = series_table(&[&births, &rate]);
        assert_eq!(table.row_count(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("2020-03-01"));
        assert!(rendered.contains("12.500"));
    }

    #[test]
    fn test_category_table_uses_dictionary_label() {
        let matrix = CategoryMatrix {
            variable: "DPLURAL".to_string(),
            months: months(2),
            codes: vec![CodeValue::Numeric(1), CodeValue::Numeric(2)],
            counts: vec![vec![3, 1], vec![0, 4]],
        };
        let dictionary = CodeDictionary::from_entries([CodeEntry {
            code: "DPLURAL".to_string(),
            label: "Plurality".to_string(),
            range: None,
        }]);
        let table = category_table(&matrix, Some(&dictionary));
        assert_eq!(table.row_count(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("DPLURAL_2"));
        assert!(rendered.contains("Plurality"));
        assert!(rendered.contains("50.0%"));
    }

    #[test]
    fn test_oscillation_table_rows() {
        let stats = OscillationStats {
            amplitudes: vec![4.0, 6.0],
            peak_spacing: vec![12],
            trough_spacing: vec![12],
            amplitude_changes: vec![2.0],
        };
        let table = oscillation_table(&stats);
        assert_eq!(table.row_count(), 2);
    }
}
