use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

use natality_cli::pipeline::{AggregateResult, HarmonizeResult, ModelResult};
use natality_report::{
    align_column, apply_summary_table_style, baseline_table, category_table, dim_cell,
    extrema_table, header_cell, key_date_table, oscillation_table, series_table, trend_table,
};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn print_harmonize_summary(result: &HarmonizeResult, year_label: &str) {
    println!("Harmonized: {}", result.harmonized_path.display());
    println!("Frequency table: {}", result.frequency_path.display());
    println!(
        "Columns: {} common, {} rows kept, {} dropped for unusable dates",
        result.columns.len(),
        result.rows,
        result.dropped_dates
    );

    let mut table = Table::new();
    let mut header = vec![header_cell(year_label)];
    header.extend(MONTH_ABBREVIATIONS.iter().copied().map(header_cell));
    header.push(header_cell("Total"));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for idx in 1..=13 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for (year, counts) in result.frequency.years.iter().zip(&result.frequency.counts) {
        let mut row = vec![
            Cell::new(year)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        ];
        row.extend(counts.iter().map(|count| {
            if *count == 0 {
                dim_cell(count)
            } else {
                Cell::new(count)
            }
        }));
        row.push(Cell::new(counts.iter().sum::<u64>()).add_attribute(Attribute::Bold));
        table.add_row(row);
    }
    println!("{table}");
    if result.frequency.skipped > 0 {
        eprintln!(
            "{} records had no usable year or month",
            result.frequency.skipped
        );
    }
}

pub fn print_aggregate_summary(result: &AggregateResult, show_series: bool) {
    let data = &result.data;
    println!(
        "Birth series: {} months, {} total births",
        data.births.len(),
        data.births.values.iter().sum::<f64>()
    );
    if !result.census.is_empty() {
        let years: Vec<String> = result.census.iter().map(|c| c.year.to_string()).collect();
        println!("Census years: {}", years.join(", "));
    }
    if show_series {
        let mut columns = vec![&data.births, &data.days];
        columns.extend(data.extra.iter().filter(|series| !series.name.ends_with("_yoy")));
        println!("{}", series_table(&columns));
    }
    for matrix in &data.categories {
        println!();
        println!("{}", category_table(matrix, Some(&result.dictionary)));
    }
    if !data.key_dates.is_empty() {
        println!();
        println!("{}", key_date_table(&data.key_dates));
    }
    println!("Wrote {} model-data files", result.written.len());
}

pub fn print_model_report(result: &ModelResult) {
    let output = &result.output;
    let decomposition = &output.decomposition;
    println!("Series: {} ({} months)", decomposition.name, decomposition.raw.len());
    println!();
    println!("Baseline:");
    println!("{}", baseline_table(decomposition));
    println!();
    println!("Trend of the baseline:");
    println!("{}", trend_table(&decomposition.trend));
    println!();
    println!("Peaks and troughs of the residual:");
    println!("{}", extrema_table(decomposition));
    println!();
    println!("Rhythm:");
    println!("{}", oscillation_table(&output.oscillation));

    let params = &output.model.params;
    println!();
    println!(
        "Model: {:.0} · sin({} · i + {}) + trend",
        params.amplitude, params.period, params.phase
    );
    match &output.model_rhythm {
        Some(rhythm) => {
            let spacing: Vec<String> = rhythm.peak_spacing.iter().map(ToString::to_string).collect();
            println!("Model peak spacing: {}", spacing.join(", "));
        }
        None => println!("Model peak spacing: -"),
    }
    for path in &result.written {
        println!("Wrote {}", path.display());
    }
}
