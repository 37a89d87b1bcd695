use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fireems_cli::pipeline::{InspectResult, RunResult, SuggestResult};
use fireems_map::MappingValidation;
use fireems_narrative::{NarrativeField, ParsedField};
use fireems_standards::ToolSchema;

pub fn print_inspect(result: &InspectResult) {
    println!("File: {} ({})", result.path.display(), result.file_type);
    if result.truncated {
        println!(
            "Rows: {} (profiled the first {})",
            result.total_rows, result.sampled_rows
        );
    } else {
        println!("Rows: {}", result.total_rows);
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Filled"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in &result.columns {
        let filled = if column.filled == result.sampled_rows {
            Cell::new(column.filled)
        } else {
            Cell::new(format!("{}/{}", column.filled, result.sampled_rows)).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&column.name).add_attribute(Attribute::Bold),
            Cell::new(column.detected_type),
            filled,
        ]);
    }
    println!("{table}");
}

pub fn print_suggestions(result: &SuggestResult) {
    println!("Tool: {} ({})", result.schema.name, result.schema.id);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Confidence"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for suggestion in &result.suggestions {
        let target = match &suggestion.target_field {
            Some(target) => Cell::new(target),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&suggestion.source_field),
            target,
            confidence_cell(suggestion.confidence),
            required_cell(suggestion.target_field.is_some() && suggestion.is_required),
        ]);
    }
    println!("{table}");
    print_mapping_issues(&result.validation);
}

pub fn print_run_summary(result: &RunResult, max_errors: usize) {
    println!("Tool: {} ({})", result.schema.name, result.schema.id);
    println!("Rows: {}", result.total_rows);
    print_mapping_issues(&result.mapping_validation);

    let report = &result.report;
    let mut coverage = Table::new();
    coverage.set_header(vec![
        header_cell("Target"),
        header_cell("Required"),
        header_cell("Source"),
        header_cell("Fill"),
    ]);
    apply_table_style(&mut coverage);
    align_column(&mut coverage, 1, CellAlignment::Center);
    align_column(&mut coverage, 3, CellAlignment::Right);
    for entry in &report.coverage {
        let source = match &entry.source_field {
            Some(source) => Cell::new(source),
            None if entry.is_required => Cell::new("unmapped")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            None => dim_cell("-"),
        };
        coverage.add_row(vec![
            Cell::new(&entry.target_field),
            required_cell(entry.is_required),
            source,
            fill_cell(entry.fill_ratio, entry.source_field.is_some()),
        ]);
    }
    println!("{coverage}");
    println!(
        "Mapped {}/{} fields ({}/{} required), data quality score {}",
        report.mapped_fields,
        report.total_fields,
        report.required_fields_mapped,
        report.required_fields,
        report.data_quality_score
    );
    for recommendation in &report.recommendations {
        println!("- {recommendation}");
    }

    let summary = &result.summary;
    if summary.is_clean() {
        println!("Validation: no errors in {} rows", summary.rows_checked);
        return;
    }
    println!(
        "Validation: {} errors in {} of {} rows",
        summary.total_errors, summary.rows_with_errors, summary.rows_checked
    );

    let mut by_field = Table::new();
    by_field.set_header(vec![header_cell("Field"), header_cell("Errors")]);
    apply_table_style(&mut by_field);
    align_column(&mut by_field, 1, CellAlignment::Right);
    for (field, count) in &summary.by_field {
        by_field.add_row(vec![Cell::new(field), count_cell(*count, Color::Red)]);
    }
    println!("{by_field}");

    let errors = &result.output.errors;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for error in errors.iter().take(max_errors) {
        table.add_row(vec![
            Cell::new(error.row_index),
            Cell::new(&error.field),
            Cell::new(error.kind).fg(Color::Red),
            Cell::new(&error.message),
        ]);
    }
    println!("{table}");
    if errors.len() > max_errors {
        println!("... and {} more", errors.len() - max_errors);
    }
}

pub fn print_tools(tools: &[ToolSchema]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Tool"),
        header_cell("Name"),
        header_cell("Fields"),
        header_cell("Required"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for tool in tools {
        table.add_row(vec![
            Cell::new(&tool.id).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(&tool.name),
            Cell::new(tool.fields.len()),
            Cell::new(tool.required_fields().count()),
            Cell::new(tool.description.as_deref().unwrap_or_default()),
        ]);
    }
    println!("{table}");
}

pub fn print_narrative(parsed: &[(NarrativeField, Option<ParsedField>)]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Confidence"),
        header_cell("Matched text"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (field, value) in parsed {
        match value {
            Some(value) => table.add_row(vec![
                Cell::new(field),
                Cell::new(&value.value).add_attribute(Attribute::Bold),
                Cell::new(format!("{:.2}", value.confidence)),
                Cell::new(&value.original),
            ]),
            None => table.add_row(vec![
                Cell::new(field),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]),
        };
    }
    println!("{table}");
}

fn print_mapping_issues(validation: &MappingValidation) {
    for error in &validation.errors {
        eprintln!("error: {error}");
    }
    for warning in &validation.warnings {
        eprintln!("warning: {warning}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn confidence_cell(confidence: f64) -> Cell {
    let color = if confidence >= 80.0 {
        Color::Green
    } else if confidence > 50.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    if confidence <= 0.0 {
        dim_cell("-")
    } else {
        Cell::new(format!("{confidence:.0}")).fg(color)
    }
}

fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn fill_cell(ratio: f64, mapped: bool) -> Cell {
    if !mapped {
        return dim_cell("-");
    }
    let text = format!("{:.0}%", ratio * 100.0);
    if ratio < 0.5 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
