use colored::*;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::llm::tensor::Matrix;

/// JSON document describing one forward pass
#[derive(Serialize)]
struct ForwardReport<'a> {
    text: &'a str,
    tokens: &'a [usize],
    shape: [usize; 2],
    data: Vec<&'a [f32]>,
}

/// Renders the output matrix as a table, one row per token.
///
/// # Arguments
///
/// * `tokens` - Token indices, one per output row
/// * `output` - Matrix with shape [seq_len, hidden_dim]
pub fn render_table(tokens: &[usize], output: &Matrix) -> String {
    let mut header = vec![
        Cell::new("#").fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Token").fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold),
    ];
    header.extend((0..output.cols()).map(|c| {
        Cell::new(format!("h{}", c))
            .fg(comfy_table::Color::Cyan)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Center)
    }));

    let mut table = Table::new();
    table
        .set_header(header)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for (i, row) in output.iter_rows().enumerate() {
        let token = tokens.get(i).map_or_else(|| "?".to_string(), |t| t.to_string());
        let mut cells = vec![
            Cell::new(i).fg(comfy_table::Color::White).set_alignment(CellAlignment::Center),
            Cell::new(token).fg(comfy_table::Color::Yellow).set_alignment(CellAlignment::Right),
        ];
        cells.extend(row.iter().map(|&v| {
            let color = if v < 0.0 { comfy_table::Color::Red } else { comfy_table::Color::Green };
            Cell::new(format!("{:.4}", v)).fg(color).set_alignment(CellAlignment::Right)
        }));
        table.add_row(cells);
    }

    format!(
        "{} {} x {}\n{}",
        "Output".bold().green(),
        output.rows(),
        output.cols(),
        table
    )
}

/// Renders the forward pass as pretty-printed JSON
pub fn render_json(text: &str, tokens: &[usize], output: &Matrix) -> Result<String, serde_json::Error> {
    let report = ForwardReport {
        text,
        tokens,
        shape: [output.rows(), output.cols()],
        data: output.iter_rows().collect(),
    };
    serde_json::to_string_pretty(&report)
}
