//! Example: export a discriminant analysis for map browsing.
//!
//! Usage:
//!   cargo run --example export_dapc

use mvmapper::{
    AnalysisResult, DiscriminantResult, ExportConfig, Exporter, ScoreMatrix, Table, Value,
};

fn main() -> mvmapper::Result<()> {
    // A small discriminant result: three entities, two retained components,
    // two candidate groups.
    let analysis = AnalysisResult::Discriminant(DiscriminantResult {
        keys: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        scores: ScoreMatrix::from_rows(vec![
            vec![0.12, -0.44],
            vec![0.71, 0.23],
            vec![-0.52, 0.91],
        ]),
        groups: vec!["north".to_string(), "north".to_string(), "south".to_string()],
        assigned: vec!["north".to_string(), "south".to_string(), "south".to_string()],
        posterior: ScoreMatrix::from_rows(vec![
            vec![0.92, 0.08],
            vec![0.41, 0.59],
            vec![0.17, 0.83],
        ]),
    });

    // Metadata covering two of the three entities.
    let mut metadata = Table::new(
        ["key", "lat", "lon", "site"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    metadata.push_row(vec![
        Value::from("A"),
        Value::from(48.21),
        Value::from(16.37),
        Value::from("Vienna"),
    ]);
    metadata.push_row(vec![
        Value::from("B"),
        Value::from(59.33),
        Value::from(18.07),
        Value::from("Stockholm"),
    ]);

    let outcome = Exporter::new().export_with(&analysis, &metadata, &ExportConfig::in_memory())?;

    println!("## Export table ({} rows)", outcome.table.row_count());
    println!();
    println!("  {}", outcome.table.column_names().join(","));
    for row in outcome.table.rows() {
        let rendered: Vec<String> = row.iter().map(|value| value.to_string()).collect();
        println!("  {}", rendered.join(","));
    }
    println!();

    println!("## Diagnostics ({} total)", outcome.diagnostics.len());
    for diagnostic in &outcome.diagnostics {
        println!("  [{}] {}", diagnostic.severity.label(), diagnostic.message);
    }
    println!();

    println!("## Summary");
    println!("  Entities exported: {}", outcome.summary.entities_exported);
    println!("  Entities dropped:  {}", outcome.summary.entities_dropped);
    println!("  Analysis columns:  {}", outcome.summary.analysis_columns);
    println!("  Metadata columns:  {}", outcome.summary.metadata_columns);

    Ok(())
}
