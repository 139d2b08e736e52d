use std::env;
use std::fs::File;

use gridengine::prelude::*;
use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};

/// Rows filled with placeholder cells when a layout carries no data.
const DEFAULT_ROWS: usize = 100;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Nine columns over three nesting depths, one of them a legacy single group.
fn story_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("first", "First", 100).group_path(["Group A", "Sub Group 1"]),
        ColumnDef::new("second", "Second", 100).group_path(["Group A", "Sub Group 1"]),
        ColumnDef::new("third", "Third", 100).group_path(["Group A", "Sub Group 2"]),
        ColumnDef::new("fourth", "Fourth", 100).group_path(["Group B", "Sub Group 3"]),
        ColumnDef::new("fifth", "Fifth", 100).group_path(["Group B", "Sub Group 3"]),
        ColumnDef::new("sixth", "Sixth", 100).group_path(["Group B", "Sub Group 4"]),
        ColumnDef::new("seventh", "Seventh", 100).group("Group C"),
        ColumnDef::new("eighth", "Eighth", 100).group_path(["Group D", "Sub Group 5", "Sub Sub Group 1"]),
        ColumnDef::new("ninth", "Ninth", 100).group_path(["Group D", "Sub Group 5", "Sub Sub Group 2"]),
    ]
}

fn placeholder_data(columns: usize, rows: usize) -> DataMatrix {
    (0..rows)
        .map(|row| {
            (0..columns)
                .map(|col| GridCell::text(format!("{col},{row} 🦝")))
                .collect()
        })
        .collect()
}

fn load_config() -> Result<GridEngineConfig, DemoError> {
    let Some(path) = env::args().nth(1) else {
        let columns = story_columns();
        let data = placeholder_data(columns.len(), DEFAULT_ROWS);
        return Ok(GridEngineConfig::new(columns, data));
    };

    let layout = GridLayout::load(&path)?;
    info!("Loaded layout '{}' with {} column(s)", path, layout.columns.len());
    let mut config = layout.into_config();
    if config.data.is_empty() {
        let rows = config.options.rows.unwrap_or(DEFAULT_ROWS);
        config.data = placeholder_data(config.columns.len(), rows);
    }
    Ok(config)
}

async fn run() -> Result<(), DemoError> {
    let config = load_config()?
        .on_group_header_clicked(|col| info!("Group header clicked above column {}", col))
        .on_selection_change(|selection| debug!("Selection: {:?}", selection.current_cell()))
        .on_viewport_change(|viewport| debug!("Viewport: {:?}", viewport));

    let adapter = TerminalAdapter::new();
    let engine = GridFactory::create_engine(config, adapter.clone());
    engine.bind_lifecycle();
    let root = adapter.create_element("grid");

    TerminalHost::new(adapter)?.run(&root).await?;

    info!("Collapsed groups at exit: {:?}", engine.collapsed_groups());
    Ok(())
}

#[tokio::main]
async fn main() {
    match File::create("gridengine-demo.log") {
        Ok(log_file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file: {}", e),
    }

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
    }
}
