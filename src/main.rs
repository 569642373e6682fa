use std::path::PathBuf;

use diagramkit::{init_logging, load_config, run_scripted_session, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    tracing::info!("DiagramKit {} (built {})", VERSION, BUILD_DATE);

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    let summary = run_scripted_session(config)?;
    tracing::info!(
        "Session finished at design version {}: {} node(s), {} edge(s), {} selected",
        summary.version,
        summary.nodes,
        summary.edges,
        summary.selected
    );

    Ok(())
}
