mod scenes;

use std::env;
use std::path::PathBuf;

use gui_layout::{LayoutPass, PanelConfig, Size};
use tracing::{info, warn};

use scenes::ScenePanel;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting panelkit demo v{}", env!("CARGO_PKG_VERSION"));

    // A panel config file replaces the built-in scenes.
    if let Some(path) = env::args().nth(1).map(PathBuf::from) {
        let config = PanelConfig::load_from_path(&path)?;
        info!(path = %path.display(), ?config, "loaded panel config");

        let mut scene = ScenePanel::from_config(&config, scenes::photo_items())?;
        print_pass("custom", &scene.layout(Size { width: 1024.0, height: 768.0 }));
        return Ok(());
    }

    let mut month = scenes::month_host(3, 31);
    print_pass("calendar", &month.layout(Size { width: 700.0, height: 600.0 }));

    let mut dashboard = scenes::dashboard_host(9);
    print_pass("dashboard", &dashboard.layout(Size { width: 800.0, height: 600.0 }));

    let mut wall = scenes::photo_wall_host(220.0)?;
    let width_signal = wall.panel().desired_column_width_signal();
    let _logger = width_signal.subscribe_fn(|width| info!(width, "column width changed"));

    let available = Size { width: 900.0, height: f32::INFINITY };
    print_pass("photo wall", &wall.layout(available));

    // Narrower columns fit one more per row.
    wall.panel().set_desired_column_width(180.0)?;
    print_pass("photo wall (narrow)", &wall.layout(available));

    let unchanged = wall.layout(available);
    if unchanged.measured || !unchanged.dirty_regions.is_empty() {
        warn!("relayout without changes did work");
    }

    Ok(())
}

fn print_pass(name: &str, pass: &LayoutPass) {
    info!(
        scene = name,
        width = pass.final_size.width,
        height = pass.final_size.height,
        placed = pass.report.placed,
        unplaced = pass.report.unplaced.len(),
        dirty = pass.dirty_regions.len(),
        "layout"
    );

    for (index, bounds) in pass.arrangement.placed() {
        println!(
            "{name:>20} #{index:<3} x={:>7.1} y={:>7.1} w={:>6.1} h={:>6.1}",
            bounds.x, bounds.y, bounds.width, bounds.height
        );
    }
    if let Some(degradation) = &pass.report.degradation {
        println!("{name:>20} degraded: {degradation}");
    }
}
