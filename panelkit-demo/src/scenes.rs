use gui_layout::{
    GridAttachment, LayoutError, LayoutHost, LayoutPass, LayoutPatterns, PanelConfig, Size, Sizing,
    StaggeredPanel, StaticItem, UniformGrid,
};

/// A panel built from configuration, ready to host items.
pub enum ScenePanel {
    Grid(LayoutHost<UniformGrid, StaticItem>),
    Wall(LayoutHost<StaggeredPanel, StaticItem>),
}

impl ScenePanel {
    pub fn from_config(config: &PanelConfig, items: Vec<StaticItem>) -> Result<Self, LayoutError> {
        Ok(match config {
            PanelConfig::UniformGrid(config) => {
                ScenePanel::Grid(LayoutHost::with_items(UniformGrid::from_config(config), items))
            }
            PanelConfig::Staggered(config) => {
                ScenePanel::Wall(LayoutHost::with_items(StaggeredPanel::from_config(config)?, items))
            }
        })
    }

    pub fn layout(&mut self, available: Size<f32>) -> LayoutPass {
        match self {
            ScenePanel::Grid(host) => host.layout(available),
            ScenePanel::Wall(host) => host.layout(available),
        }
    }
}

/// One square tile per day of the month.
pub fn month_items(days: usize) -> Vec<StaticItem> {
    (0..days).map(|_| StaticItem::new(48.0, 48.0)).collect()
}

pub fn month_host(first_weekday: usize, days: usize) -> LayoutHost<UniformGrid, StaticItem> {
    LayoutHost::with_items(LayoutPatterns::calendar_month(first_weekday), month_items(days))
}

/// Dashboard: a pinned 2x2 chart with small widgets flowing around it.
pub fn dashboard_host(widgets: usize) -> LayoutHost<UniformGrid, StaticItem> {
    let mut items = vec![StaticItem::new(320.0, 240.0).with_grid(GridAttachment::new().at(0, 1).span(2, 2))];
    items.extend((0..widgets).map(|_| StaticItem::new(120.0, 90.0)));
    LayoutHost::with_items(UniformGrid::new().with_columns(4), items)
}

/// Photos of assorted aspect ratios, scaled into their column.
pub fn photo_items() -> Vec<StaticItem> {
    const SHAPES: [(f32, f32); 6] = [
        (400.0, 300.0),
        (300.0, 450.0),
        (250.0, 250.0),
        (600.0, 200.0),
        (200.0, 320.0),
        (500.0, 500.0),
    ];

    SHAPES
        .iter()
        .cycle()
        .take(12)
        .map(|&(width, height)| StaticItem::new(width, height).with_sizing(Sizing::FitWidth))
        .collect()
}

pub fn photo_wall_host(column_width: f32) -> Result<LayoutHost<StaggeredPanel, StaticItem>, LayoutError> {
    Ok(LayoutHost::with_items(LayoutPatterns::photo_wall(column_width)?, photo_items()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_scene_has_no_unplaced_days() {
        let mut host = month_host(5, 31);
        let pass = host.layout(Size { width: 700.0, height: 600.0 });
        assert_eq!(pass.arrangement.placed_count(), 31);
        assert!(!pass.report.is_degraded());
        assert_eq!(host.panel().dimensions().rows, 6);
    }

    #[test]
    fn test_dashboard_flows_around_chart() {
        let mut host = dashboard_host(6);
        let pass = host.layout(Size { width: 400.0, height: 300.0 });
        assert_eq!(host.panel().dimensions().rows, 3);
        let first_widget = pass.arrangement.bounds[1].unwrap();
        assert_eq!((first_widget.x, first_widget.y), (0.0, 0.0));
        let second_widget = pass.arrangement.bounds[2].unwrap();
        assert_eq!((second_widget.x, second_widget.y), (300.0, 0.0));
    }

    #[test]
    fn test_photo_wall_fits_columns() {
        let mut host = photo_wall_host(200.0).unwrap();
        let pass = host.layout(Size { width: 800.0, height: f32::INFINITY });
        assert_eq!(pass.arrangement.placed_count(), 12);
        assert!(pass.arrangement.placed().all(|(_, bounds)| bounds.width <= 200.0));
    }

    #[test]
    fn test_scene_from_config() {
        let config = PanelConfig::from_toml_str("kind = \"staggered\"\ndesired_column_width = 150.0\n").unwrap();
        let mut scene = ScenePanel::from_config(&config, photo_items()).unwrap();
        let pass = scene.layout(Size { width: 600.0, height: f32::INFINITY });
        assert_eq!(pass.arrangement.placed_count(), 12);
    }
}
