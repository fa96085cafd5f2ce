//! End-to-end scenarios through the public panel and host API.

use gui_layout::{
    AutoLayout, AvailableSpace, Bounds, Degradation, FlowDirection, GridAttachment, GridDimensions, LayoutHost,
    LayoutItem, Panel, PanelConfig, Size, Sizing, StaggeredPanel, StaticItem, UniformGrid,
};
use taffy::prelude::TaffyMaxContent;

fn tiles(count: usize) -> Vec<StaticItem> {
    (0..count).map(|_| StaticItem::new(40.0, 40.0)).collect()
}

fn definite(width: f32, height: f32) -> Size<AvailableSpace> {
    Size {
        width: AvailableSpace::Definite(width),
        height: AvailableSpace::Definite(height),
    }
}

fn run<P: Panel>(panel: &mut P, items: &mut [StaticItem], width: f32, height: f32) -> Vec<Option<Bounds>> {
    panel.measure(items, definite(width, height));
    panel.arrange(items, Size { width, height }).bounds
}

#[test]
fn nine_items_in_three_columns_make_three_rows() {
    let mut grid = UniformGrid::new().with_columns(3);
    run(&mut grid, &mut tiles(9), 300.0, 300.0);
    assert_eq!(grid.dimensions(), GridDimensions::new(3, 3));

    run(&mut grid, &mut tiles(10), 300.0, 400.0);
    assert_eq!(grid.dimensions(), GridDimensions::new(4, 3));
}

#[test]
fn seven_items_with_no_counts_make_a_square() {
    let mut grid = UniformGrid::new();
    run(&mut grid, &mut tiles(7), 300.0, 300.0);
    assert_eq!(grid.dimensions(), GridDimensions::new(3, 3));
    assert_eq!(grid.row_definitions().generated_count(), 3);
    assert_eq!(grid.column_definitions().generated_count(), 3);
}

#[test]
fn manual_span_reserves_its_cells() {
    let mut grid = UniformGrid::new().with_rows(3).with_columns(3);
    let mut items = vec![StaticItem::new(10.0, 10.0).with_grid(GridAttachment::new().at(1, 1).span(2, 2))];
    items.extend(tiles(5));

    let bounds = run(&mut grid, &mut items, 300.0, 300.0);
    assert_eq!(bounds[0], Some(Bounds::new(100.0, 100.0, 200.0, 200.0)));

    let auto_origins: Vec<(f32, f32)> = bounds[1..].iter().map(|b| b.map(|b| (b.x, b.y)).unwrap()).collect();
    assert_eq!(
        auto_origins,
        vec![(0.0, 0.0), (100.0, 0.0), (200.0, 0.0), (0.0, 100.0), (0.0, 200.0)]
    );
    assert!(!grid.report().is_degraded());
}

#[test]
fn exhausted_slots_are_reported() {
    let mut grid = UniformGrid::new().with_rows(2).with_columns(2);
    let mut items = tiles(6);
    let bounds = run(&mut grid, &mut items, 200.0, 200.0);

    assert_eq!(bounds.iter().filter(|b| b.is_some()).count(), 4);
    assert_eq!(grid.report().unplaced, vec![4, 5]);
    assert_eq!(
        grid.report().degradation,
        Some(Degradation::SlotsExhausted { requested: 6, free: 4 })
    );
    assert_eq!(items[5].arranged(), None);
}

#[test]
fn collapsed_items_take_no_cell() {
    let mut grid = UniformGrid::new().with_columns(2);
    let mut items = tiles(3);
    items[0].set_visible(false);

    let bounds = run(&mut grid, &mut items, 200.0, 100.0);
    assert_eq!(grid.dimensions(), GridDimensions::new(1, 2));
    assert_eq!(bounds[0], None);
    assert_eq!(bounds[1], Some(Bounds::new(0.0, 0.0, 100.0, 100.0)));
}

#[test]
fn flagged_item_at_origin_is_auto_placed() {
    let mut grid = UniformGrid::new().with_rows(1).with_columns(3);
    let mut items = vec![
        StaticItem::new(10.0, 10.0).with_grid(GridAttachment::new().at(0, 0)),
        StaticItem::new(10.0, 10.0).with_grid(GridAttachment::new().at(0, 0).auto_layout(AutoLayout::Enabled)),
    ];
    let bounds = run(&mut grid, &mut items, 300.0, 100.0);
    assert_eq!(bounds[0], Some(Bounds::new(0.0, 0.0, 100.0, 100.0)));
    assert_eq!(bounds[1], Some(Bounds::new(100.0, 0.0, 100.0, 100.0)));
}

#[test]
fn right_to_left_grid_fills_from_the_right() {
    let mut grid = UniformGrid::new()
        .with_columns(4)
        .with_flow_direction(FlowDirection::RightToLeft);
    let bounds = run(&mut grid, &mut tiles(5), 400.0, 200.0);
    let xs: Vec<f32> = bounds.iter().map(|b| b.unwrap().x).collect();
    assert_eq!(xs, vec![300.0, 200.0, 100.0, 0.0, 300.0]);
}

#[test]
fn grid_desired_size_is_largest_cell_times_dimensions() {
    let mut grid = UniformGrid::new().with_columns(2);
    let mut items = vec![
        StaticItem::new(30.0, 10.0),
        StaticItem::new(50.0, 20.0),
        StaticItem::new(10.0, 45.0),
    ];
    let desired = grid.measure(&mut items, Size::MAX_CONTENT);
    assert_eq!(desired, Size { width: 100.0, height: 90.0 });
}

#[test]
fn masonry_fills_columns_in_order_then_shortest() {
    let mut panel = StaggeredPanel::new().with_desired_column_width(100.0).unwrap();
    let mut items = vec![
        StaticItem::new(100.0, 120.0),
        StaticItem::new(100.0, 60.0),
        StaticItem::new(100.0, 90.0),
        StaticItem::new(100.0, 30.0),
    ];
    let bounds = run(&mut panel, &mut items, 300.0, 1000.0);
    let columns: Vec<f32> = bounds.iter().map(|b| b.unwrap().x).collect();
    assert_eq!(columns, vec![0.0, 100.0, 200.0, 100.0]);
    assert_eq!(bounds[3].unwrap().y, 60.0);
}

#[test]
fn masonry_scales_wide_items() {
    let mut panel = StaggeredPanel::new();
    let mut items = vec![StaticItem::new(400.0, 200.0).with_sizing(Sizing::Natural)];
    let bounds = run(&mut panel, &mut items, 500.0, 1000.0);
    assert_eq!(bounds[0], Some(Bounds::new(0.0, 0.0, 250.0, 125.0)));
    assert_eq!(items[0].desired_size(), Size { width: 400.0, height: 200.0 });
}

#[test]
fn host_relayout_is_idempotent_for_both_panels() {
    let mut grid_host = LayoutHost::with_items(UniformGrid::new(), tiles(7));
    let first = grid_host.layout(Size { width: 300.0, height: 300.0 });
    let second = grid_host.layout(Size { width: 300.0, height: 300.0 });
    assert_eq!(first.arrangement, second.arrangement);
    assert!(second.dirty_regions.is_empty());

    let mut wall = LayoutHost::with_items(StaggeredPanel::new(), tiles(7));
    let first = wall.layout(Size { width: 800.0, height: f32::INFINITY });
    let second = wall.layout(Size { width: 800.0, height: f32::INFINITY });
    assert_eq!(first.arrangement, second.arrangement);
    assert!(second.dirty_regions.is_empty());
    assert_eq!(wall.cache_stats().unchanged_updates, 0);
}

#[test]
fn panels_build_from_toml() {
    let grid = match PanelConfig::from_toml_str("kind = \"uniform_grid\"\ncolumns = 7\nfirst_column = 2\n").unwrap() {
        PanelConfig::UniformGrid(config) => UniformGrid::from_config(&config),
        other => panic!("unexpected config {:?}", other),
    };
    assert_eq!(grid.config().columns, 7);

    let wall = match PanelConfig::from_toml_str("kind = \"staggered\"\ndesired_column_width = 120.0\n").unwrap() {
        PanelConfig::Staggered(config) => StaggeredPanel::from_config(&config).unwrap(),
        other => panic!("unexpected config {:?}", other),
    };
    assert_eq!(wall.desired_column_width(), 120.0);
}
