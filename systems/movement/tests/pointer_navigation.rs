use dungeon_crawl_core::{CellCoord, Direction, GridPosition, TileId};
use dungeon_crawl_system_movement::PointerNavigator;
use dungeon_crawl_world::TileMap;

const FLOOR: TileId = TileId::new(0);
const WALL: TileId = TileId::new(1);

fn map_from_layout(layout: &[&str]) -> TileMap {
    let rows = layout
        .iter()
        .map(|line| {
            line.chars()
                .map(|glyph| if glyph == '#' { WALL } else { FLOOR })
                .collect()
        })
        .collect();
    TileMap::from_rows(rows, vec![WALL]).expect("valid layout")
}

fn bordered_map() -> TileMap {
    map_from_layout(&[
        "##########",
        "#........#",
        "#........#",
        "#........#",
        "#........#",
        "#........#",
        "#........#",
        "#........#",
        "#........#",
        "##########",
    ])
}

#[test]
fn pointer_guidance_walks_a_straight_row_to_the_target() {
    let map = bordered_map();
    let target = CellCoord::new(7, 2);

    let mut position = GridPosition::new(64.0, 64.0, 32.0);
    let mut navigator = PointerNavigator::new(&position);
    assert_eq!(navigator.vertex(), CellCoord::new(2, 2));

    let mut ticks = 0;
    while !navigator.arrived(target) && ticks < 20 {
        let step = navigator
            .advance(&map, &position, target)
            .expect("endpoints in bounds");
        let (dx, dy) = step.displacement(position.tile_length());
        position = position.translated(dx, dy);
        ticks += 1;
    }

    assert!(navigator.arrived(target));
    assert_eq!(ticks, 6);
    assert_eq!(position.x(), 224.0);
    assert_eq!(position.y(), 64.0);
}

#[test]
fn each_tick_emits_a_single_axis_step() {
    let map = bordered_map();
    let target = CellCoord::new(6, 2);

    let mut position = GridPosition::new(64.0, 64.0, 32.0);
    let mut navigator = PointerNavigator::new(&position);

    for _ in 0..10 {
        if navigator.arrived(target) {
            break;
        }
        let step = navigator
            .advance(&map, &position, target)
            .expect("endpoints in bounds");
        assert!(step.dx().abs() + step.dy().abs() <= 1);
        let (dx, dy) = step.displacement(position.tile_length());
        position = position.translated(dx, dy);
    }

    assert!(navigator.arrived(target));
}

#[test]
fn unreachable_targets_leave_the_entity_in_place() {
    let map = map_from_layout(&[
        "##########",
        "#...#....#",
        "#...#....#",
        "#...#....#",
        "#...#....#",
        "#...#....#",
        "#...#....#",
        "#...#....#",
        "#...#....#",
        "##########",
    ]);
    let target = CellCoord::new(7, 7);

    let mut position = GridPosition::new(64.0, 64.0, 32.0);
    let mut navigator = PointerNavigator::new(&position);

    for _ in 0..5 {
        let step = navigator
            .advance(&map, &position, target)
            .expect("endpoints in bounds");
        assert_eq!(step, Direction::ZERO);
        let (dx, dy) = step.displacement(position.tile_length());
        position = position.translated(dx, dy);
    }

    assert_eq!(position.x(), 64.0);
    assert_eq!(position.y(), 64.0);
    assert_eq!(navigator.vertex(), CellCoord::new(2, 2));
}
