use super::*;
use crate::io;

fn small_universe() -> Universe {
    Universe::new(&UniverseConfig {
        grid_size: 4,
        depth: 2,
    })
    .unwrap()
}

fn set_cells(universe: &mut Universe, cells: &[(usize, usize)]) {
    for &(row, column) in cells {
        universe.set_alive(row, column, true);
    }
}

fn live_cells(universe: &Universe) -> Vec<(i64, i64)> {
    universe
        .store()
        .iter()
        .map(|pos| (pos.row, pos.column))
        .collect()
}

#[test]
fn test_universe_shape() {
    let universe = Universe::default();
    assert_eq!(64, universe.width_in_cells());
    assert_eq!(0, universe.generation());
    assert_eq!(0, universe.population());

    let universe = small_universe();
    assert_eq!(16, universe.width_in_cells());
    assert!(universe.root().is_stable());

    assert_eq!(
        ConfigError::ZeroDepth,
        Universe::new(&UniverseConfig {
            grid_size: 3,
            depth: 0,
        })
        .unwrap_err(),
    );
}

#[test]
fn test_universe_blinker() {
    let mut universe = small_universe();
    // Straddles the boundary between the top two children.
    set_cells(&mut universe, &[(1, 3), (1, 4), (1, 5)]);

    assert!(universe.step());
    assert_eq!(vec![(0, 4), (1, 4), (2, 4)], live_cells(&universe));
    assert!(universe.step());
    assert_eq!(vec![(1, 3), (1, 4), (1, 5)], live_cells(&universe));
    assert_eq!(2, universe.generation());
    assert!(universe.has_passed(0, 4));
    assert!(!universe.has_passed(5, 5));
}

#[test]
fn test_universe_block_is_stable() {
    let mut universe = small_universe();
    set_cells(&mut universe, &[(7, 7), (7, 8), (8, 7), (8, 8)]);
    let before = universe.store();
    assert!(!universe.step());
    assert_eq!(before, universe.store());
    // `run()` stops as soon as nothing changes.
    assert_eq!(1, universe.run(100));
    assert_eq!(2, universe.generation());
    assert_eq!(before, universe.store());
}

#[test]
fn test_universe_glider() {
    let mut universe = small_universe();
    set_cells(&mut universe, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
    let start = universe.store();

    // A glider moves one cell diagonally every four generations.
    assert_eq!(8, universe.run(8));
    assert_eq!(5, universe.population());
    assert_eq!(start.translated(Pos::new(2, 2)), universe.store());

    // Eventually it crashes into the edge and becomes a block.
    universe.run(100);
    assert_eq!(
        vec![(14, 14), (14, 15), (15, 14), (15, 15)],
        live_cells(&universe),
    );
}

#[test]
fn test_universe_edit() {
    let mut universe = small_universe();
    assert!(universe.set_alive(3, 12, true));
    assert!(!universe.set_alive(3, 12, true));
    assert!(universe.is_alive(3, 12));
    assert!(universe.resident(3, 12).is_alive());

    universe.reverse(3, 12);
    assert!(!universe.is_alive(3, 12));
    universe.reverse(0, 0);
    assert!(universe.is_alive(0, 0));
    assert_eq!(1, universe.population());

    // A lone cell dies, and that's a change.
    assert!(universe.step());
    assert_eq!(0, universe.population());
    assert!(universe.has_passed(0, 0));
}

#[test]
#[should_panic]
fn test_universe_out_of_bounds() {
    small_universe().set_alive(16, 0, true);
}

#[test]
fn test_universe_clear() {
    let mut universe = small_universe();
    set_cells(&mut universe, &[(4, 4), (4, 5), (4, 6)]);
    universe.run(3);
    universe.clear();
    assert_eq!(0, universe.generation());
    assert_eq!(0, universe.population());
    assert!(!universe.has_passed(4, 5));
    assert!(!universe.step());
}

#[test]
fn test_universe_memento() {
    let mut universe = small_universe();
    set_cells(&mut universe, &[(0, 0), (5, 9), (15, 15), (8, 3)]);
    let memento = universe.store();
    assert_eq!(4, memento.len());

    universe.clear();
    assert_eq!(0, universe.population());
    universe.load(&memento);
    assert_eq!(memento, universe.store());

    // Loading replaces everything, and ignores cells outside the universe.
    let mut other = Memento::new();
    other.mark_as_alive(Pos::new(2, 2));
    other.mark_as_alive(Pos::new(-1, 2));
    other.mark_as_alive(Pos::new(2, 16));
    universe.load(&other);
    assert_eq!(vec![(2, 2)], live_cells(&universe));
}

#[test]
fn test_universe_load_then_step() {
    let mut universe = small_universe();
    let memento = io::import_memento_from_string("x = 3, y = 1\n3o!").unwrap();
    universe.load(&memento.translated(Pos::new(6, 6)));
    assert!(universe.step());
    assert_eq!(vec![(5, 7), (6, 7), (7, 7)], live_cells(&universe));
}

#[test]
fn test_universe_to_grid() {
    let mut universe = Universe::new(&UniverseConfig {
        grid_size: 2,
        depth: 2,
    })
    .unwrap();
    set_cells(&mut universe, &[(0, 3), (2, 1)]);
    assert_eq!(
        vec![
            vec![false, false, false, true],
            vec![false, false, false, false],
            vec![false, true, false, false],
            vec![false, false, false, false],
        ],
        universe.to_grid(),
    );
}

#[test]
fn test_universe_population_skips_empty() {
    let mut universe = small_universe();
    set_cells(&mut universe, &[(0, 0), (15, 15)]);

    let mut visited = 0;
    universe.accept(&mut |_: &Resident| visited += 1);
    assert_eq!(16 * 16, visited);
    assert_eq!(2, universe.population());
}
