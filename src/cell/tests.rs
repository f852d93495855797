use proptest::prelude::*;

use super::*;

/// Returns eight residents, the first `live` of which are alive.
fn residents_with_live_count(live: usize) -> Vec<Cell> {
    (0..8)
        .map(|i| {
            let mut cell = Cell::resident();
            cell.set_alive_at(0, 0, i < live);
            cell
        })
        .collect()
}

fn neighbors_of(cells: &[Cell]) -> Neighbors<'_> {
    Neighbors {
        north: &cells[0],
        south: &cells[1],
        east: &cells[2],
        west: &cells[3],
        northeast: &cells[4],
        northwest: &cells[5],
        southeast: &cells[6],
        southwest: &cells[7],
    }
}

/// Simulates one generation of Life on a flat grid surrounded by dead
/// cells.
fn naive_step(grid: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let width = grid.len() as isize;
    let is_alive = |row: isize, column: isize| {
        (0..width).contains(&row)
            && (0..width).contains(&column)
            && grid[row as usize][column as usize]
    };
    (0..width)
        .map(|row| {
            (0..width)
                .map(|column| {
                    let live = itertools::iproduct!(-1..=1, -1..=1)
                        .filter(|&(dr, dc)| (dr, dc) != (0, 0))
                        .filter(|&(dr, dc)| is_alive(row + dr, column + dc))
                        .count();
                    live == 3 || (is_alive(row, column) && live == 2)
                })
                .collect()
        })
        .collect()
}

fn grid_of(cell: &Cell) -> Vec<Vec<bool>> {
    let width = cell.width_in_cells();
    (0..width)
        .map(|row| {
            (0..width)
                .map(|column| cell.resident_at(row, column).is_alive())
                .collect()
        })
        .collect()
}

#[test]
fn test_resident_rule() {
    for live in 0..=8 {
        for &alive in &[false, true] {
            let others = residents_with_live_count(live);
            let mut resident = Resident::default();
            resident.set_alive(alive);
            let unstable = resident.figure_next_state(&neighbors_of(&others));

            let expected = live == 3 || (alive && live == 2);
            assert_eq!(expected, resident.will_be_alive(), "{} live neighbors", live);
            assert_eq!(expected != alive, unstable);
            assert_eq!(!unstable, resident.is_stable());
            assert_eq!(unstable, resident.transition());
            assert_eq!(expected, resident.is_alive());
        }
    }
}

#[test]
fn test_resident_birth_and_death() {
    // Dead with exactly three live neighbors.
    let others = residents_with_live_count(3);
    let mut resident = Resident::default();
    assert!(resident.figure_next_state(&neighbors_of(&others)));
    assert_eq!(Direction::ALL, resident.is_disruptive_to());
    assert!(resident.transition());
    assert!(resident.is_alive());
    assert!(!resident.has_passed());

    // Dead with only two stays dead.
    let others = residents_with_live_count(2);
    let mut resident = Resident::default();
    assert!(!resident.figure_next_state(&neighbors_of(&others)));
    assert_eq!(Direction::NONE, resident.is_disruptive_to());
    assert!(!resident.transition());
    assert!(!resident.is_alive());

    // Overcrowded.
    let others = residents_with_live_count(4);
    let mut resident = Resident::default();
    resident.set_alive(true);
    resident.figure_next_state(&neighbors_of(&others));
    assert!(!resident.will_be_alive());
    assert!(resident.transition());
    assert!(!resident.is_alive());
    assert!(resident.has_passed());
}

#[test]
fn test_resident_has_passed() {
    let mut resident = Resident::default();
    resident.set_alive(true);
    assert!(!resident.has_passed());

    let lonely = residents_with_live_count(0);
    resident.figure_next_state(&neighbors_of(&lonely));
    resident.transition();
    assert!(resident.has_passed());

    // Staying dead never forgets.
    for _ in 0..3 {
        resident.figure_next_state(&neighbors_of(&lonely));
        assert!(!resident.transition());
        assert!(resident.has_passed());
    }

    resident.clear();
    assert!(!resident.has_passed());
    assert!(!resident.is_alive());
}

#[test]
fn test_resident_transition_idempotent() {
    let others = residents_with_live_count(3);
    let mut resident = Resident::default();
    resident.figure_next_state(&neighbors_of(&others));
    assert!(resident.transition());
    assert!(!resident.transition());
    assert!(resident.is_alive());
    assert!(resident.is_stable());
}

#[test]
fn test_resident_reverse() {
    let mut resident = Resident::default();
    resident.reverse();
    assert!(resident.is_alive());
    resident.reverse();
    assert!(!resident.is_alive());
    assert!(resident.set_alive(true));
    assert!(!resident.set_alive(true));
}

#[test]
fn test_resident_edge() {
    let cell = Cell::resident();
    assert!(std::ptr::eq(&cell, cell.edge(0, 0)));
    assert_eq!(1, cell.width_in_cells());
}

#[test]
#[should_panic]
fn test_resident_edge_out_of_bounds() {
    Cell::resident().edge(0, 1);
}

#[test]
fn test_resident_memento() {
    let resident = Resident::default();
    assert_eq!(
        Err(CellError::UnsupportedOperation(
            "may not create memento of a unitary cell"
        )),
        resident.create_memento(),
    );

    let mut memento = Memento::new();
    let mut cell = Cell::resident();
    cell.set_alive_at(0, 0, true);
    assert!(cell.transfer(&mut memento, Pos::new(3, 4), Transfer::Store));
    assert!(memento.is_alive(Pos::new(3, 4)));

    let mut other = Cell::resident();
    assert!(other.transfer(&mut memento, Pos::new(3, 4), Transfer::Load));
    assert!(other.is_alive());
    assert!(other.is_stable());
    assert!(!other.transfer(&mut memento, Pos::new(0, 0), Transfer::Load));
    assert!(!other.is_alive());
}

#[test]
fn test_dummy() {
    let mut dummy = Cell::dummy();
    assert!(dummy.is_dummy());
    assert!(!dummy.is_alive());
    assert!(dummy.is_stable());
    assert!(!dummy.transition());
    assert_eq!(Direction::NONE, dummy.edges_changed());
    assert_eq!(0, dummy.width_in_cells());
    assert!(dummy.edge(5, 7).is_dummy());
    assert!(dummy.create_memento().is_err());

    let mut memento = Memento::new();
    memento.mark_as_alive(Pos::ORIGIN);
    assert!(!dummy.load(&memento, Pos::ORIGIN));
    assert!(!dummy.is_alive());

    let mut count = 0;
    dummy.accept(&mut |_: &Resident| count += 1);
    assert_eq!(0, count);
}

#[test]
fn test_neighbors_lookup() {
    let others = residents_with_live_count(2);
    let neighbors = neighbors_of(&others);
    assert_eq!(2, neighbors.live_count());
    assert!(std::ptr::eq(neighbors.north, neighbors.at_offset(-1, 0)));
    assert!(std::ptr::eq(neighbors.southwest, neighbors.at_offset(1, -1)));
    assert!(std::ptr::eq(
        neighbors.northeast,
        neighbors.toward(Direction::NORTHEAST)
    ));
    assert_eq!(8, neighbors.iter().count());
    // Residents don't remember which edges changed.
    assert_eq!(Direction::ALL, neighbors.north.edges_changed());
}

#[test]
fn test_neighbors_disrupted_from() {
    let dummy = Cell::dummy();
    let mut changed = Neighborhood::with_depth(3, 1);
    // Bottom-left corner resident of the neighborhood to the northeast.
    changed.set_alive_at(2, 0, true);
    let changed = Cell::Neighborhood(changed);

    let mut neighbors = Neighbors::uniform(&dummy);
    assert_eq!(Direction::NONE, neighbors.disrupted_from());
    neighbors.northeast = &changed;
    assert_eq!(Direction::NORTHEAST, neighbors.disrupted_from());
    // The same change doesn't touch a block to its southeast.
    neighbors.northeast = &dummy;
    neighbors.northwest = &changed;
    assert_eq!(Direction::NONE, neighbors.disrupted_from());
}

#[test]
fn test_visitor() {
    let mut neighborhood = Cell::Neighborhood(Neighborhood::with_depth(2, 2));
    neighborhood.set_alive_at(0, 0, true);
    neighborhood.set_alive_at(3, 2, true);

    #[derive(Default)]
    struct Counter {
        residents: usize,
        live: usize,
        neighborhoods: usize,
    }
    impl CellVisitor for Counter {
        fn visit_resident(&mut self, resident: &Resident) {
            self.residents += 1;
            if resident.is_alive() {
                self.live += 1;
            }
        }
        fn visit_neighborhood(&mut self, neighborhood: &Neighborhood) -> bool {
            self.neighborhoods += 1;
            neighborhood.is_alive()
        }
    }

    let mut counter = Counter::default();
    neighborhood.accept(&mut counter);
    // The root and all four children; only two children are descended.
    assert_eq!(5, counter.neighborhoods);
    assert_eq!(8, counter.residents);
    assert_eq!(2, counter.live);

    // Closures visit every resident.
    let mut order = vec![];
    neighborhood.accept(&mut |resident: &Resident| order.push(resident.is_alive()));
    assert_eq!(16, order.len());
    assert!(order[0]);
    assert_eq!(2, order.iter().filter(|&&alive| alive).count());
}

#[test]
fn test_neighborhood_blinker_across_boundary() {
    let dummy = Cell::dummy();
    let neighbors = Neighbors::uniform(&dummy);
    // A vertical blinker straddling the boundary between two children.
    let mut cell = Cell::Neighborhood(Neighborhood::with_depth(3, 2));
    for &row in &[2, 3, 4] {
        cell.set_alive_at(row, 4, true);
    }
    assert!(cell.figure_next_state(&neighbors));
    assert!(!cell.is_stable());
    assert!(cell.transition());
    for &column in &[3, 4, 5] {
        assert!(cell.resident_at(3, column).is_alive());
    }
    assert!(!cell.resident_at(2, 4).is_alive());
    assert!(cell.resident_at(2, 4).has_passed());

    cell.figure_next_state(&neighbors);
    cell.transition();
    for &row in &[2, 3, 4] {
        assert!(cell.resident_at(row, 4).is_alive());
    }
    assert_eq!(3, cell.create_memento().unwrap().len());
}

proptest! {
    /// Tests that the nested grid, with all of its skipped neighborhoods,
    /// agrees with a naive simulation of the same flat grid, including edits
    /// between generations.
    #[test]
    fn test_neighborhood_matches_naive(
        grid_size in 2_usize..=4,
        depth in 1_usize..=3,
        cells in prop::collection::vec((0_usize..64, 0_usize..64), 0..80),
        edits in prop::collection::vec((0_usize..64, 0_usize..64), 0..4),
        generations in 1_usize..12,
    ) {
        let dummy = Cell::dummy();
        let neighbors = Neighbors::uniform(&dummy);
        let mut cell = Cell::Neighborhood(Neighborhood::with_depth(grid_size, depth));
        let width = cell.width_in_cells();
        for (row, column) in cells {
            cell.set_alive_at(row % width, column % width, true);
        }

        let mut expected = grid_of(&cell);
        for generation in 0..generations {
            let unstable = cell.figure_next_state(&neighbors);
            let changed = cell.transition();
            let next = naive_step(&expected);
            prop_assert_eq!(next != expected, changed);
            prop_assert_eq!(changed, unstable);
            expected = next;
            prop_assert_eq!(&expected, &grid_of(&cell));

            // Edit partway through.
            if generation == generations / 2 {
                for &(row, column) in &edits {
                    let (row, column) = (row % width, column % width);
                    cell.reverse_at(row, column);
                    expected[row][column] = !expected[row][column];
                }
            }
        }
    }

    /// Tests that storing and loading through a memento preserves the grid.
    #[test]
    fn test_neighborhood_memento_round_trip(
        cells in prop::collection::vec((0_usize..16, 0_usize..16), 0..40),
    ) {
        let mut cell = Cell::Neighborhood(Neighborhood::with_depth(4, 2));
        for (row, column) in cells {
            cell.set_alive_at(row, column, true);
        }
        let memento = cell.create_memento().unwrap();
        let mut copy = cell.create();
        prop_assert!(!copy.is_alive());
        prop_assert_eq!(!memento.is_empty(), copy.load(&memento, Pos::ORIGIN));
        prop_assert_eq!(grid_of(&cell), grid_of(&copy));
        prop_assert_eq!(memento, copy.create_memento().unwrap());
    }
}
