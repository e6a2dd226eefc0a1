use life_core::{CellState, Grid, GridError};
use life_system_seeding::{parse_grid, random_grid, seeded_grid, TextFormat};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn random_grid_has_requested_dimensions() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let grid = random_grid(4, 9, &mut rng);

    assert_eq!(grid.height(), 4, "rows map to height");
    assert_eq!(grid.width(), 9, "columns map to width");
}

#[test]
fn random_grid_with_zero_rows_is_empty() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    assert_eq!(random_grid(0, 9, &mut rng), Grid::empty());
}

#[test]
fn seeded_grid_is_reproducible() {
    assert_eq!(seeded_grid(16, 16, 42), seeded_grid(16, 16, 42));
    assert_ne!(
        seeded_grid(16, 16, 42),
        seeded_grid(16, 16, 43),
        "different seeds should produce different soups"
    );
}

#[test]
fn random_fill_is_roughly_balanced() {
    let grid = seeded_grid(100, 100, 0x5eed);
    let population = grid.population();

    assert!(
        (4_000..=6_000).contains(&population),
        "expected about half of 10000 cells alive, found {population}"
    );
}

#[test]
fn unknown_characters_read_as_dead() {
    let grid = parse_grid("@x.\n?@!", '@', '.').expect("rectangular");

    assert_eq!(grid.row(0), Some(&[CellState::Alive, CellState::Dead, CellState::Dead][..]));
    assert_eq!(grid.row(1), Some(&[CellState::Dead, CellState::Alive, CellState::Dead][..]));
}

#[test]
fn ragged_text_is_rejected() {
    let error = parse_grid("@@@\n@@\n", '@', '.').expect_err("ragged text must fail");

    assert_eq!(
        error,
        GridError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn blank_text_parses_to_empty_grid() {
    assert_eq!(parse_grid("", '@', '.'), Ok(Grid::empty()));
    assert_eq!(parse_grid("\n\n", '@', '.'), Ok(Grid::empty()));
}

#[test]
fn text_round_trip_is_stable() {
    let format = TextFormat::default();

    for seed in 0..8 {
        let grid = seeded_grid(5 + seed as usize, 7, seed);
        let text = format.render(&grid);
        let reparsed = format.parse(&text).expect("rendered text is rectangular");

        assert_eq!(format.render(&reparsed), text);
        assert_eq!(reparsed, grid);
    }
}

#[test]
fn custom_characters_round_trip() {
    let format = TextFormat::new('O', '-');
    let text = "-O-\n--O\nOOO";

    let grid = format.parse(text).expect("rectangular");
    assert_eq!(grid.population(), 5);
    assert_eq!(format.render(&grid), text);
}
