use cellular_automata::automaton::{
    parse_plaintext, wrap, Engine, GenerationsRule, Grid, LifeRule, Rule, State, TransitionRule, WolframRule,
};
use cellular_automata::config::{Boundary, RulePreset};
use cellular_automata::render::PixelSurface;
use cellular_automata::{build_session, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn alive_cells(grid: &Grid, alive: State) -> HashSet<(usize, usize)> {
    (0..grid.height())
        .flat_map(|row| (0..grid.width()).map(move |col| (row, col)))
        .filter(|&(row, col)| grid.get(row, col) == alive)
        .collect()
}

#[test]
fn test_toroidal_neighbors_are_distinct() {
    for radius in 1..=2 {
        let grid = Grid::new(7, 6, Boundary::Toroidal).unwrap().with_radius(radius).unwrap();
        let expected = (2 * radius + 1).pow(2) - 1;

        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let neighbors = grid.neighbors(row, col);
                let distinct: HashSet<_> = neighbors.iter().copied().collect();
                assert_eq!(neighbors.len(), expected);
                assert_eq!(distinct.len(), expected);
                assert!(neighbors
                    .iter()
                    .all(|&(r, c)| grid.in_bounds(r as isize, c as isize)));
            }
        }
    }
}

#[test]
fn test_set_cell_wraps_any_coordinate() {
    let mut grid = Grid::new(5, 3, Boundary::Toroidal).unwrap();
    for (row, col) in [(-1, -1), (3, 5), (-7, 12), (301, -999)] {
        grid.set_cell(row, col, 4);
        let (r, c) = (wrap(row, 3), wrap(col, 5));
        assert_eq!(wrap(r as isize, 3), r);
        assert_eq!(wrap(c as isize, 5), c);
        assert_eq!(grid.get(r, c), 4);
        grid.set_cell(row, col, 0);
    }
    assert_eq!(grid.population(), 0);
}

#[test]
fn test_identical_engines_stay_identical() {
    init_logging();
    let mut grid = Grid::new(24, 16, Boundary::Toroidal).unwrap();
    grid.randomize_with(&[0.7, 0.0, 0.3], &mut StdRng::seed_from_u64(5))
        .unwrap();

    let mut a = Engine::new(grid.clone(), Rule::from(LifeRule::game_of_life()));
    let mut b = Engine::new(grid, Rule::from(LifeRule::game_of_life()));
    for _ in 0..10 {
        assert_eq!(a.step(), b.step());
    }
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.generation(), 10);
}

#[test]
fn test_empty_life_grid_stays_empty() {
    for rule in [LifeRule::game_of_life(), LifeRule::coral(), LifeRule::gnarl()] {
        let grid = Grid::new(12, 9, Boundary::Clamped).unwrap();
        let mut engine = Engine::new(grid, rule);
        for _ in 0..5 {
            assert!(engine.step().is_empty());
        }
        assert_eq!(engine.grid().population(), 0);
    }
}

#[test]
fn test_generations_oldest_state_dies() {
    let rule = GenerationsRule::new(vec![2], vec![3, 4], 4).unwrap();
    let mut grid = Grid::new(5, 5, Boundary::Toroidal).unwrap();
    grid.fill(GenerationsRule::ALIVE);
    grid.set_cell(2, 2, rule.max_state());

    let mut engine = Engine::new(grid, rule);
    engine.step();
    assert_eq!(engine.grid().get(2, 2), 0);
}

#[test]
fn test_wolfram_rule_zero_kills_every_row() {
    let rule = WolframRule::new(0);
    assert!((0..8).all(|label| rule.lookup(label) == 0));

    let mut grid = Grid::new(9, 4, Boundary::Clamped).unwrap();
    let seed_row: [State; 9] = [1, 0, 1, 1, 0, 1, 0, 0, 1];
    grid.stamp(0, 0, &[seed_row]);
    let mut engine = Engine::new(grid, rule);
    engine.step_n(3);

    assert_eq!(engine.grid().to_rows()[0], seed_row.to_vec());
    assert!(engine.grid().to_rows()[1..].iter().flatten().all(|&cell| cell == 0));
}

#[test]
fn test_blinker_on_three_by_three_torus() {
    let mut grid = Grid::new(3, 3, Boundary::Toroidal).unwrap();
    grid.fill_rectangle(1, 0, 3, 1, LifeRule::ALIVE);

    let mut engine = Engine::new(grid, LifeRule::game_of_life());
    let changes = engine.step();

    // Every cell sees all eight others, so the row survives and the rest are born
    assert_eq!(changes.len(), 6);
    assert!(engine.grid().cells().iter().all(|&cell| cell == LifeRule::ALIVE));
}

#[test]
fn test_glider_translates() {
    let glider = parse_plaintext("!Name: Glider\n.O.\n..O\nOOO\n").unwrap();
    let mut grid = Grid::new(8, 8, Boundary::Toroidal).unwrap();
    grid.stamp(1, 1, &glider);
    let before = alive_cells(&grid, LifeRule::ALIVE);

    let mut engine = Engine::new(grid, LifeRule::game_of_life());
    engine.step_n(4);

    let shifted: HashSet<_> = before.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
    assert_eq!(alive_cells(engine.grid(), LifeRule::ALIVE), shifted);
}

#[test]
fn test_single_entry_distribution_gives_zeros() {
    for (width, height) in [(1, 1), (13, 7), (64, 32)] {
        let mut grid = Grid::new(width, height, Boundary::Clamped).unwrap();
        grid.fill(3);
        grid.randomize(&[1.0]).unwrap();
        assert_eq!(grid.population(), 0);
    }
}

#[test]
fn test_zero_size_rectangle_is_noop() {
    let mut grid = Grid::new(6, 6, Boundary::Toroidal).unwrap();
    grid.randomize_with(&[0.5, 0.5], &mut StdRng::seed_from_u64(1))
        .unwrap();
    let before = grid.clone();

    grid.fill_rectangle(2, 2, 0, 0, 9);
    grid.fill_rectangle(-3, 4, 0, 5, 9);
    grid.fill_rectangle(1, -8, 5, 0, 9);
    assert_eq!(grid, before);
}

#[test]
fn test_session_from_yaml_file() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rug.yaml");
    std::fs::write(
        &path,
        "grid:\n  width: 60\n  height: 60\nrule:\n  preset: rug\ndriver:\n  tick_interval_ms: 1\n  max_ticks: 2\nseed: 3\n",
    )
    .unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.rule, RulePreset::Rug { grayscale: false });

    let mut session = build_session(&settings).unwrap();
    assert_eq!(session.name, "rug");
    assert_eq!(session.engine.grid().population(), 50 * 50);

    let mut surface = PixelSurface::new(120, 120, 2).unwrap();
    let report = session.run(&mut surface).unwrap();
    assert_eq!(report.steps, 2);
    assert_eq!(session.engine.generation(), 2);
}

#[test]
fn test_session_round_trips_through_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("wolfram.json");

    let mut settings = Settings::default();
    settings.rule = RulePreset::Wolfram { rule_number: 30 };
    settings.to_file(&path).unwrap();

    let loaded = Settings::from_file(&path).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(build_session(&loaded).unwrap().name, "wolfram_30");
}
