use rand::{rngs::StdRng, SeedableRng};

use wrapsnake::state::{INITIAL_MOVE_TIMER_OFFSET, MOVE_TIMER_MAX};
use wrapsnake::view::Hud;
use wrapsnake::{Config, Coords, Direction, GameState, Snake, TickStatus};

fn config() -> Config {
    Config { width: 120, height: 120, cell_size: 10, ..Config::default() }
}

fn game(body: &[Coords], direction: Direction, food: Coords) -> GameState {
    let snake = Snake::from_body(body.to_vec(), direction).unwrap();
    GameState::from_parts(&config(), snake, food, StdRng::seed_from_u64(42)).unwrap()
}

/// Ticks one offset at a time until the snake takes a step.
fn tick_until_step(game: &mut GameState) -> TickStatus {
    let before = game.snake().body().to_vec();
    loop {
        let status = game.tick(game.move_timer_offset());
        if status != TickStatus::Continue || game.snake().body()[..before.len()] != before[..] {
            return status;
        }
    }
}

#[test]
fn three_segment_snake_eats_food_below_it() {
    let mut game = game(&[(60, 60), (60, 50), (60, 40)], Direction::Down, (60, 70));
    let pool_before = game.free_cells().len();

    assert_eq!(tick_until_step(&mut game), TickStatus::Continue);
    assert_eq!(game.snake().body(), &[(60, 70), (60, 60), (60, 50)]);

    assert_eq!(game.tick(0.0), TickStatus::AteFood);
    assert_eq!(game.snake().len(), 4);
    assert_eq!(game.snake().tail(), (60, 50));
    assert_eq!(game.move_timer_offset(), INITIAL_MOVE_TIMER_OFFSET);
    assert_eq!(game.free_cells().len(), pool_before - 1);
    assert_ne!(game.food(), Some((60, 70)));
}

#[test]
fn five_segment_snake_with_head_on_index_two_collides() {
    let body = [(50, 50), (50, 60), (50, 50), (40, 50), (30, 50)];
    let mut game = game(&body, Direction::Up, (0, 0));

    assert_eq!(game.tick(0.0), TickStatus::Collided);
}

#[test]
fn turning_into_the_second_to_last_segment_collides() {
    let body = [(50, 50), (50, 60), (40, 60), (40, 50), (30, 50), (20, 50)];
    let mut game = game(&body, Direction::Up, (0, 0));

    game.apply_direction(Direction::Left);
    assert_eq!(tick_until_step(&mut game), TickStatus::Continue);
    assert_eq!(game.snake().head(), (40, 50));
    assert_eq!(game.snake().body()[4], (40, 50));

    assert_eq!(game.tick(0.0), TickStatus::Collided);
}

#[test]
fn turning_into_the_last_segment_is_forgiven() {
    let body = [(50, 50), (50, 60), (40, 60), (40, 50), (30, 50)];
    let mut game = game(&body, Direction::Up, (0, 0));

    game.apply_direction(Direction::Left);
    tick_until_step(&mut game);
    assert_eq!(game.snake().head(), game.snake().tail());

    assert_eq!(game.tick(0.0), TickStatus::Continue);
}

#[test]
fn snake_wraps_through_every_wall() {
    let cases = [
        ((0, 60), Direction::Left, (110, 60)),
        ((110, 60), Direction::Right, (0, 60)),
        ((60, 0), Direction::Up, (60, 110)),
        ((60, 110), Direction::Down, (60, 0)),
    ];

    for (start, direction, expected) in cases {
        let mut game = game(&[start], direction, (0, 0));
        tick_until_step(&mut game);
        assert_eq!(game.snake().head(), expected, "leaving {:?} heading {:?}", start, direction);
    }
}

#[test]
fn reversal_never_takes_effect_before_a_step() {
    let mut game = game(&[(60, 60), (50, 60), (40, 60)], Direction::Right, (0, 0));

    for _ in 0..3 {
        game.apply_direction(Direction::Left);
        game.tick(10.0);
        assert_eq!(game.snake().next_direction(), Direction::Right);
    }

    game.tick(MOVE_TIMER_MAX);
    assert_eq!(game.snake().head(), (70, 60));
}

#[test]
fn a_seeded_game_is_reproducible() {
    let config = Config { seed: Some(99), ..config() };
    let a = GameState::new(&config, config.rng()).unwrap();
    let b = GameState::new(&config, config.rng()).unwrap();

    assert_eq!(a.snake().head(), b.snake().head());
    assert_eq!(a.food(), b.food());
}

#[test]
fn hud_tracks_growth() {
    let mut game = game(&[(60, 60)], Direction::Down, (60, 60));
    assert_eq!(game.tick(0.0), TickStatus::AteFood);

    let hud = Hud::project(&game);
    assert_eq!(hud.score, 2);
    assert_eq!(hud.space_left, 142);
    assert!(!hud.speed_max);
}
