//! Game session: entities, collision, score and round lifecycle

use std::rc::Rc;

use frame_engine::assets::Sprite;
use frame_engine::foundation::math::{ivec2, IVec2};
use frame_engine::foundation::time::Clock;
use frame_engine::platform::ScreenGeometry;
use frame_engine::render::{self, Frame, TextRenderer};
use frame_engine::vision::HandDetection;
use frame_engine::{AppError, Application};
use image::Rgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameplayConfig;
use crate::entities::{Asteroid, Spaceship};

const GAME_OVER_DIM: f32 = 0.4;
const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Score for surviving `elapsed_secs`: the time rounded to hundredths of a
/// second, scaled by `multiplier`, truncated to a whole number
pub fn compute_score(elapsed_secs: f64, multiplier: f64) -> u32 {
    let rounded = (elapsed_secs * 100.0).round() / 100.0;
    (rounded * multiplier) as u32
}

/// One game session.
///
/// Owns the asteroids and the ship exclusively. Time comes from the injected
/// [`Clock`] and randomness from a seedable RNG, so a session is fully
/// deterministic under test.
pub struct GameSession {
    asteroids: Vec<Asteroid>,
    spaceship: Spaceship,
    asteroid_sprite: Rc<Sprite>,
    text: Rc<TextRenderer>,

    score: u32,
    game_over: bool,
    start_time: f64,

    config: GameplayConfig,
    screen: ScreenGeometry,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl GameSession {
    /// Start a session: the timer starts now and the configured number of
    /// asteroids is spawned
    pub fn new(
        config: GameplayConfig,
        screen: ScreenGeometry,
        asteroid_sprite: Rc<Sprite>,
        spaceship_sprite: Rc<Sprite>,
        text: Rc<TextRenderer>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let start_time = clock.now();

        let mut session = Self {
            asteroids: Vec::new(),
            spaceship: Spaceship::new(spaceship_sprite),
            asteroid_sprite,
            text,
            score: 0,
            game_over: false,
            start_time,
            config,
            screen,
            clock,
            rng,
        };
        session.asteroids = session.spawn_asteroids();

        log::info!(
            "Game session started on {}x{} with {} asteroids",
            screen.width, screen.height, session.asteroids.len()
        );
        session
    }

    /// Random spawn position inside the central band of the screen
    pub fn generate_asteroid_position(&mut self) -> IVec2 {
        let (low, high) = (self.config.spawn_band_min, self.config.spawn_band_max);
        let width = self.screen.width_f64();
        let height = self.screen.height_f64();

        let x = self.rng.gen_range((width * low) as i32..=(width * high) as i32);
        let y = self.rng.gen_range((height * low) as i32..=(height * high) as i32);
        ivec2(x, y)
    }

    /// Random velocity with each component drawn from `[min_speed, max_speed]`.
    /// The bounds may be given in either order.
    pub fn generate_asteroid_speed(&mut self, min_speed: i32, max_speed: i32) -> IVec2 {
        let (low, high) = (min_speed.min(max_speed), min_speed.max(max_speed));
        ivec2(self.rng.gen_range(low..=high), self.rng.gen_range(low..=high))
    }

    fn spawn_asteroids(&mut self) -> Vec<Asteroid> {
        let (min_speed, max_speed) = (self.config.min_speed, self.config.max_speed);
        (0..self.config.asteroid_count)
            .map(|_| {
                let position = self.generate_asteroid_position();
                let velocity = self.generate_asteroid_speed(min_speed, max_speed);
                Asteroid::new(position, velocity, Rc::clone(&self.asteroid_sprite))
            })
            .collect()
    }

    /// Whether any asteroid is within the collision threshold of the ship on
    /// both axes. The ship's reference point is its position shifted right by
    /// the collision offset.
    pub fn check_collision(&self) -> bool {
        // Ship x is unbounded, so distances are taken in i64
        let ship = self.spaceship.position();
        let reference_x = i64::from(ship.x) + i64::from(self.config.collision_offset);
        let reference_y = i64::from(ship.y);
        let threshold = i64::from(self.config.collision_threshold);

        self.asteroids.iter().any(|asteroid| {
            let position = asteroid.position();
            (i64::from(position.x) - reference_x).abs() < threshold
                && (i64::from(position.y) - reference_y).abs() < threshold
        })
    }

    /// Advance one frame and return the frame with every entity drawn.
    ///
    /// Each detected hand, in order, moves and draws the ship and is checked
    /// for collision, so with several hands the last one decides where the
    /// ship ends up. Asteroids move and draw every frame whether or not a
    /// hand was seen.
    pub fn update(&mut self, mut frame: Frame, hands: &[HandDetection]) -> Frame {
        for hand in hands {
            self.spaceship.update_position(hand, self.screen.height);
            frame = self.spaceship.draw(frame);

            if self.check_collision() {
                self.game_over = true;
                self.score = compute_score(self.elapsed(), self.config.score_multiplier);
                log::info!("Collision at {:?}, score {}", self.spaceship.position(), self.score);
            }
        }

        for asteroid in &mut self.asteroids {
            asteroid.move_within(self.screen.width, self.screen.height, self.config.boundary_margin);
            frame = asteroid.draw(frame);
        }

        frame
    }

    /// Start a new round in place: fresh asteroids, zero score, timer
    /// restarted. The ship keeps its position.
    pub fn reset(&mut self) {
        self.game_over = false;
        self.start_time = self.clock.now();
        self.score = 0;
        self.asteroids = self.spawn_asteroids();
        log::debug!("Session reset with {} asteroids", self.asteroids.len());
    }

    /// Overlay the final score on a dimmed copy of `frame`
    pub fn render_game_over(&self, frame: &Frame) -> Frame {
        let mut screen = frame.clone();
        render::dim(&mut screen, GAME_OVER_DIM);

        let px = (screen.height() as f32 / 12.0).max(12.0);
        let score_line = format!("SCORE: {}", self.score);
        let lines = ["GAME OVER", score_line.as_str()];

        let line_height = self.text.line_height(px) as i32;
        let line_step = line_height * 3 / 2;
        let block_height = line_step * (lines.len() as i32 - 1) + line_height;
        let mut y = (screen.height() as i32 - block_height) / 2;
        for line in lines {
            let x = (screen.width() as i32 - self.text.text_width(line, px) as i32) / 2;
            self.text.draw_text(&mut screen, line, ivec2(x, y), px, TEXT_COLOR);
            y += line_step;
        }
        screen
    }

    /// Seconds since the round started
    pub fn elapsed(&self) -> f64 {
        self.clock.now() - self.start_time
    }

    /// Score of the last finished round, 0 while playing
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the round has ended
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Asteroids currently in play
    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    /// The player ship
    pub fn spaceship(&self) -> &Spaceship {
        &self.spaceship
    }

    /// Clock reading at the start of the round
    pub fn start_time(&self) -> f64 {
        self.start_time
    }
}

impl Application for GameSession {
    fn update(&mut self, frame: Frame, hands: &[HandDetection]) -> Result<Frame, AppError> {
        Ok(Self::update(self, frame, hands))
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn game_over_screen(&self, frame: &Frame) -> Frame {
        self.render_game_over(frame)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn cleanup(&mut self) {
        log::info!("Session ended (last score {})", self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use frame_engine::foundation::time::ManualClock;
    use frame_engine::vision::BoundingBox;

    const SCREEN: ScreenGeometry = ScreenGeometry::new(1920, 1080);

    fn config() -> GameplayConfig {
        GameplayConfig { rng_seed: Some(42), ..GameplayConfig::default() }
    }

    fn session_with(config: GameplayConfig, clock: &ManualClock) -> GameSession {
        GameSession::new(
            config,
            SCREEN,
            Rc::new(Sprite::solid_color(40, 40, [128, 128, 128, 255])),
            Rc::new(Sprite::solid_color(160, 200, [0, 255, 0, 255])),
            Rc::new(TextRenderer::bundled().unwrap()),
            Box::new(clock.clone()),
        )
    }

    fn session(clock: &ManualClock) -> GameSession {
        session_with(config(), clock)
    }

    fn hand(x: i32, y: i32) -> HandDetection {
        HandDetection::from_bbox(BoundingBox::new(x, y, 100, 100))
    }

    fn rock(session: &GameSession, x: i32, y: i32) -> Asteroid {
        Asteroid::new(ivec2(x, y), ivec2(0, 0), Rc::clone(&session.asteroid_sprite))
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(compute_score(10.0, 17.5), 175);
        assert_eq!(compute_score(0.0, 17.5), 0);
        // 3.456 rounds to 3.46; 3.46 * 17.5 = 60.55
        assert_eq!(compute_score(3.456, 17.5), 60);
        assert_eq!(compute_score(1.999, 17.5), 35);
    }

    #[test]
    fn test_new_session_defaults() {
        let clock = ManualClock::new(100.0);
        let session = session(&clock);

        assert_eq!(session.asteroids().len(), 4);
        assert_eq!(session.score(), 0);
        assert!(!session.is_game_over());
        assert_relative_eq!(session.start_time(), 100.0);
        assert_eq!(session.spaceship().position(), ivec2(0, 0));
    }

    #[test]
    fn test_spawn_positions_in_central_band() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);

        for _ in 0..500 {
            let position = session.generate_asteroid_position();
            assert!((672..=1056).contains(&position.x), "x {}", position.x);
            assert!((378..=594).contains(&position.y), "y {}", position.y);
        }
    }

    #[test]
    fn test_speeds_positive_and_in_range() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);

        for _ in 0..500 {
            let speed = session.generate_asteroid_speed(10, 20);
            assert!((10..=20).contains(&speed.x));
            assert!((10..=20).contains(&speed.y));
        }
        assert_eq!(session.generate_asteroid_speed(7, 7), ivec2(7, 7));
    }

    #[test]
    fn test_speed_bounds_in_either_order() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);

        for _ in 0..200 {
            let speed = session.generate_asteroid_speed(20, 10);
            assert!((10..=20).contains(&speed.x));
            assert!((10..=20).contains(&speed.y));
        }
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let clock = ManualClock::new(0.0);
        let a = session(&clock);
        let b = session(&clock);

        let positions = |s: &GameSession| s.asteroids().iter().map(Asteroid::position).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_collision_requires_both_axes() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);
        session.spaceship.update_position(&hand(500, 600), 1080);
        // Ship at (500, 500); collision reference at (580, 500)
        assert_eq!(session.spaceship().position(), ivec2(500, 500));

        session.asteroids = vec![rock(&session, 620, 540)];
        assert!(session.check_collision());

        session.asteroids = vec![rock(&session, 630, 500)];
        assert!(!session.check_collision(), "x distance of exactly 50 is a miss");

        session.asteroids = vec![rock(&session, 580, 450)];
        assert!(!session.check_collision(), "y distance of exactly 50 is a miss");

        session.asteroids = vec![rock(&session, 580, 900)];
        assert!(!session.check_collision(), "x alone is not enough");

        session.asteroids = vec![rock(&session, 100, 500)];
        assert!(!session.check_collision(), "y alone is not enough");

        session.asteroids = vec![rock(&session, 100, 100), rock(&session, 540, 460)];
        assert!(session.check_collision(), "any asteroid counts");
    }

    #[test]
    fn test_extreme_ship_x_does_not_overflow() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);
        session.asteroids = vec![rock(&session, i32::MIN, 500), rock(&session, 900, 500)];

        session.update(Frame::new(64, 64), &[hand(i32::MAX - 10, 600)]);
        assert_eq!(session.spaceship().position().x, i32::MAX - 10);
        assert!(!session.is_game_over());

        session.update(Frame::new(64, 64), &[hand(i32::MIN, 600)]);
        assert!(!session.is_game_over());

        // Reference point past i32::MAX still matches an asteroid at the edge
        session.asteroids = vec![rock(&session, i32::MAX, 500)];
        session.spaceship.update_position(&hand(i32::MAX - 100, 600), 1080);
        assert!(session.check_collision());
    }

    #[test]
    fn test_no_asteroids_never_collide() {
        let clock = ManualClock::new(0.0);
        let mut session = session_with(GameplayConfig { asteroid_count: 0, ..config() }, &clock);
        assert!(session.asteroids().is_empty());
        session.spaceship.update_position(&hand(0, 0), 1080);
        assert!(!session.check_collision());
    }

    #[test]
    fn test_collision_ends_round_with_score() {
        let clock = ManualClock::new(50.0);
        let mut session = session(&clock);
        clock.advance(10.0);

        // Ship lands at (1000, 300); reference point (1080, 300)
        session.asteroids = vec![rock(&session, 1080, 300)];
        let frame = session.update(Frame::new(1920, 1080), &[hand(1000, 400)]);

        assert!(session.is_game_over());
        assert_eq!(session.score(), 175);
        assert_eq!(frame.dimensions(), (1920, 1080));
    }

    #[test]
    fn test_no_hands_still_moves_asteroids() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);
        let before: Vec<_> = session.asteroids().iter().map(|a| a.position() + a.velocity()).collect();

        session.update(Frame::new(1920, 1080), &[]);

        let after: Vec<_> = session.asteroids().iter().map(Asteroid::position).collect();
        // Spawn band is inside the margins, so the first step never reflects
        assert_eq!(before, after);
        assert_eq!(session.spaceship().position(), ivec2(0, 0));
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_last_hand_wins() {
        let clock = ManualClock::new(0.0);
        let mut session = session_with(GameplayConfig { asteroid_count: 0, ..config() }, &clock);

        session.update(Frame::new(64, 64), &[hand(10, 500), hand(700, 800)]);

        assert_eq!(session.spaceship().position(), ivec2(700, 700));
    }

    #[test]
    fn test_earlier_hand_collision_still_ends_round() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);
        clock.advance(2.0);
        session.asteroids = vec![rock(&session, 180, 400)];

        // First hand puts the ship on the asteroid, second hand moves it away
        session.update(Frame::new(64, 64), &[hand(100, 500), hand(1500, 100)]);

        assert!(session.is_game_over());
        assert_eq!(session.score(), 35);
        assert_eq!(session.spaceship().position(), ivec2(1500, 0));
    }

    #[test]
    fn test_reset_restores_round_state() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);
        session.spaceship.update_position(&hand(300, 600), 1080);
        session.asteroids.clear();
        session.game_over = true;
        session.score = 99;
        clock.set(42.0);

        session.reset();

        assert!(!session.is_game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.asteroids().len(), 4);
        assert_relative_eq!(session.start_time(), 42.0);
        // Ship is not part of the reset
        assert_eq!(session.spaceship().position(), ivec2(300, 500));

        session.reset();
        assert!(!session.is_game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.asteroids().len(), 4);
    }

    #[test]
    fn test_reset_regenerates_from_oversized_collection() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);
        let extra = rock(&session, 1, 1);
        session.asteroids.extend(std::iter::repeat(extra).take(6));
        assert_eq!(session.asteroids().len(), 10);

        session.reset();
        assert_eq!(session.asteroids().len(), 4);
    }

    #[test]
    fn test_game_over_screen_dims_and_writes() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);
        session.score = 175;

        let frame = Frame::from_pixel(320, 240, Rgb([200, 200, 200]));
        let screen = Application::game_over_screen(&session, &frame);

        assert_eq!(screen.dimensions(), (320, 240));
        // Corner is dimmed, glyph interiors are near white
        assert_eq!(screen.get_pixel(0, 0).0, [80, 80, 80]);
        assert!(screen.pixels().any(|p| p.0.iter().all(|&c| c >= 250)));
        // Text sits in the middle band, away from the top and bottom edges
        for y in (0..30).chain(210..240) {
            assert_eq!(screen.get_pixel(160, y).0, [80, 80, 80], "row {y}");
        }
    }

    #[test]
    fn test_application_reset_delegates() {
        let clock = ManualClock::new(0.0);
        let mut session = session(&clock);
        session.game_over = true;

        Application::reset(&mut session);

        assert!(!Application::is_game_over(&session));
    }
}
