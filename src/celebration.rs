use rand::{seq::SliceRandom, Rng};

const SYMBOLS: [char; 6] = ['★', '✦', '✧', '•', '+', '*'];
const GRAVITY: f64 = 12.0;

/// Number of colours the renderer should cycle through for particles
pub const PALETTE_SIZE: usize = 7;

/// A single spark of a burst
#[derive(Debug, Clone)]
pub struct Spark {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl Spark {
    fn new(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-6.0..6.0),
            vel_y: rng.gen_range(-7.0..-1.0),
            symbol: *SYMBOLS.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..PALETTE_SIZE),
            age: 0.0,
            max_age: rng.gen_range(1.2..2.6),
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
        self.age += dt;
        self.age < self.max_age
    }

    /// 1.0 when fresh, 0.0 when about to expire
    pub fn brightness(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

/// Fireworks shown over the results view after a perfect score.
/// Advanced by ticks, so it runs for a fixed number of frames.
#[derive(Debug)]
pub struct Celebration {
    pub sparks: Vec<Spark>,
    pub is_active: bool,
    width: f64,
    height: f64,
    ticks_left: u32,
}

impl Celebration {
    pub const DURATION_TICKS: u32 = 30;
    const BURSTS: usize = 4;
    const SPARKS_PER_BURST: usize = 18;

    pub fn new() -> Self {
        Self {
            sparks: Vec::new(),
            is_active: false,
            width: 80.0,
            height: 24.0,
            ticks_left: 0,
        }
    }

    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.sparks.clear();
        self.is_active = true;
        self.width = width as f64;
        self.height = height as f64;
        self.ticks_left = Self::DURATION_TICKS;

        for _ in 0..Self::BURSTS {
            let origin_x = rng.gen_range(0.2..0.8) * self.width;
            let origin_y = rng.gen_range(0.2..0.5) * self.height;
            for _ in 0..Self::SPARKS_PER_BURST {
                self.sparks.push(Spark::new(origin_x, origin_y, &mut rng));
            }
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.sparks.clear();
        self.ticks_left = 0;
    }

    /// Step every spark by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if !self.is_active {
            return;
        }

        self.ticks_left = self.ticks_left.saturating_sub(1);
        if self.ticks_left == 0 {
            self.stop();
            return;
        }

        let (width, height) = (self.width, self.height);
        self.sparks.retain_mut(|spark| {
            let alive = spark.update(dt);
            let on_screen = spark.x >= 0.0 && spark.x < width && spark.y < height;
            alive && on_screen
        });
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
