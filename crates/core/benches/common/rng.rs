use huefind_core::Rgb;

#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn next_rgb(&mut self) -> Rgb {
        let [r, g, b, ..] = self.next_u64().to_le_bytes();
        Rgb::new(r, g, b)
    }
}
