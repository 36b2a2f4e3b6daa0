//! Writes a sample `validity_timing.tsv` so the viewer can be exercised
//! without a real solver run. The timing model is synthetic but shaped like
//! the measured data: cost grows with the domain and requirement sizes and
//! scales with the neighbourhood node count.

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "validity_timing.tsv".to_string());

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&path)?;

    writer.write_record(["NNode", "NDomain", "NReq", "Time(ms)"])?;

    let mut rng = SimpleRng::new(0x7131_99a1);

    for n_node in [1i64, 6, 11] {
        for n_domain in (1..=201).step_by(10) {
            for n_req in [1i64, 2, 4, 8] {
                let base = 0.04 * n_domain as f64 * n_req as f64 * n_node as f64;
                let noise = rng.gauss(0.0, 0.05 * base.max(1.0));
                let time_ms = (base + noise).max(0.0);
                writer.write_record([
                    n_node.to_string(),
                    n_domain.to_string(),
                    n_req.to_string(),
                    format!("{time_ms:.3}"),
                ])?;
            }
        }
    }

    writer.flush()?;
    println!("wrote {path}");
    Ok(())
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + z * std_dev
    }
}
