//! Generate a deterministic synthetic sales dataset covering 2018–2022,
//! written as `sample_sales.csv` in the canonical column layout.

use saleslens::data::model::COLUMNS;

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

    /// Uniform value in [lo, hi).
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, options: &'a [&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let regions = ["North", "South", "East", "West"];
    // (category, base units per month, list price)
    let categories: [(&str, f64, f64); 4] = [
        ("Electronics", 120.0, 349.0),
        ("Clothing", 260.0, 49.0),
        ("Groceries", 900.0, 12.0),
        ("Furniture", 40.0, 799.0),
    ];
    let stores = [
        "S001", "S002", "S003", "S004", "S005", "S006", "S007", "S008",
    ];

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer.write_record(COLUMNS).expect("Failed to write header");

    let mut rows = 0usize;
    for year in 2018..=2022 {
        for month in 1..=12u32 {
            // Mild December peak, summer dip.
            let seasonal = match month {
                11 | 12 => 1.35,
                6 | 7 => 0.85,
                _ => 1.0,
            };
            for region in &regions {
                for (category, base_units, list_price) in &categories {
                    let store = rng.pick(&stores);

                    let units = (base_units * seasonal * rng.gauss(1.0, 0.15))
                        .round()
                        .max(0.0) as i64;
                    let unit_price = list_price * rng.gauss(1.0, 0.03);
                    let discount = rng.uniform(0.0, 0.30);
                    let revenue = units as f64 * unit_price * (1.0 - discount);
                    let marketing_spend = rng.uniform(200.0, 1_000.0);
                    let competitor_price = unit_price * rng.gauss(1.0, 0.05);
                    let customer_rating = rng.gauss(4.0, 0.5).clamp(1.0, 5.0);

                    writer
                        .write_record([
                            format!("{year}-{month:02}-01"),
                            region.to_string(),
                            category.to_string(),
                            store.to_string(),
                            units.to_string(),
                            format!("{unit_price:.2}"),
                            format!("{discount:.3}"),
                            format!("{revenue:.2}"),
                            format!("{marketing_spend:.2}"),
                            format!("{competitor_price:.2}"),
                            format!("{customer_rating:.2}"),
                        ])
                        .expect("Failed to write row");
                    rows += 1;
                }
            }
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} records to {output_path}");
}
