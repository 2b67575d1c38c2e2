use anyhow::{Context, Result};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick an index according to the given weights.
    fn choose_weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut roll = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if roll < *w {
                return i;
            }
            roll -= w;
        }
        weights.len() - 1
    }
}

/// Province name, centroid latitude/longitude, and sampling weight.
const PROVINCES: [(&str, f64, f64, f64); 8] = [
    ("Ontario", 51.25, -85.32, 5.0),
    ("Quebec", 52.94, -73.55, 3.5),
    ("British Columbia", 53.73, -127.65, 2.5),
    ("Alberta", 53.93, -116.58, 2.0),
    ("Manitoba", 53.76, -98.81, 1.0),
    ("Saskatchewan", 52.94, -106.45, 1.0),
    ("Nova Scotia", 44.68, -63.74, 0.8),
    ("New Brunswick", 46.57, -66.46, 0.6),
];

const EDUCATIONS: [(&str, f64); 5] = [
    ("High School", 2.0),
    ("College", 3.0),
    ("Bachelor", 4.0),
    ("Master", 1.5),
    ("Doctor", 0.5),
];

/// Loyalty tier, weight, and (CLV mean, flight distance mean) for the tier.
const LOYALTY_TIERS: [(&str, f64, f64, f64); 3] = [
    ("Star", 5.0, 5500.0, 1200.0),
    ("Nova", 3.0, 8000.0, 1700.0),
    ("Aurora", 1.5, 12000.0, 2300.0),
];

const N_CUSTOMERS: usize = 1500;
const OUTPUT_PATH: &str = "customer_data.csv";

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    writer.write_record([
        "Customer Lifetime Value",
        "Province or State",
        "Education",
        "LoyaltyStatus",
        "Latitude",
        "Longitude",
        "Avg_Flight_Dist_KM",
        "Total_Flights",
        "PRR",
    ])?;

    let province_weights: Vec<f64> = PROVINCES.iter().map(|p| p.3).collect();
    let education_weights: Vec<f64> = EDUCATIONS.iter().map(|e| e.1).collect();
    let tier_weights: Vec<f64> = LOYALTY_TIERS.iter().map(|t| t.1).collect();

    for _ in 0..N_CUSTOMERS {
        let (province, lat, lon, _) = PROVINCES[rng.choose_weighted(&province_weights)];
        let (education, _) = EDUCATIONS[rng.choose_weighted(&education_weights)];
        let (loyalty, _, clv_mean, dist_mean) = LOYALTY_TIERS[rng.choose_weighted(&tier_weights)];

        let clv = rng.gauss(clv_mean, clv_mean * 0.25).max(500.0);
        let avg_dist = rng.gauss(dist_mean, 350.0).max(150.0);
        let total_flights = rng.gauss(14.0, 6.0).max(1.0).round() as u64;
        let prr = rng.gauss(0.35, 0.12).clamp(0.01, 0.95);

        writer.write_record([
            format!("{clv:.2}"),
            province.to_string(),
            education.to_string(),
            loyalty.to_string(),
            format!("{lat}"),
            format!("{lon}"),
            format!("{avg_dist:.1}"),
            total_flights.to_string(),
            format!("{prr:.3}"),
        ])?;
    }

    writer.flush().context("flushing CSV")?;

    println!("Wrote {N_CUSTOMERS} customers to {OUTPUT_PATH}");
    Ok(())
}
