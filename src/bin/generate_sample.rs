use chrono::{Datelike, NaiveDate};

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

    /// Occasionally drop a reading, like real monitoring stations do.
    fn maybe(&mut self, value: f64, missing_rate: f64) -> Option<f64> {
        (self.next_f64() >= missing_rate).then_some(value.max(0.0))
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let start = NaiveDate::from_ymd_opt(2013, 3, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2017, 3, 1).unwrap();

    let output_path = "all_data.csv";
    let mut wtr = csv::Writer::from_path(output_path).expect("Failed to create output file");
    wtr.write_record(["datetime", "TEMP", "NO2", "SO2", "PM10", "PM2.5", "O3"])
        .expect("Failed to write header");

    let mut rows = 0usize;
    let mut day = start;
    while day < end {
        for hour in [2u32, 8, 14, 20] {
            let dt = day.and_hms_opt(hour, 0, 0).unwrap();

            // Seasonal cycle: coldest late January, hottest late July, with
            // a mild diurnal swing. Spans cold waves through heat waves.
            let day_of_year = day.ordinal() as f64;
            let seasonal = 14.0 - 22.0 * ((day_of_year - 28.0) / 365.25 * std::f64::consts::TAU).cos();
            let diurnal = 4.0 * ((hour as f64 - 4.0) / 24.0 * std::f64::consts::TAU).sin();
            let temp = seasonal + diurnal + rng.gauss(0.0, 3.0);

            // Pollution runs higher in cold, stagnant air.
            let cold_factor = 1.0 + (15.0 - temp).max(0.0) / 30.0;
            let no2_val = rng.gauss(35.0 * cold_factor, 12.0);
            let no2 = rng.maybe(no2_val, 0.03);
            let so2_val = rng.gauss(12.0 * cold_factor, 6.0);
            let so2 = rng.maybe(so2_val, 0.03);
            let pm10_val = rng.gauss(90.0 * cold_factor, 35.0);
            let pm10 = rng.maybe(pm10_val, 0.05);
            let pm25_val = rng.gauss(60.0 * cold_factor, 25.0);
            let pm25 = rng.maybe(pm25_val, 0.05);
            // Ozone peaks with heat instead.
            let o3_val = rng.gauss(40.0 + 2.0 * temp.max(0.0), 15.0);
            let o3 = rng.maybe(o3_val, 0.03);

            wtr.write_record([
                dt.format("%Y-%m-%d %H:%M:%S").to_string(),
                format!("{temp:.1}"),
                fmt_cell(no2),
                fmt_cell(so2),
                fmt_cell(pm10),
                fmt_cell(pm25),
                fmt_cell(o3),
            ])
            .expect("Failed to write row");
            rows += 1;
        }
        day = day.succ_opt().expect("date overflow");
    }

    wtr.flush().expect("Failed to flush output");
    println!("Wrote {rows} observations to {output_path}");
}

fn fmt_cell(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.1}")).unwrap_or_default()
}
