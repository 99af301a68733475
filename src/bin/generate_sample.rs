use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Duration, NaiveDate};
use parquet::arrow::ArrowWriter;

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (day offset, extra posts at the top of the spike)
const SPIKES: &[(i64, f64)] = &[(12, 60.0), (41, 90.0), (44, 35.0), (78, 120.0), (103, 50.0)];

const TOPICS: &[&str] = &["新品發表", "客服回應", "價格調整", "門市活動", "網路評價", "限時優惠"];
const TONES: &[&str] = &["好期待", "有點失望", "大家怎麼看", "推推", "已經買了", "再觀察"];

fn posts_on(offset: i64, rng: &mut SimpleRng) -> usize {
    let weekday_boost = if offset % 7 >= 5 { 6.0 } else { 0.0 };
    let spike: f64 = SPIKES
        .iter()
        .map(|&(day, amp)| {
            let d = (offset - day) as f64;
            // sharp rise, two-day decay
            if d < 0.0 { 0.0 } else { amp * (-d / 2.0).exp() }
        })
        .sum();
    let count = rng.gauss(20.0 + weekday_boost, 4.0) + spike;
    count.max(0.0).round() as usize
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;
    let n_days = 120;

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    for offset in 0..n_days {
        let date = start + Duration::days(offset);
        for _ in 0..posts_on(offset, &mut rng) {
            dates.push(date);
            texts.push(format!("{} {}", rng.pick(TOPICS), rng.pick(TONES)));
        }
    }

    // CSV
    let csv_path = "sample_posts.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV")?;
    writer.write_record(["date", "text"])?;
    for (date, text) in dates.iter().zip(&texts) {
        writer.write_record([date.format("%Y-%m-%d").to_string().as_str(), text.as_str()])?;
    }
    writer.flush()?;

    // Parquet
    let epoch_ce = NaiveDate::from_ymd_opt(1970, 1, 1)
        .context("invalid epoch")?
        .num_days_from_ce();
    let date_array = Date32Array::from(
        dates
            .iter()
            .map(|d| d.num_days_from_ce() - epoch_ce)
            .collect::<Vec<i32>>(),
    );
    let text_array = StringArray::from(texts.iter().map(|s| s.as_str()).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("date", DataType::Date32, false),
        Field::new("text", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(date_array), Arc::new(text_array)],
    )
    .context("building record batch")?;

    let parquet_path = "sample_posts.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} posts over {n_days} days to {csv_path} and {parquet_path}",
        dates.len()
    );
    Ok(())
}
