use std::time::{Duration, Instant};

use chrono::{Days, NaiveDate, NaiveTime};

use hotdesk::catalog::SpaceCatalog;
use hotdesk::ledger::BookingLedger;
use hotdesk::model::SpaceId;

// 23 one-hour slots fit in a day without touching midnight.
const SLOTS_PER_DAY: u32 = 23;

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.1}µs, p50={:.1}µs, p95={:.1}µs, p99={:.1}µs, max={:.1}µs",
        latencies.len(),
        avg.as_secs_f64() * 1e6,
        percentile(latencies, 50.0).as_secs_f64() * 1e6,
        percentile(latencies, 95.0).as_secs_f64() * 1e6,
        percentile(latencies, 99.0).as_secs_f64() * 1e6,
        latencies.last().unwrap().as_secs_f64() * 1e6,
    );
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Map an index to a unique one-hour window, walking forward a day at a
/// time.
fn slot(i: u32) -> (NaiveDate, NaiveTime, NaiveTime) {
    let date = base_date() + Days::new((i / SLOTS_PER_DAY) as u64);
    let hour = i % SLOTS_PER_DAY;
    (
        date,
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
    )
}

fn setup() -> (SpaceCatalog, Vec<SpaceId>) {
    let mut catalog = SpaceCatalog::new();
    let rates = [10.0, 10.0, 12.5, 15.0, 25.0, 25.0, 30.0, 40.0, 40.0, 60.0];
    let mut ids = Vec::new();
    for (i, &rate) in rates.iter().enumerate() {
        let id = catalog.add(format!("Space {}", i + 1), rate).unwrap().id;
        ids.push(id);
    }
    println!("  created {} spaces", ids.len());
    (catalog, ids)
}

fn phase1_sequential(catalog: &SpaceCatalog, ledger: &mut BookingLedger, space: SpaceId) {
    let n = 2000u32;
    let mut latencies = Vec::with_capacity(n as usize);
    let start = Instant::now();

    for i in 0..n {
        let (date, s, e) = slot(i);
        let t = Instant::now();
        ledger
            .book(catalog, "bench", space, date, s, e)
            .expect("non-overlapping booking");
        latencies.push(t.elapsed());
    }

    let elapsed = start.elapsed();
    let ops = f64::from(n) / elapsed.as_secs_f64();
    println!(
        "  {n} bookings in {:.2}s = {ops:.0} ops/sec",
        elapsed.as_secs_f64()
    );
    print_latency("booking latency", &mut latencies);
}

fn phase2_availability(catalog: &SpaceCatalog, ledger: &mut BookingLedger, spaces: &[SpaceId]) {
    // Spread load across the rest of the catalog first so every scan
    // walks a populated ledger.
    for &space in &spaces[1..] {
        for i in 0..200 {
            let (date, s, e) = slot(i);
            ledger
                .book(catalog, "filler", space, date, s, e)
                .expect("fresh space slot");
        }
    }
    println!("  ledger holds {} reservations", ledger.list().len());

    let n = 2000u32;
    let mut latencies = Vec::with_capacity(n as usize);
    let mut open = 0usize;
    for i in 0..n {
        let (date, s, e) = slot(i);
        let t = Instant::now();
        let free = ledger
            .available_spaces(catalog, date, s, e)
            .expect("valid window");
        open += free.len();
        latencies.push(t.elapsed());
    }
    println!("  {n} scans, {open} open slots seen");
    print_latency("availability scan", &mut latencies);
}

fn phase3_conflicts(catalog: &SpaceCatalog, ledger: &mut BookingLedger, space: SpaceId) {
    let n = 2000u32;
    let mut rejected = 0u32;
    let mut latencies = Vec::with_capacity(n as usize);

    for i in 0..n {
        // Windows taken in phase 1; every attempt must bounce.
        let (date, s, e) = slot(i % 500);
        let t = Instant::now();
        if ledger.book(catalog, "rival", space, date, s, e).is_err() {
            rejected += 1;
        }
        latencies.push(t.elapsed());
    }
    println!("  {rejected}/{n} attempts rejected");
    print_latency("rejection latency", &mut latencies);
}

fn phase4_scans_and_cascade(
    catalog: &mut SpaceCatalog,
    ledger: &mut BookingLedger,
    spaces: &[SpaceId],
) {
    let n = 1000u32;
    let mut latencies = Vec::with_capacity(n as usize);
    let mut seen = 0usize;
    for _ in 0..n {
        let t = Instant::now();
        seen += ledger.list_by_customer("bench").len();
        latencies.push(t.elapsed());
    }
    println!("  {n} customer scans, {} reservations each", seen / n as usize);
    print_latency("customer scan", &mut latencies);

    let space = spaces[0];
    let before = ledger.list().len();
    let t = Instant::now();
    let removed = ledger.cascade_remove(space);
    let elapsed = t.elapsed();
    catalog.remove(space);
    println!(
        "  cascade removed {} of {before} reservations in {:.2}ms",
        removed.len(),
        elapsed.as_secs_f64() * 1000.0
    );
}

fn main() {
    println!("=== hotdesk stress benchmark ===\n");

    println!("[setup]");
    let (mut catalog, spaces) = setup();
    let mut ledger = BookingLedger::new();

    println!("\n[phase 1] sequential booking throughput");
    phase1_sequential(&catalog, &mut ledger, spaces[0]);

    println!("\n[phase 2] availability scan latency");
    phase2_availability(&catalog, &mut ledger, &spaces);

    println!("\n[phase 3] conflict rejection cost");
    phase3_conflicts(&catalog, &mut ledger, spaces[0]);

    println!("\n[phase 4] linear scans and cascade removal");
    phase4_scans_and_cascade(&mut catalog, &mut ledger, &spaces);

    println!("\n=== benchmark complete ===");
}
