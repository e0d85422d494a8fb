use std::time::Instant;
use trajedit::{EditSession, Point3, ScreenPoint, ViewProjection, Viewport};

fn build_helix(points: usize) -> EditSession {
    let mut s = EditSession::new();
    let pts = (0..points)
        .map(|i| {
            let t = i as f64 * 0.01;
            Point3::new(t.cos() * 0.4, t.sin() * 0.4, t * 0.002)
        })
        .collect();
    let aux = (0..points).map(|i| (i % 100) as f64 / 100.0).collect();
    if let Err(e) = s.load(pts, Some(aux)) {
        eprintln!("FAIL: load: {}", e);
        std::process::exit(1);
    }
    s
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut points = 50_000usize;
    let mut picks = 200usize;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--points=") { if let Ok(v)=val.parse() { points=v; } }
        else if let Some(val)=a.strip_prefix("--picks=") { if let Ok(v)=val.parse() { picks=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let mut s = build_helix(points);
    // Orthographic top-down view: NDC = world xy scaled by 2
    let m = [2.0,0.0,0.0,0.0, 0.0,2.0,0.0,0.0, 0.0,0.0,1.0,0.0, 0.0,0.0,0.0,1.0];
    let cam = match Viewport::new(0.0, 0.0, 1000.0, 1000.0).and_then(|vp| ViewProjection::new(m, vp)) {
        Ok(c) => c,
        Err(e) => { eprintln!("FAIL: camera: {}", e); std::process::exit(1); }
    };

    let mut marquee_ms: Vec<f64> = Vec::with_capacity(picks);
    let mut nearest_ms: Vec<f64> = Vec::with_capacity(picks);
    let mut selected = 0usize;
    let candidates: Vec<usize> = (0..points).step_by(97).collect();
    let start_all = Instant::now();
    for k in 0..picks {
        let x0 = (k % 10) as f64 * 80.0;
        let y0 = ((k / 10) % 10) as f64 * 80.0;
        let t0 = Instant::now();
        selected += s.marquee_select(ScreenPoint::new(x0, y0), ScreenPoint::new(x0 + 200.0, y0 + 150.0), &cam);
        marquee_ms.push(t0.elapsed().as_secs_f64() * 1000.0);

        let t1 = Instant::now();
        let _ = s.pick_at(&candidates, ScreenPoint::new(x0 + 3.0, y0 + 7.0), &cam);
        nearest_ms.push(t1.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    marquee_ms.sort_by(|a,b| a.total_cmp(b));
    nearest_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&marquee_ms, 0.5);
    println!(
        "points={} picks={} selected={} total_ms={:.3} marquee_median_ms={:.4} marquee_p90_ms={:.4} marquee_p99_ms={:.4} nearest_median_ms={:.4}",
        points, picks, selected, dur_all, med, percentile(&marquee_ms, 0.9), percentile(&marquee_ms, 0.99), percentile(&nearest_ms, 0.5)
    );
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
