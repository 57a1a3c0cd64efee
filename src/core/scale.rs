/// Tick positions on "nice" steps (1, 2, 2.5, 5 times a power of ten)
/// inside `[min, max]`, aiming for at most `max_ticks` entries.
#[must_use]
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let span = high - low;
    if !span.is_finite() || span <= 0.0 || max_ticks < 2 {
        return Vec::new();
    }

    let raw_step = span / (max_ticks - 1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|factor| factor * magnitude)
        .find(|candidate| *candidate >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (low / step).ceil();
    let last = (high / step).floor();
    let tolerance = step * 1e-9;
    let mut ticks = Vec::new();
    let mut index = first;
    while index <= last {
        let tick = index * step;
        if tick >= low - tolerance && tick <= high + tolerance {
            ticks.push(if tick.abs() < tolerance { 0.0 } else { tick });
        }
        index += 1.0;
    }
    ticks
}

/// Short tick label: at most four decimals, trailing zeros dropped.
#[must_use]
pub fn tick_label(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}
