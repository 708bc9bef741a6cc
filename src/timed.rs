use std::time::Instant;

/// Runs f and returns its result together with the elapsed seconds.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();

    (result, duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use std::{thread, time};

    use super::timed;

    #[test]
    fn test_timed() {
        let (value, seconds) = timed(|| {
            thread::sleep(time::Duration::from_millis(50));
            42
        });

        assert_eq!(value, 42);
        assert!(seconds >= 0.05);
    }
}
