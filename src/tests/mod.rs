mod test_data;
mod test_source;

/// Route `log` output through the test harness; safe to call repeatedly.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub const K: usize = crate::neighbourhood::DEFAULT_NEIGHBOURHOOD_SIZE;
pub const EPS: f64 = 1e-9;
