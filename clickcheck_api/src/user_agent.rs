/// User agent sent with every request, e.g. `clickcheck-rs/1.0.0`.
pub fn get_user_agent() -> &'static str {
    concat!("clickcheck-rs/", env!("CARGO_PKG_VERSION"))
}
