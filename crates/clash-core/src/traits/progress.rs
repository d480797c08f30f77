/// Host progress indicator.
pub trait IProgressSink: Send + Sync {
    fn begin(&self, title: &str, message: &str);

    /// Fraction complete, in `0.0..=1.0`.
    fn update(&self, fraction: f64);

    /// Whether the user asked to cancel through the indicator.
    fn cancel_requested(&self) -> bool;

    fn end(&self);
}
