use std::time::Duration;

/// Fixed pause standing in for a backend round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency(Duration);

impl SimulatedLatency {
    pub const NONE: Self = Self(Duration::ZERO);

    pub fn new(delay: Duration) -> Self {
        Self(delay)
    }

    pub fn duration(self) -> Duration {
        self.0
    }

    pub async fn wait(self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}
