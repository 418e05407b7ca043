use serde::{Deserialize, Serialize};

/// Point allocation per matching factor. The defaults sum to 100 so a
/// perfect match scores exactly the top of the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub geolocation: u16,
    pub position: u16,
    pub availability: u16,
    pub rate: u16,
    /// Neutral allowance granted when either side left its rate blank.
    pub rate_fallback: u16,
    pub contract: u16,
}

impl MatchWeights {
    /// Best reachable total with these weights.
    pub fn maximum_total(&self) -> u16 {
        self.geolocation + self.position + self.availability + self.rate + self.contract
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            geolocation: 30,
            position: 25,
            availability: 20,
            rate: 15,
            rate_fallback: 10,
            contract: 10,
        }
    }
}
