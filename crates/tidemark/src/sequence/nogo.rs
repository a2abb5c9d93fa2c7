//! No-go zone registry
//!
//! Every interaction line and label claims a vertical span between two
//! lifelines. Any lifeline lying strictly between those two, by resolved
//! centre X, must leave a gap in its dashed line for that span. Self-calls
//! claim against their own lifeline plus a rightward reach covering the loop
//! and its left-justified label.

use super::model::LifelineId;
use super::spacing::Spacing;
use crate::core::{DiagramError, Segment};

/// A vertical span claimed between two lifelines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoGoZone {
    pub y_span: Segment,
    pub lifeline_a: LifelineId,
    pub lifeline_b: LifelineId,
    /// Right-most X covered beyond the two centrelines, if any
    pub reach: Option<f64>,
}

/// All claims registered during one layout run
#[derive(Debug, Clone, Default)]
pub struct NoGoRegistry {
    zones: Vec<NoGoZone>,
}

impl NoGoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_claim(
        &mut self,
        lifeline_a: LifelineId,
        lifeline_b: LifelineId,
        y_start: f64,
        y_end: f64,
    ) {
        self.zones.push(NoGoZone {
            y_span: Segment::normalized(y_start, y_end),
            lifeline_a,
            lifeline_b,
            reach: None,
        });
    }

    /// Claim a span that starts at `lifeline` and extends right to `reach_x`
    pub fn register_reaching_claim(
        &mut self,
        lifeline: LifelineId,
        reach_x: f64,
        y_start: f64,
        y_end: f64,
    ) {
        self.zones.push(NoGoZone {
            y_span: Segment::normalized(y_start, y_end),
            lifeline_a: lifeline,
            lifeline_b: lifeline,
            reach: Some(reach_x),
        });
    }

    pub fn zones(&self) -> &[NoGoZone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Y spans of every claim whose line crosses `lifeline`
    ///
    /// Output is in registration order, not sorted.
    pub fn gaps_for(
        &self,
        lifeline: LifelineId,
        spacing: &Spacing,
    ) -> Result<Vec<Segment>, DiagramError> {
        let target = spacing.centre_line(lifeline)?.centre;
        let mut gaps = Vec::new();
        for zone in &self.zones {
            let xa = spacing.centre_line(zone.lifeline_a)?.centre;
            let xb = spacing.centre_line(zone.lifeline_b)?.centre;
            let right = zone.reach.map_or(xa.max(xb), |r| r.max(xa.max(xb)));
            if xa.min(xb) < target && target < right {
                gaps.push(zone.y_span);
            }
        }
        Ok(gaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spacing(count: usize) -> Spacing {
        Spacing::new(1000.0, 20.0, count, 100.0).unwrap()
    }

    #[test]
    fn test_adjacent_claim_crosses_nothing() {
        let mut registry = NoGoRegistry::new();
        registry.register_claim(LifelineId::new(0), LifelineId::new(1), 10.0, 20.0);
        let spacing = spacing(2);
        assert!(registry.gaps_for(LifelineId::new(0), &spacing).unwrap().is_empty());
        assert!(registry.gaps_for(LifelineId::new(1), &spacing).unwrap().is_empty());
    }

    #[test]
    fn test_direction_does_not_matter() {
        let mut registry = NoGoRegistry::new();
        registry.register_claim(LifelineId::new(3), LifelineId::new(0), 10.0, 20.0);
        let spacing = spacing(4);
        assert_eq!(
            registry.gaps_for(LifelineId::new(1), &spacing).unwrap(),
            vec![Segment::new(10.0, 20.0)]
        );
        assert_eq!(
            registry.gaps_for(LifelineId::new(2), &spacing).unwrap(),
            vec![Segment::new(10.0, 20.0)]
        );
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = NoGoRegistry::new();
        registry.register_claim(LifelineId::new(0), LifelineId::new(2), 50.0, 60.0);
        registry.register_claim(LifelineId::new(2), LifelineId::new(0), 10.0, 20.0);
        let gaps = registry
            .gaps_for(LifelineId::new(1), &spacing(3))
            .unwrap();
        assert_eq!(gaps, vec![Segment::new(50.0, 60.0), Segment::new(10.0, 20.0)]);
    }

    #[test]
    fn test_claim_span_normalised() {
        let mut registry = NoGoRegistry::new();
        registry.register_claim(LifelineId::new(0), LifelineId::new(1), 20.0, 10.0);
        assert_eq!(registry.zones()[0].y_span, Segment::new(10.0, 20.0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reaching_claim_gaps_covered_lifelines() {
        let mut registry = NoGoRegistry::new();
        let spacing = spacing(3);
        let b = spacing.centre_line(LifelineId::new(1)).unwrap().centre;
        registry.register_reaching_claim(LifelineId::new(0), b + 1.0, 10.0, 20.0);

        assert!(registry.gaps_for(LifelineId::new(0), &spacing).unwrap().is_empty());
        assert_eq!(
            registry.gaps_for(LifelineId::new(1), &spacing).unwrap(),
            vec![Segment::new(10.0, 20.0)]
        );
        assert!(registry.gaps_for(LifelineId::new(2), &spacing).unwrap().is_empty());
    }

    #[test]
    fn test_short_reach_crosses_nothing() {
        let mut registry = NoGoRegistry::new();
        let spacing = spacing(2);
        let a = spacing.centre_line(LifelineId::new(0)).unwrap().centre;
        registry.register_reaching_claim(LifelineId::new(0), a + 30.0, 10.0, 20.0);
        assert!(registry.gaps_for(LifelineId::new(1), &spacing).unwrap().is_empty());
    }

    #[test]
    fn test_unregistered_lifeline_fails() {
        let registry = NoGoRegistry::new();
        assert!(registry.gaps_for(LifelineId::new(5), &spacing(2)).is_err());
    }
}
