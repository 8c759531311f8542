use std::fmt;

use super::sample::{Sample, SimulationResult, Termination};

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

/// Kinds of flight events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Burnout,
    Apogee,
    Impact,
    Custom(String),
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Burnout => f.write_str("BURNOUT"),
            EventKind::Apogee => f.write_str("APOGEE"),
            EventKind::Impact => f.write_str("IMPACT"),
            EventKind::Custom(label) => f.write_str(label),
        }
    }
}

/// A discrete event found in a recorded trajectory.
#[derive(Debug, Clone)]
pub struct FlightEvent {
    pub time: f64,
    pub kind: EventKind,
    pub sample: Sample,
}

/// Passive event detector. Inspects consecutive samples and reports events.
pub trait EventDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind>;
}

/// Detects apogee (vertical velocity turning from positive to non-positive).
pub struct ApogeeDetector;

impl EventDetector for ApogeeDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind> {
        if prev.vel.z > 0.0 && current.vel.z <= 0.0 {
            Some(EventKind::Apogee)
        } else {
            None
        }
    }
}

/// Detects engine cutoff: the first sample past the burn time.
pub struct BurnoutDetector {
    burn_time: f64,
    fired: bool,
}

impl BurnoutDetector {
    pub fn new(burn_time: f64) -> Self {
        Self { burn_time, fired: false }
    }
}

impl EventDetector for BurnoutDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.time <= self.burn_time && current.time > self.burn_time {
            self.fired = true;
            Some(EventKind::Burnout)
        } else {
            None
        }
    }
}

/// Detects when altitude crosses a threshold (ascending or descending).
pub struct AltitudeDetector {
    pub altitude: f64,
    pub ascending: bool,
    fired: bool,
}

impl AltitudeDetector {
    pub fn new(altitude: f64, ascending: bool) -> Self {
        Self { altitude, ascending, fired: false }
    }
}

impl EventDetector for AltitudeDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let crossed = if self.ascending {
            prev.altitude < self.altitude && current.altitude >= self.altitude
        } else {
            prev.altitude > self.altitude && current.altitude <= self.altitude
        };
        if crossed {
            self.fired = true;
            Some(EventKind::Custom(format!(
                "Altitude {:.0}m ({})",
                self.altitude,
                if self.ascending { "ascending" } else { "descending" }
            )))
        } else {
            None
        }
    }
}

/// Run `detectors` over every consecutive pair of samples, in time order.
pub fn detect_events(samples: &[Sample], detectors: &mut [Box<dyn EventDetector>]) -> Vec<FlightEvent> {
    let mut events = Vec::new();
    for pair in samples.windows(2) {
        for detector in detectors.iter_mut() {
            if let Some(kind) = detector.check(&pair[0], &pair[1]) {
                events.push(FlightEvent { time: pair[1].time, kind, sample: pair[1].clone() });
            }
        }
    }
    events
}

/// Burnout, apogee and altitude-mark crossings (both directions), plus the
/// impact sample if the run ended on one.
pub fn flight_events(
    result: &SimulationResult,
    burn_time: f64,
    altitude_marks: &[f64],
) -> Vec<FlightEvent> {
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(BurnoutDetector::new(burn_time)),
        Box::new(ApogeeDetector),
    ];
    for &mark in altitude_marks {
        detectors.push(Box::new(AltitudeDetector::new(mark, true)));
        detectors.push(Box::new(AltitudeDetector::new(mark, false)));
    }
    let mut events = detect_events(&result.samples, &mut detectors);
    if result.termination == Termination::Impact {
        if let Some(last) = result.last() {
            events.push(FlightEvent { time: last.time, kind: EventKind::Impact, sample: last.clone() });
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn make_sample(time: f64, alt: f64, vz: f64) -> Sample {
        Sample {
            time,
            pos: Vector3::new(0.0, 0.0, alt),
            vel: Vector3::new(0.0, 0.0, vz),
            mass: 100.0,
            altitude: alt,
            speed: vz.abs(),
        }
    }

    #[test]
    fn apogee_detected() {
        let mut det = ApogeeDetector;
        let prev = make_sample(0.0, 5000.0, 10.0);
        let curr = make_sample(0.1, 5005.0, -1.0);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::Apogee));
    }

    #[test]
    fn burnout_fires_once() {
        let mut det = BurnoutDetector::new(5.0);
        assert!(det.check(&make_sample(4.9, 0.0, 0.0), &make_sample(5.0, 0.0, 0.0)).is_none());
        assert_eq!(
            det.check(&make_sample(5.0, 0.0, 0.0), &make_sample(5.1, 0.0, 0.0)),
            Some(EventKind::Burnout)
        );
        assert!(det.check(&make_sample(5.0, 0.0, 0.0), &make_sample(5.1, 0.0, 0.0)).is_none());
    }

    #[test]
    fn altitude_detector_ascending() {
        let mut det = AltitudeDetector::new(1000.0, true);
        let prev = make_sample(0.0, 900.0, 100.0);
        let curr = make_sample(1.0, 1050.0, 100.0);
        assert!(det.check(&prev, &curr).is_some());
        // Should not fire again
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn flight_events_in_order() {
        let samples = vec![
            make_sample(0.0, 0.0, 0.0),
            make_sample(1.0, 10.0, 20.0),
            make_sample(2.0, 30.0, 10.0),
            make_sample(3.0, 35.0, -5.0),
            make_sample(4.0, 20.0, -20.0),
            make_sample(5.0, -1.0, -25.0),
        ];
        let result = SimulationResult { samples, termination: Termination::Impact };
        let kinds: Vec<EventKind> = flight_events(&result, 1.5, &[]).into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Burnout, EventKind::Apogee, EventKind::Impact]);
    }

    #[test]
    fn altitude_marks_fire_going_up_and_coming_down() {
        let samples = vec![
            make_sample(0.0, 0.0, 0.0),
            make_sample(1.0, 10.0, 20.0),
            make_sample(2.0, 30.0, 10.0),
            make_sample(3.0, 35.0, -5.0),
            make_sample(4.0, 20.0, -20.0),
            make_sample(5.0, -1.0, -25.0),
        ];
        let result = SimulationResult { samples, termination: Termination::Impact };
        let events = flight_events(&result, 1.5, &[25.0]);
        let labels: Vec<String> = events.iter().map(|e| e.kind.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "BURNOUT",
                "Altitude 25m (ascending)",
                "APOGEE",
                "Altitude 25m (descending)",
                "IMPACT",
            ]
        );
        assert_eq!(events[1].time, 2.0);
        assert_eq!(events[3].time, 4.0);
    }

    #[test]
    fn mark_above_apogee_never_fires() {
        let samples = vec![make_sample(0.0, 0.0, 10.0), make_sample(1.0, 10.0, -1.0)];
        let result = SimulationResult { samples, termination: Termination::DurationExceeded };
        let events = flight_events(&result, 0.0, &[1000.0]);
        assert!(events.iter().all(|e| !matches!(e.kind, EventKind::Custom(_))));
    }
}
