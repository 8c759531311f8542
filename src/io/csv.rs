use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::sim::Sample;

#[derive(Serialize)]
struct SampleRow {
    time: f64,
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    vz: f64,
    mass: f64,
    altitude: f64,
    speed: f64,
}

impl From<&Sample> for SampleRow {
    fn from(s: &Sample) -> Self {
        Self {
            time: s.time,
            x: s.pos.x,
            y: s.pos.y,
            z: s.pos.z,
            vx: s.vel.x,
            vy: s.vel.y,
            vz: s.vel.z,
            mass: s.mass,
            altitude: s.altitude,
            speed: s.speed,
        }
    }
}

/// Write trajectory samples as CSV.
///
/// Columns: time, x, y, z, vx, vy, vz, mass, altitude, speed
pub fn write_samples<W: Write>(writer: W, samples: &[Sample]) -> Result<(), ::csv::Error> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    for s in samples {
        wtr.serialize(SampleRow::from(s))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write trajectory samples to a CSV file at the given path.
pub fn write_samples_file<P: AsRef<Path>>(path: P, samples: &[Sample]) -> Result<(), ::csv::Error> {
    let file = std::fs::File::create(path)?;
    write_samples(file, samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn csv_output_has_header_and_rows() {
        let samples = vec![
            Sample {
                time: 0.0,
                pos: Vector3::zeros(),
                vel: Vector3::zeros(),
                mass: 100.0,
                altitude: 0.0,
                speed: 0.0,
            },
            Sample {
                time: 0.1,
                pos: Vector3::new(0.0, 0.0, 1.0),
                vel: Vector3::new(0.0, 0.0, 50.0),
                mass: 99.5,
                altitude: 1.0,
                speed: 50.0,
            },
        ];

        let mut buf = Vec::new();
        write_samples(&mut buf, &samples).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,x,y,z,vx,vy,vz,mass,altitude,speed");
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[2].starts_with("0.1,"));
        assert!(lines[2].ends_with(",99.5,1.0,50.0"));
    }

    #[test]
    fn empty_trajectory_writes_nothing() {
        let mut buf = Vec::new();
        write_samples(&mut buf, &[]).unwrap();
        assert!(buf.is_empty());
    }
}
