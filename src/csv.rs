use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use nalgebra::{DMatrix, Vector3};

/// Write a trajectory with one row per recorded step and one column per coordinate.
///
/// The header is `t,x0,y0,z0,x1,...`, `t` is the elapsed time in s.
pub fn write_trajectory<T: Display>(
    positions: &DMatrix<Vector3<T>>,
    time_step: f64,
    path: impl AsRef<Path>,
) -> Result<(), io::Error> {
    let mut file = BufWriter::new(File::create(path)?);
    write_trajectory_to(&mut file, positions, time_step)?;
    file.flush()
}

pub fn write_trajectory_to<T: Display>(
    mut writer: impl Write,
    positions: &DMatrix<Vector3<T>>,
    time_step: f64,
) -> Result<(), io::Error> {
    let (_, num_bodies) = positions.shape();

    write!(writer, "t")?;
    for i in 0..num_bodies {
        write!(writer, ",x{i},y{i},z{i}")?;
    }
    writeln!(writer)?;

    for (step, row) in positions.row_iter().enumerate() {
        write!(writer, "{}", step as f64 * time_step)?;

        for vec in row.iter() {
            for elem in vec.iter() {
                write!(writer, ",{elem}")?;
            }
        }

        writeln!(writer)?;
    }

    Ok(())
}
