//! SVG path data builders.

use std::fmt::Write;

/// Path through `points`, starting a new sub-path after every gap.
///
/// A present point with gaps on both sides becomes a zero-length segment so
/// round line caps still draw it.
pub fn gapped_path<I>(points: I) -> String
where
    I: IntoIterator<Item = Option<(f64, f64)>>,
{
    let mut d = String::new();
    let mut run: Vec<(f64, f64)> = Vec::new();

    for point in points {
        match point {
            Some(xy) => run.push(xy),
            None => flush_run(&mut d, &mut run),
        }
    }
    flush_run(&mut d, &mut run);
    d
}

/// One continuous path through every point.
pub fn polyline_path<I>(points: I) -> String
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut run: Vec<(f64, f64)> = points.into_iter().collect();
    let mut d = String::new();
    if run.len() > 1 {
        flush_run(&mut d, &mut run);
    } else if let Some(&(x, y)) = run.first() {
        push_command(&mut d, 'M', x, y);
    }
    d
}

fn flush_run(d: &mut String, run: &mut Vec<(f64, f64)>) {
    match run.as_slice() {
        [] => {}
        [(x, y)] => {
            push_command(d, 'M', *x, *y);
            push_command(d, 'L', *x, *y);
        }
        [(x0, y0), rest @ ..] => {
            push_command(d, 'M', *x0, *y0);
            for (x, y) in rest {
                push_command(d, 'L', *x, *y);
            }
        }
    }
    run.clear();
}

fn push_command(d: &mut String, command: char, x: f64, y: f64) {
    let _ = write!(d, "{command}{x:.2},{y:.2}");
}
