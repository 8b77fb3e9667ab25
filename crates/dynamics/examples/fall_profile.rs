use dynamics::{Integrator, SemiImplicitEuler, terminal_velocity};
use plotters::prelude::*;
use simcore::{KinematicState, SimParams};
use std::fs::File;
use std::io::Write;

fn draw_series(
    filename: &str,
    title: &str,
    x_label: &str,
    y_label: &str,
    x: &[f64],
    y: &[f64],
    series_label: &str,
    reference: Option<(f64, &str)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = x.iter().cloned().fold(f64::INFINITY, |a, b| a.min(b));
    let x_max = x.iter().cloned().fold(f64::NEG_INFINITY, |a, b| a.max(b));
    let mut y_min = y.iter().cloned().fold(f64::INFINITY, |a, b| a.min(b));
    let mut y_max = y.iter().cloned().fold(f64::NEG_INFINITY, |a, b| a.max(b));
    if let Some((ref_y, _)) = reference {
        y_min = y_min.min(ref_y);
        y_max = y_max.max(ref_y * 1.05);
    }

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("Arial", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().x_desc(x_label).y_desc(y_label).draw()?;

    chart
        .draw_series(LineSeries::new(x.iter().cloned().zip(y.iter().cloned()), &BLUE))?
        .label(series_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    if let Some((ref_y, ref_label)) = reference {
        chart
            .draw_series(LineSeries::new(vec![(x_min, ref_y), (x_max, ref_y)], &RED))?
            .label(ref_label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.filled()));
    }

    chart.configure_series_labels().border_style(&BLACK).draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Skydiver from 1000 m under Earth gravity
    let params = SimParams::default();
    let integrator = SemiImplicitEuler;
    let dt = 0.01;

    let mut state = KinematicState::at_rest(&params);
    let mut ts = vec![state.time];
    let mut velocities = vec![state.velocity];
    let mut heights = vec![state.height];

    // Step to the ground, clamping the crossing step to height 0
    while state.time < 120.0 {
        let next = integrator.step(&state, &params, dt)?;
        if next.height <= 0.0 {
            state = KinematicState { height: 0.0, ..next };
            ts.push(state.time);
            velocities.push(state.velocity);
            heights.push(state.height);
            break;
        }
        state = next;
        ts.push(state.time);
        velocities.push(state.velocity);
        heights.push(state.height);
    }

    let mut csv = File::create("fall_profile.csv")?;
    writeln!(csv, "t,velocity,height")?;
    for i in 0..ts.len() {
        writeln!(csv, "{:.6},{:.6},{:.6}", ts[i], velocities[i], heights[i])?;
    }

    let vt = terminal_velocity(&params);
    let reference = if vt.is_finite() {
        Some((vt, "terminal velocity"))
    } else {
        None
    };

    draw_series(
        "fall_velocity.png",
        "Velocity vs Time",
        "Time [s]",
        "Velocity [m/s]",
        &ts,
        &velocities,
        "velocity",
        reference,
    )?;

    draw_series(
        "fall_height.png",
        "Height vs Time",
        "Time [s]",
        "Height [m]",
        &ts,
        &heights,
        "height",
        None,
    )?;

    println!(
        "Impact after {:.2} s at {:.2} m/s (terminal velocity {:.2} m/s)",
        state.time, state.velocity, vt
    );
    println!("Wrote fall_profile.csv, fall_velocity.png, fall_height.png");

    Ok(())
}
