use curvefit::{
    display::{format_value, DEFAULT_PRECISION},
    error::Error,
    sample::DEFAULT_PLOT_BUFFER,
    Axis, CurveModel, FitMode, FitOutcome, Session, DEFAULT_CURVE_POINTS,
};

const DATA: &str = "\
hours,temperature
0.5,21.9
1.0,23.4
1.5,25.6
2.0,27.1
2.5,29.8
3.0,31.2
3.5,33.9
4.0,35.4
";

fn main() -> Result<(), Error> {
    //
    // Load the data the same way an uploaded file would be
    let mut session = Session::new();
    session.import_csv(DATA.as_bytes())?;

    //
    // A point typed in by hand goes through the same validation
    session.append_point("4.5", "37.8")?;

    //
    // Try each curve model and compare how well they do
    for mode in [
        FitMode::Polynomial { degree: 1 },
        FitMode::Polynomial { degree: 2 },
        FitMode::Exponential,
        FitMode::NaturalLogarithmic,
    ] {
        session.set_mode(mode);
        let outcome = session.fit()?;
        let Some(curve) = outcome.curve() else {
            continue;
        };

        let mae = curve.error_stats().mean_abs_error;
        println!("{:<24} {}", mode.to_string(), curve.equation());
        println!("{:<24} MAE = {}", "", format_value(mae, DEFAULT_PRECISION));
    }

    //
    // If I was drawing this, the error band is ready to go:
    // the curve itself plus one MAE on either side.
    session.set_mode(FitMode::Polynomial { degree: 1 });
    if let FitOutcome::Polynomial(fit) = session.fit()? {
        if let Some(range) = session.sample().plot_range(DEFAULT_PLOT_BUFFER) {
            let band = fit.error_band(range, DEFAULT_CURVE_POINTS);
            println!("Band has {} points", band.len());
        }
    }

    //
    // Or summarize one axis as a normal distribution
    session.set_mode(FitMode::StatisticalDistribution(Axis::Y));
    if let Some(summary) = session.fit()?.distribution() {
        println!(
            "Mean: {} | Standard Deviation: {}",
            format_value(summary.mean, DEFAULT_PRECISION),
            format_value(summary.std_dev, DEFAULT_PRECISION)
        );
    }

    Ok(())
}
