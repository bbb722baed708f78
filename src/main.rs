use std::fmt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;

use tonal::{
    Approximation, ApproximationSet, Cents, Comma, ContinuedFractionParams, Domain,
    ExtendedRatio, Hertz, NeighborhoodParams, QuotientWalkParams, Ratio, Superpart,
    SuperparticularParams, TreePathParams,
};

/// Rational approximation and measurement of musical intervals
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for simple ratios close to a target
    Approximate {
        /// Target ratio: `3/2`, `3:2`, `7`, `1.5` or an EDO step like `1\12`
        ratio: Ratio,

        /// Search method
        #[arg(long, value_enum, default_value_t = Method::Cf)]
        method: Method,

        /// Largest accepted distance from the target, in cents
        #[arg(long)]
        tolerance: Option<f64>,

        /// Maximum number of results
        #[arg(long)]
        depth: Option<usize>,

        /// Largest prime allowed in a result
        #[arg(long)]
        max_prime: Option<u64>,

        /// Number of continued fraction quotients (cf, quotient-walk)
        #[arg(long)]
        conv_limit: Option<usize>,

        /// Use descending superparticulars n/(n+1) (superparticular)
        #[arg(long)]
        lower: bool,

        /// Largest lattice distance (neighborhood)
        #[arg(long)]
        max_boundary: Option<u64>,

        /// Largest scale factor (neighborhood)
        #[arg(long)]
        max_scale: Option<u64>,

        /// Order of the printed results
        #[arg(long, value_enum, default_value_t = SortKey::Value)]
        sort_by: SortKey,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the lattice points around a scaled ratio
    Neighborhood {
        ratio: Ratio,

        /// Factor both terms are scaled by
        #[arg(long, default_value_t = 1)]
        scale: u64,

        /// Largest lattice distance
        #[arg(long, default_value_t = 1)]
        boundary: u64,

        #[arg(long)]
        json: bool,
    },
    /// Show cents, steps, heights and prime divisions of a ratio
    Info {
        ratio: Ratio,

        /// Also show the frequency of the ratio above this fundamental, in Hz
        #[arg(long)]
        fundamental: Option<f64>,

        #[arg(long)]
        json: bool,
    },
    /// Show the pitches of a chord written as partials, e.g. `4:5:6`
    Chord {
        chord: ExtendedRatio,

        /// Read the numbers as undertones instead of partials
        #[arg(long)]
        subharmonic: bool,

        #[arg(long)]
        json: bool,
    },
    /// List the named commas
    Commas {
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Method {
    Cf,
    QuotientWalk,
    TreePath,
    Superparticular,
    Neighborhood,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortKey {
    Value,
    Benedetti,
    Tenney,
    Weil,
    Wilson,
    MaxPrime,
}

fn approximate(
    approximation: &Approximation,
    method: Method,
    tolerance: Option<Cents>,
    depth: Option<usize>,
    max_prime: Option<u64>,
    conv_limit: Option<usize>,
    lower: bool,
    max_boundary: Option<u64>,
    max_scale: Option<u64>,
) -> tonal::Result<ApproximationSet> {
    match method {
        Method::Cf => {
            let defaults = ContinuedFractionParams::default();
            approximation.by_continued_fraction(&ContinuedFractionParams {
                cents_tolerance: tolerance.unwrap_or(defaults.cents_tolerance),
                depth: depth.or(defaults.depth),
                max_prime,
                conv_limit: conv_limit.unwrap_or(defaults.conv_limit),
            })
        }
        Method::QuotientWalk => {
            let defaults = QuotientWalkParams::default();
            approximation.by_quotient_walk(&QuotientWalkParams {
                cents_tolerance: tolerance.unwrap_or(defaults.cents_tolerance),
                depth: depth.or(defaults.depth),
                max_prime,
                conv_limit: conv_limit.unwrap_or(defaults.conv_limit),
            })
        }
        Method::TreePath => {
            let defaults = TreePathParams::default();
            approximation.by_tree_path(&TreePathParams {
                cents_tolerance: tolerance.unwrap_or(defaults.cents_tolerance),
                depth: depth.or(defaults.depth),
                max_prime,
            })
        }
        Method::Superparticular => {
            let defaults = SuperparticularParams::default();
            approximation.by_superparticular(&SuperparticularParams {
                cents_tolerance: tolerance.unwrap_or(defaults.cents_tolerance),
                depth: depth.or(defaults.depth),
                max_prime,
                superpart: if lower {
                    Superpart::Lower
                } else {
                    Superpart::Upper
                },
                ..defaults
            })
        }
        Method::Neighborhood => {
            let defaults = NeighborhoodParams::default();
            approximation.by_neighborhood(&NeighborhoodParams {
                cents_tolerance: tolerance.unwrap_or(defaults.cents_tolerance),
                depth: depth.or(defaults.depth),
                max_prime,
                max_boundary: max_boundary.unwrap_or(defaults.max_boundary),
                max_scale: max_scale.unwrap_or(defaults.max_scale),
                deadline: None,
            })
        }
    }
}

fn sort(set: ApproximationSet, key: SortKey) -> ApproximationSet {
    match key {
        SortKey::Value => set,
        SortKey::Benedetti => set.sort_by(|r| r.benedetti_height()),
        SortKey::Tenney => set.sort_by(|r| r.tenney_height()),
        SortKey::Weil => set.sort_by(|r| r.weil_height()),
        SortKey::Wilson => set.sort_by(|r| r.wilson_height()),
        SortKey::MaxPrime => set.sort_by(|r| r.max_prime().unwrap_or(1)),
    }
}

#[derive(Serialize)]
struct Info {
    ratio: String,
    reduced: String,
    octave_reduced: String,
    cents: f64,
    log2: f64,
    step: String,
    step_efficiency: f64,
    max_prime: Option<u128>,
    prime_divisions: [Vec<(u128, u32)>; 2],
    prime_vector: Option<Vec<i32>>,
    benedetti_height: String,
    tenney_height: f64,
    weil_height: u128,
    wilson_height: u128,
    period_degrees: f64,
    planar_degrees: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency: Option<Hertz>,
}

fn info(ratio: &Ratio, fundamental: Option<f64>) -> Result<Info> {
    let (upper, lower) = ratio.prime_divisions();
    let step = ratio
        .step(12)
        .with_context(|| format!("{} has no 12-EDO step", ratio))?;
    let equave_reduced = ratio
        .equave_reduce(Ratio::OCTAVE)
        .with_context(|| format!("could not octave reduce {}", ratio))?;
    let frequency = fundamental
        .map(|hz| Hertz::new(hz).map(|hz| hz * *ratio))
        .transpose()
        .context("invalid fundamental")?;

    Ok(Info {
        ratio: ratio.to_string(),
        reduced: ratio.reduced().to_string(),
        octave_reduced: equave_reduced.to_string(),
        cents: ratio.to_cents().rounded(),
        log2: ratio.to_log2().logarithm(),
        step: step.to_string(),
        step_efficiency: step.efficiency().rounded(),
        max_prime: ratio.max_prime(),
        prime_divisions: [upper, lower],
        // primes too large to index are left out
        prime_vector: ratio.prime_vector().ok().flatten(),
        benedetti_height: ratio.benedetti_height().to_string(),
        tenney_height: ratio.tenney_height(),
        weil_height: ratio.weil_height(),
        wilson_height: ratio.wilson_height(),
        period_degrees: ratio.period_degrees(&Ratio::OCTAVE)?,
        planar_degrees: ratio.planar_degrees(),
        frequency,
    })
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divisions = |side: &[(u128, u32)]| {
            side.iter()
                .map(|(p, e)| format!("{}^{}", p, e))
                .collect::<Vec<_>>()
                .join(" ")
        };
        writeln!(f, "{:>18}: {}", "ratio", self.ratio)?;
        writeln!(f, "{:>18}: {}", "reduced", self.reduced)?;
        writeln!(f, "{:>18}: {}", "octave_reduced", self.octave_reduced)?;
        writeln!(f, "{:>18}: {}", "cents", self.cents)?;
        writeln!(f, "{:>18}: {}", "log2", self.log2)?;
        writeln!(f, "{:>18}: {} ({:+})", "step", self.step, self.step_efficiency)?;
        match self.max_prime {
            Some(p) => writeln!(f, "{:>18}: {}", "max_prime", p)?,
            None => writeln!(f, "{:>18}: -", "max_prime")?,
        }
        writeln!(
            f,
            "{:>18}: {} / {}",
            "prime_divisions",
            divisions(&self.prime_divisions[0]),
            divisions(&self.prime_divisions[1])
        )?;
        if let Some(vector) = &self.prime_vector {
            writeln!(f, "{:>18}: {:?}", "prime_vector", vector)?;
        }
        writeln!(f, "{:>18}: {}", "benedetti_height", self.benedetti_height)?;
        writeln!(f, "{:>18}: {}", "tenney_height", self.tenney_height)?;
        writeln!(f, "{:>18}: {}", "weil_height", self.weil_height)?;
        writeln!(f, "{:>18}: {}", "wilson_height", self.wilson_height)?;
        writeln!(f, "{:>18}: {:.2}", "period_degrees", self.period_degrees)?;
        write!(f, "{:>18}: {:.2}", "planar_degrees", self.planar_degrees)?;
        if let Some(frequency) = self.frequency {
            write!(f, "\n{:>18}: {}", "frequency", frequency)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct Chord {
    chord: String,
    domain: Domain,
    ratios: Vec<String>,
    cents: Vec<f64>,
    switched: String,
}

fn chord(chord: &ExtendedRatio, subharmonic: bool) -> Result<Chord> {
    let chord = if subharmonic {
        ExtendedRatio::subharmonic(chord.members())?
    } else {
        chord.clone()
    };
    let ratios = chord.ratios(false)?;
    let other = match chord.domain() {
        Domain::Harmonic => Domain::Subharmonic,
        Domain::Subharmonic => Domain::Harmonic,
    };
    let switched = chord
        .switch_domain(other)
        .with_context(|| format!("{} has no {:?} form", chord, other))?;

    Ok(Chord {
        chord: chord.to_string(),
        domain: chord.domain(),
        ratios: ratios.iter().map(|r| r.reduced().to_string()).collect(),
        cents: ratios.iter().map(|r| r.to_cents().rounded()).collect(),
        switched: switched.to_string(),
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Approximate {
            ratio,
            method,
            tolerance,
            depth,
            max_prime,
            conv_limit,
            lower,
            max_boundary,
            max_scale,
            sort_by,
            json,
        } => {
            let approximation = Approximation::new(ratio)
                .with_context(|| format!("cannot approximate {}", ratio))?;
            let set = approximate(
                &approximation,
                method,
                tolerance.map(Cents::new),
                depth,
                max_prime,
                conv_limit,
                lower,
                max_boundary,
                max_scale,
            )
            .with_context(|| format!("{:?} search for {} failed", method, ratio))?;
            let set = sort(set, sort_by);

            if json {
                println!("{}", serde_json::to_string_pretty(&set)?);
            } else {
                let target = ratio.to_cents();
                for approximation in &set {
                    let cents = approximation.to_cents();
                    println!(
                        "{:>24}  {:>10}  {:>8}",
                        approximation.to_string(),
                        cents.to_string(),
                        (cents - target).to_string()
                    );
                }
            }
        }
        Commands::Neighborhood {
            ratio,
            scale,
            boundary,
            json,
        } => {
            let approximation = Approximation::new(ratio)
                .with_context(|| format!("no neighborhood around {}", ratio))?;
            let points = approximation.neighborhood(scale, boundary)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                for point in points {
                    println!("{}", point);
                }
            }
        }
        Commands::Info {
            ratio,
            fundamental,
            json,
        } => {
            let info = info(&ratio, fundamental)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", info);
            }
        }
        Commands::Chord {
            chord: members,
            subharmonic,
            json,
        } => {
            let chord = chord(&members, subharmonic)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&chord)?);
            } else {
                println!("{} ({:?})", chord.chord, chord.domain);
                for (ratio, cents) in chord.ratios.iter().zip(&chord.cents) {
                    println!("{:>16}  {:>10.2}", ratio, cents);
                }
                println!("switched: {}", chord.switched);
            }
        }
        Commands::Commas { json } => {
            if json {
                let commas: Vec<_> = Comma::all()
                    .iter()
                    .map(|comma| json!({ "name": comma.name, "ratio": comma.ratio.to_string() }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&commas)?);
            } else {
                for comma in Comma::all() {
                    println!(
                        "{:<24}{:>16}  {}",
                        comma.name,
                        comma.ratio.to_string(),
                        comma.ratio.to_cents()
                    );
                }
            }
        }
    }

    Ok(())
}
