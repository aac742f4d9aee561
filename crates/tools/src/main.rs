use std::path::PathBuf;

use clap::{Parser, Subcommand};
use formats::land::LandFeatures;
use foundation::math::LatLng;
use globe::{ArcOptions, ArcPhase, Globe, GlobeConfig};
use layers::hex::{HexParams, tessellate};
use runtime::ManualClock;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hex globe tessellation and arc simulation")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tessellate GeoJSON land polygons into hex (or dot) patches
    Tessellate {
        /// GeoJSON FeatureCollection with Polygon/MultiPolygon features
        input: PathBuf,

        /// H3 resolution (clamped to 0..=4)
        #[arg(long, default_value_t = 3)]
        resolution: u8,

        /// Fraction of each cell left empty (clamped to 0..=0.95)
        #[arg(long, default_value_t = 0.2)]
        margin: f64,

        /// Emit round dots instead of hexagons
        #[arg(long)]
        dots: bool,

        /// Patch height as a fraction of the radius
        #[arg(long, default_value_t = 0.005)]
        altitude: f64,

        #[arg(long, default_value_t = 100.0)]
        radius: f64,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Step one arc through its lifecycle on a simulated clock
    Simulate {
        /// Start point as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        from: LatLng,

        /// End point as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        to: LatLng,

        /// World units per second; overrides --duration when positive
        #[arg(long)]
        velocity: Option<f64>,

        /// Animation duration in milliseconds
        #[arg(long)]
        duration: Option<f64>,

        /// Draw the whole path instead of a flying segment
        #[arg(long)]
        full_path: bool,

        /// Maximum number of frames to simulate
        #[arg(long, default_value_t = 1200)]
        frames: u32,

        /// Milliseconds per frame
        #[arg(long, default_value_t = 16.0)]
        dt: f64,

        /// Globe configuration JSON (partial keys allowed)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct TessellationSummary {
    cells: usize,
    patches: usize,
    skipped_cells: usize,
    skipped_polygons: usize,
    vertices: usize,
    indices: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Args::parse()) {
        eprintln!("error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn real_main(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Command::Tessellate {
            input,
            resolution,
            margin,
            dots,
            altitude,
            radius,
            json,
        } => cmd_tessellate(
            input,
            HexParams {
                resolution,
                margin,
                use_dots: dots,
                altitude,
                radius,
            },
            json,
        ),
        Command::Simulate {
            from,
            to,
            velocity,
            duration,
            full_path,
            frames,
            dt,
            config,
        } => {
            let mut options = ArcOptions::new(from, to).with_flying(!full_path);
            options.velocity = velocity;
            options.duration_ms = duration;
            cmd_simulate(options, frames, dt, config)
        }
    }
}

fn cmd_tessellate(
    input: PathBuf,
    params: HexParams,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let features = LandFeatures::from_path(&input)?;
    info!(
        path = %input.display(),
        polygons = features.polygon_count(),
        "land loaded"
    );
    let result = tessellate(&features, &params);
    let summary = TessellationSummary {
        cells: result.cell_count,
        patches: result.patch_count,
        skipped_cells: result.skipped_cells,
        skipped_polygons: result.skipped_polygons,
        vertices: result.mesh.as_ref().map_or(0, |m| m.vertex_count()),
        indices: result.mesh.as_ref().map_or(0, |m| m.index_count()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("cells:            {}", summary.cells);
        println!("patches:          {}", summary.patches);
        println!("skipped cells:    {}", summary.skipped_cells);
        println!("skipped polygons: {}", summary.skipped_polygons);
        println!("vertices:         {}", summary.vertices);
        println!("indices:          {}", summary.indices);
    }
    Ok(())
}

fn cmd_simulate(
    options: ArcOptions,
    frames: u32,
    dt: f64,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(format!("--dt must be a positive number of milliseconds, got {dt}").into());
    }
    let config = match config {
        Some(path) => GlobeConfig::from_json_file(path)?,
        None => GlobeConfig::default(),
    };
    let clock = ManualClock::new();
    let mut globe = Globe::with_clock(config, Box::new(clock.clone()));
    globe.on_arc_removed(|id, options| {
        println!(
            "{id} removed ({:.3},{:.3} -> {:.3},{:.3})",
            options.start_lat, options.start_lng, options.end_lat, options.end_lng
        );
    });

    let id = globe.add_arc(options)?;
    let Some(snapshot) = globe.arc_snapshot(id) else {
        return Err(format!("{id} vanished right after creation").into());
    };
    println!(
        "{id}: length {:.2}, duration {:.0} ms, {} segments",
        snapshot.length, snapshot.duration_ms, snapshot.tubular_segments
    );

    let mut last_phase: Option<ArcPhase> = None;
    let mut end_revealed = false;
    for frame in 0..frames {
        globe.update();
        let Some(snapshot) = globe.arc_snapshot(id) else {
            println!("frame {frame:>5} t={:>8.1} ms: done", globe.now().millis());
            return Ok(());
        };
        if last_phase != Some(snapshot.phase) {
            println!(
                "frame {frame:>5} t={:>8.1} ms: {:?} draw {}..{}",
                globe.now().millis(),
                snapshot.phase,
                snapshot.draw_range.start,
                snapshot.draw_range.end()
            );
            last_phase = Some(snapshot.phase);
        }
        if snapshot.end_revealed && !end_revealed {
            println!("frame {frame:>5} t={:>8.1} ms: end revealed", globe.now().millis());
            end_revealed = true;
        }
        clock.advance(dt);
    }

    println!("stopped after {frames} frames with {} arc(s) active", globe.active_arc_count());
    Ok(())
}

fn parse_lat_lng(s: &str) -> Result<LatLng, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
    if !(lat.is_finite() && lng.is_finite()) {
        return Err(format!("coordinates must be finite, got {s:?}"));
    }
    Ok(LatLng::new(lat, lng))
}
