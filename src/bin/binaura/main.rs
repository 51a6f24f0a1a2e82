//! binaura - looping binaural-beat player
//!
//! Run with: cargo run --release

mod cli;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use binaura::{
    io::{BufferSink, ConsoleNotifier, CpalSink},
    sequencing::{StreamClock, WallClock},
};
use cli::Args;

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    // Logs go to stderr so status lines own stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "binaura=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let program = args.program().wrap_err("invalid band list")?;
    program.validate().wrap_err("invalid program parameters")?;

    println!("=== binaura ===");
    println!("Sample rate: {} Hz", program.synth.sample_rate);
    println!(
        "Bands: {}",
        program
            .schedule
            .bands()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" → ")
    );
    println!(
        "Segment: {} s (fade {} s), budget: {} s",
        program.segment_duration, program.synth.fade_duration, program.total_budget
    );
    println!(
        "Pass length: {} s first, {} s after",
        program.first_pass_secs(),
        program.pass_secs()
    );
    println!();

    let notifier = if args.no_color {
        ConsoleNotifier::stdout().plain()
    } else {
        ConsoleNotifier::stdout()
    };
    let sample_rate = program.synth.sample_rate;

    let summary = if args.dry_run {
        let mut player = program.player(
            BufferSink::counting(sample_rate),
            notifier,
            StreamClock::new(),
        )
        .wrap_err("invalid program parameters")?;
        let summary = program
            .run_on(&mut player)
            .wrap_err("dry run stopped")?;
        println!(
            "Dry run rendered {:.1} s of audio",
            player.sink().seconds_written()
        );
        summary
    } else {
        program
            .play(CpalSink::new(sample_rate), notifier, WallClock::new())
            .wrap_err("playback stopped")?
    };

    tracing::info!(
        passes = summary.passes,
        segments = summary.segments,
        frames = summary.frames,
        "done"
    );
    println!("Program completed.");
    Ok(())
}
