//! Command-line argument parsing.

use clap::Parser;

use binaura::{
    sequencing::{FrequencyBand, Schedule, ScheduleError},
    ProgramConfig, SynthConfig,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "binaura")]
#[command(about = "Plays a looping sequence of crossfaded binaural beats", long_about = None)]
pub struct Args {
    /// Output sample rate
    #[arg(long, value_name = "HZ", default_value_t = SynthConfig::DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    /// Multiplier lifting band frequencies into the audible range
    #[arg(long, value_name = "FACTOR", default_value = "100")]
    pub transpose: f64,

    /// Carrier drift rate
    #[arg(long, value_name = "HZ", default_value = "0.1")]
    pub mod_freq: f64,

    /// Carrier drift depth
    #[arg(long, value_name = "HZ", default_value = "2")]
    pub mod_depth: f64,

    /// Fade and crossfade window
    #[arg(long, value_name = "SECONDS", default_value = "1")]
    pub fade: f64,

    /// Time spent on each band, including the crossfade
    #[arg(long, value_name = "SECONDS", default_value = "30")]
    pub segment: f64,

    /// No new pass through the schedule starts after this long
    #[arg(long, value_name = "SECONDS", default_value = "180")]
    pub budget: f64,

    /// Replace the schedule, in order (repeatable), e.g. --band Alpha=8
    #[arg(long = "band", value_name = "NAME=HZ")]
    pub bands: Vec<FrequencyBand>,

    /// Render offline without opening an audio device
    #[arg(long)]
    pub dry_run: bool,

    /// Print status lines without colour
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Assemble the program these arguments describe
    pub fn program(&self) -> Result<ProgramConfig, ScheduleError> {
        let schedule = if self.bands.is_empty() {
            Schedule::brainwaves()
        } else {
            Schedule::new(self.bands.clone())?
        };

        Ok(ProgramConfig {
            synth: SynthConfig {
                sample_rate: self.sample_rate,
                transpose_factor: self.transpose,
                modulation_frequency: self.mod_freq,
                modulation_depth: self.mod_depth,
                fade_duration: self.fade,
            },
            segment_duration: self.segment,
            total_budget: self.budget,
            schedule,
        })
    }
}
