//! Output sink backed by the default cpal output device.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::{
    thread,
    time::{Duration, Instant},
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, PushError, RingBuffer};

use super::sink::{AudioSink, SinkError};
use super::CHANNELS;

// Tunables
const RING_SECONDS: f64 = 0.5; // Ring capacity, in seconds of audio
const POLL_INTERVAL: Duration = Duration::from_millis(2);
const STALL_MARGIN: Duration = Duration::from_secs(1); // Slack on top of the queued audio

/// Plays audio through the system's default output device.
///
/// `write` feeds a lock-free ring buffer drained by the cpal callback and
/// returns once the device has pulled every sample. The stream lives from
/// `open` to `close`, so a whole run shares one stream.
pub struct CpalSink {
    sample_rate: u32,
    stream: Option<OpenStream>,
}

struct OpenStream {
    stream: cpal::Stream,
    producer: Producer<f32>,
    capacity: usize,
    sample_rate: u32,
    failed: Arc<AtomicBool>,
}

impl CpalSink {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            stream: None,
        }
    }

    fn ring_capacity(&self) -> usize {
        let frames = (self.sample_rate as f64 * RING_SECONDS).ceil() as usize;
        frames.max(1) * CHANNELS as usize
    }
}

impl OpenStream {
    /// Block until the callback has consumed everything queued.
    fn drain(&self) -> Result<(), SinkError> {
        let queued = self.capacity - self.producer.slots();
        wait_until(
            || self.producer.slots() >= self.capacity,
            playback_time(queued, self.sample_rate) + STALL_MARGIN,
            &self.failed,
        )
    }

    /// Block until the ring has room for at least one more sample.
    fn wait_for_room(&self) -> Result<(), SinkError> {
        wait_until(
            || self.producer.slots() > 0,
            playback_time(self.capacity, self.sample_rate) + STALL_MARGIN,
            &self.failed,
        )
    }
}

/// How long the device needs to play `samples` interleaved samples.
fn playback_time(samples: usize, sample_rate: u32) -> Duration {
    let frames = samples / CHANNELS as usize;
    Duration::from_secs_f64(frames as f64 / sample_rate.max(1) as f64)
}

/// Poll `done` until it holds, the stream reports an error, or `timeout`
/// passes. A device that silently stops calling back hits the timeout.
fn wait_until(
    mut done: impl FnMut() -> bool,
    timeout: Duration,
    failed: &AtomicBool,
) -> Result<(), SinkError> {
    let deadline = Instant::now() + timeout;
    while !done() {
        if failed.load(Ordering::Relaxed) {
            return Err(SinkError::Write("output stream reported an error".into()));
        }
        if Instant::now() >= deadline {
            return Err(SinkError::Write(format!(
                "output device stopped consuming audio for {:.1} s",
                timeout.as_secs_f64()
            )));
        }
        thread::sleep(POLL_INTERVAL);
    }
    Ok(())
}

/// Fill a device buffer from the ring, one whole frame at a time.
///
/// A frame is only taken once both channels are queued so an underrun can
/// never swap left and right.
fn fill_from_ring(consumer: &mut Consumer<f32>, data: &mut [f32]) {
    let channels = CHANNELS as usize;
    for frame in data.chunks_mut(channels) {
        if consumer.slots() >= channels {
            for sample in frame.iter_mut() {
                *sample = consumer.pop().unwrap_or(0.0);
            }
        } else {
            frame.fill(0.0);
        }
    }
}

impl AudioSink for CpalSink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn open(&mut self) -> Result<(), SinkError> {
        if self.stream.is_some() {
            return Err(SinkError::Open("output stream already open".into()));
        }

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(SinkError::NoDevice)?;
        let config = cpal::StreamConfig {
            channels: CHANNELS,
            sample_rate: cpal::SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let capacity = self.ring_capacity();
        let (producer, mut consumer) = RingBuffer::<f32>::new(capacity);
        let failed = Arc::new(AtomicBool::new(false));

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    fill_from_ring(&mut consumer, data);
                },
                {
                    let failed = failed.clone();
                    move |err| {
                        tracing::error!("output stream error: {err}");
                        failed.store(true, Ordering::Relaxed);
                    }
                },
                None,
            )
            .map_err(|err| SinkError::Open(err.to_string()))?;

        stream
            .play()
            .map_err(|err| SinkError::Open(err.to_string()))?;

        tracing::info!(
            sample_rate = self.sample_rate,
            ring_samples = capacity,
            "output stream started"
        );

        self.stream = Some(OpenStream {
            stream,
            producer,
            capacity,
            sample_rate: self.sample_rate,
            failed,
        });
        Ok(())
    }

    fn write(&mut self, samples: &[f32]) -> Result<(), SinkError> {
        let open = self.stream.as_mut().ok_or(SinkError::NotOpen)?;

        for &sample in samples {
            let mut pending = sample;
            loop {
                match open.producer.push(pending) {
                    Ok(()) => break,
                    Err(PushError::Full(rejected)) => {
                        pending = rejected;
                        open.wait_for_room()?;
                    }
                }
            }
        }

        open.drain()
    }

    fn close(&mut self) -> Result<(), SinkError> {
        let Some(open) = self.stream.take() else {
            return Ok(());
        };

        let drained = open.drain();
        open.stream
            .pause()
            .map_err(|err| SinkError::Close(err.to_string()))?;
        tracing::info!("output stream closed");
        drained
    }
}
