use std::sync::mpsc::{Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use super::sink::create_sink;
use super::types::{AudioCmd, AudioError, PlaybackHandle};

/// Wall-clock bookkeeping for the current sink.
#[derive(Default)]
struct Clock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Clock {
    fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.accumulated = Duration::ZERO;
    }

    fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    fn resume(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Spawn the thread owning the output stream. The stream is not `Send`, so
/// it is opened on the thread and the outcome is reported through `ready`.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    ready: SyncSender<Result<(), AudioError>>,
    initial_volume: f32,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(AudioError::Device(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));
        info!("audio output opened");

        let mut sink: Option<Sink> = None;
        let mut paused = false;
        let mut volume = initial_volume;
        let mut clock = Clock::default();

        let publish = |active: bool, elapsed: Duration| {
            if let Ok(mut info) = playback_info.lock() {
                info.active = active;
                info.elapsed = elapsed;
            }
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play { path, reply } => {
                        // Decode first so a bad file leaves the current sink untouched.
                        match create_sink(&stream, &path, volume) {
                            Ok(new_sink) => {
                                if let Some(old) = sink.take() {
                                    old.stop();
                                }
                                new_sink.play();
                                sink = Some(new_sink);
                                paused = false;
                                clock.start();
                                publish(true, Duration::ZERO);
                                debug!(path = %path.display(), "sink started");
                                let _ = reply.send(Ok(()));
                            }
                            Err(e) => {
                                warn!(error = %e, "could not start playback");
                                let _ = reply.send(Err(e));
                            }
                        }
                    }

                    AudioCmd::Stop => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        paused = false;
                        clock.reset();
                        publish(false, Duration::ZERO);
                    }

                    AudioCmd::Pause => {
                        if let Some(ref s) = sink {
                            if !paused {
                                s.pause();
                                paused = true;
                                clock.pause();
                                publish(true, clock.elapsed());
                            }
                        }
                    }

                    AudioCmd::Resume => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                                paused = false;
                                clock.resume();
                                publish(true, clock.elapsed());
                            }
                        }
                    }

                    AudioCmd::SetVolume(v) => {
                        volume = v.clamp(0.0, 1.0);
                        if let Some(ref s) = sink {
                            s.set_volume(volume);
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            if !paused && !s.empty() {
                                fade_out_sink(s, volume, fade_out_ms);
                            }
                            s.stop();
                        }
                        publish(false, Duration::ZERO);
                        info!("audio output closed");
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: publish elapsed time, freeze it once the file ran out.
                    if let Some(ref s) = sink {
                        if !paused {
                            if s.empty() {
                                clock.pause();
                            }
                            publish(true, clock.elapsed());
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_accumulates_across_pauses() {
        let mut clock = Clock::default();
        assert_eq!(clock.elapsed(), Duration::ZERO);

        clock.start();
        thread::sleep(Duration::from_millis(20));
        clock.pause();
        let frozen = clock.elapsed();
        assert!(frozen >= Duration::from_millis(20));

        thread::sleep(Duration::from_millis(20));
        assert_eq!(clock.elapsed(), frozen);

        clock.resume();
        thread::sleep(Duration::from_millis(5));
        assert!(clock.elapsed() > frozen);

        clock.reset();
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }
}
