use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::thread;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::decode;
use crate::error::AudioError;
use crate::toggle::AudioSink;

/// Fixed playback volume, pinned whenever the soundtrack starts (15%).
pub const MUSIC_VOLUME: f32 = 0.15;

/// Commandes pour le thread de lecture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    SetVolume(f32),
    SetMuted(bool),
    Quit,
}

/// State shared between the control thread and the cpal callback.
/// Tous les champs sont atomiques — zero-alloc, zero-lock, `Send + Sync`.
struct Shared {
    paused: AtomicBool,
    muted: AtomicBool,
    /// f32 volume stored as raw bits.
    volume_bits: AtomicU32,
}

/// Looping soundtrack player.
///
/// The track is decoded once, then played forever through the default
/// output device. The cpal stream lives on a named thread; the stream
/// itself keeps running and the callback writes silence while paused or
/// muted, so play/pause never rebuilds the device state.
pub struct Player {
    cmd_tx: flume::Sender<PlayerCommand>,
}

impl Player {
    /// Decode `path` and start the playback thread. The stream starts in
    /// the paused state; the toggle decides whether to resume.
    ///
    /// # Errors
    /// Returns an error if decoding fails, no output device exists, or
    /// the stream cannot be built — all of which surface to the caller as
    /// a playback-start refusal.
    pub fn spawn(path: &Path) -> Result<Self, AudioError> {
        let (all_samples, sample_rate) =
            decode::decode_track(path).map_err(|e| AudioError::Decode(e.to_string()))?;
        if all_samples.is_empty() {
            return Err(AudioError::Decode(format!(
                "Audio file is empty: {}",
                path.display()
            )));
        }

        let samples = Arc::new(all_samples);
        let playback_pos = Arc::new(AtomicUsize::new(0));
        let shared = Arc::new(Shared {
            paused: AtomicBool::new(true),
            muted: AtomicBool::new(true),
            volume_bits: AtomicU32::new(MUSIC_VOLUME.to_bits()),
        });

        let host = cpal::default_host();
        let output_device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let output_config = cpal::StreamConfig {
            channels: 2, // stereo output
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let playback_samples = Arc::clone(&samples);
        let playback_pos_write = Arc::clone(&playback_pos);
        let callback_shared = Arc::clone(&shared);

        let output_stream = output_device
            .build_output_stream(
                &output_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if callback_shared.paused.load(Ordering::Relaxed)
                        || callback_shared.muted.load(Ordering::Relaxed)
                    {
                        data.fill(0.0);
                        return;
                    }
                    let volume =
                        f32::from_bits(callback_shared.volume_bits.load(Ordering::Relaxed));
                    let total = playback_samples.len();
                    let mut pos = playback_pos_write.load(Ordering::Relaxed);

                    for frame in data.chunks_mut(2) {
                        let sample = playback_samples[pos % total] * volume;
                        frame[0] = sample;
                        if frame.len() > 1 {
                            frame[1] = sample;
                        }
                        pos += 1;
                        if pos >= total {
                            pos = 0; // loop point — the track repeats forever
                        }
                    }
                    playback_pos_write.store(pos, Ordering::Relaxed);
                },
                |err| {
                    log::error!("Audio output error: {err}");
                },
                None,
            )
            .map_err(|e| AudioError::Stream(e.to_string()))?;

        output_stream
            .play()
            .map_err(|e| AudioError::PlaybackRefused(e.to_string()))?;
        log::info!("Audio stream ready @ {sample_rate}Hz");

        let (cmd_tx, cmd_rx) = flume::unbounded::<PlayerCommand>();

        thread::Builder::new()
            .name("bk-audio".to_string())
            .spawn(move || {
                // Keep the output stream alive in this thread
                let _stream = output_stream;
                run_command_loop(&shared, &cmd_rx);
            })
            .map_err(|e| AudioError::Stream(e.to_string()))?;

        Ok(Self { cmd_tx })
    }

    fn send(&self, cmd: PlayerCommand) -> Result<(), AudioError> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| AudioError::PlaybackRefused("audio thread terminated".to_string()))
    }
}

impl AudioSink for Player {
    fn play(&mut self) -> Result<(), AudioError> {
        self.send(PlayerCommand::Play)
    }

    fn pause(&mut self) {
        if let Err(e) = self.send(PlayerCommand::Pause) {
            log::warn!("Pause command dropped: {e}");
        }
    }

    fn set_volume(&mut self, volume: f32) {
        if let Err(e) = self.send(PlayerCommand::SetVolume(volume)) {
            log::warn!("Volume command dropped: {e}");
        }
    }

    fn set_muted(&mut self, muted: bool) {
        if let Err(e) = self.send(PlayerCommand::SetMuted(muted)) {
            log::warn!("Mute command dropped: {e}");
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Quit);
    }
}

/// Command loop owning the stream thread. Retour = fin du thread.
fn run_command_loop(shared: &Shared, cmd_rx: &flume::Receiver<PlayerCommand>) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            PlayerCommand::Play => shared.paused.store(false, Ordering::Relaxed),
            PlayerCommand::Pause => shared.paused.store(true, Ordering::Relaxed),
            PlayerCommand::SetVolume(v) => shared
                .volume_bits
                .store(v.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed),
            PlayerCommand::SetMuted(m) => shared.muted.store(m, Ordering::Relaxed),
            PlayerCommand::Quit => return,
        }
    }
}
