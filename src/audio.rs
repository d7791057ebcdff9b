//! Sound cues on a terminal: selected cues ring the bell, everything else is tracked silently.

use crate::command::Sound;
use std::collections::HashSet;
use std::io::Write;

pub trait SoundPlayer {
    fn play(&mut self, sound: Sound);
    fn stop(&mut self, sound: Sound);
    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);

    /// Flip the mute flag and return the new state
    fn toggle_mute(&mut self) -> bool {
        let muted = !self.is_muted();
        self.set_muted(muted);
        muted
    }
}

const BELL: &[u8] = b"\x07";

#[derive(Debug)]
pub struct BellPlayer<W: Write> {
    out: W,
    bells: HashSet<Sound>,
    playing: HashSet<Sound>,
    muted: bool,
}

impl<W: Write> BellPlayer<W> {
    pub fn new(out: W, bells: impl IntoIterator<Item = Sound>, muted: bool) -> Self {
        Self {
            out,
            bells: bells.into_iter().collect(),
            playing: HashSet::new(),
            muted,
        }
    }

    pub fn is_playing(&self, sound: Sound) -> bool {
        self.playing.contains(&sound)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundPlayer for BellPlayer<W> {
    fn play(&mut self, sound: Sound) {
        self.playing.insert(sound);
        if self.muted || !self.bells.contains(&sound) {
            return;
        }
        // audio is best effort; a failed bell never reaches the game
        if let Err(e) = self.out.write_all(BELL).and_then(|_| self.out.flush()) {
            log::debug!("bell for {} failed: {}", sound, e);
        }
    }

    fn stop(&mut self, sound: Sound) {
        self.playing.remove(&sound);
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        log::debug!("sound {}", if muted { "muted" } else { "unmuted" });
        self.muted = muted;
    }
}
