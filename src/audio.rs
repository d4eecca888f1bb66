//! Buzzer sound effects
//!
//! The buzzer only knows a period. An effect is a fire-and-forget blip:
//! start the tone, then silence it straight away.

use crate::platform::ToneSink;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Projectile struck a target
    Hit,
}

impl SoundEffect {
    /// Buzzer period for this effect
    pub fn period(&self, settings: &Settings) -> u16 {
        match self {
            SoundEffect::Hit => settings.hit_tone_period,
        }
    }
}

/// Play an effect on the buzzer (no-op with sound disabled)
pub fn play<T: ToneSink + ?Sized>(tone: &mut T, effect: SoundEffect, settings: &Settings) {
    if !settings.sound {
        return;
    }
    tone.set_tone(effect.period(settings));
    tone.set_tone(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::host::ToneLog;

    #[test]
    fn test_hit_blip() {
        let mut tone = ToneLog::default();
        play(&mut tone, SoundEffect::Hit, &Settings::default());
        assert_eq!(tone.periods, vec![880, 0]);
    }

    #[test]
    fn test_muted() {
        let mut tone = ToneLog::default();
        let settings = Settings {
            sound: false,
            ..Default::default()
        };
        play(&mut tone, SoundEffect::Hit, &settings);
        assert!(tone.periods.is_empty());
    }
}
