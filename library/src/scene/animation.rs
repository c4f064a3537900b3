use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum RepeatKind {
    Once,
    #[default]
    Loop,
}

/// Playback state of one clip attached to a node. Keyframe evaluation belongs to the host;
/// here it is plain data, so cloning a node yields a player independent of the source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationPlayer {
    clip: String,
    #[serde(default = "default_playing")]
    playing: bool,
    #[serde(default = "default_speed")]
    speed: f32,
    #[serde(default)]
    repeat: RepeatKind,
    #[serde(default)]
    time_offset: f32,
}

fn default_playing() -> bool {
    true
}

fn default_speed() -> f32 {
    1.0
}

impl AnimationPlayer {
    #[must_use]
    pub fn new(clip: impl Into<String>) -> Self {
        Self {
            clip: clip.into(),
            playing: default_playing(),
            speed: default_speed(),
            repeat: RepeatKind::default(),
            time_offset: 0.0,
        }
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: RepeatKind) -> Self {
        self.repeat = repeat;
        self
    }

    #[must_use]
    pub fn clip(&self) -> &str {
        &self.clip
    }

    #[must_use]
    pub fn playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[must_use]
    pub fn repeat(&self) -> RepeatKind {
        self.repeat
    }

    #[must_use]
    pub fn time_offset(&self) -> f32 {
        self.time_offset
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn seek(&mut self, time_offset: f32) {
        self.time_offset = time_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_is_playing_in_a_loop() {
        let system_under_test = AnimationPlayer::new("samba");

        assert_eq!(system_under_test.clip(), "samba");
        assert!(system_under_test.playing());
        assert_eq!(system_under_test.speed(), 1.0);
        assert_eq!(system_under_test.repeat(), RepeatKind::Loop);
        assert_eq!(system_under_test.time_offset(), 0.0);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let system_under_test: AnimationPlayer = serde_json::from_str(r#"{"clip": "idle", "repeat": "Once"}"#)
            .expect("player must parse");

        assert_eq!(system_under_test, AnimationPlayer::new("idle").with_repeat(RepeatKind::Once));
    }
}
