//! Blendshape state tracking
//!
//! VRM 0.x receivers key their presets with capitalized names ("Joy",
//! "Blink_L"), VRM 1.0 receivers with lowercase ones ("happy", "blinkLeft").
//! Both families are always driven so either receiver convention responds.
//!
//! The tracker owns one eased weight per recognized channel. Every frame it
//! recomputes targets (expression preset or explicit key, blink forced on
//! the blink family) and moves each weight toward its target by the caller's
//! smoothing factor. Every channel is reported every frame; the receiver
//! commits the batch on the apply signal.

use vmcast_core::clamp01;

/// One recognized blendshape channel
///
/// Variant order is wire order: legacy/modern pairs per emotion, blink keys
/// last. The set is fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendKey {
    Vrm0Neutral,
    Vrm1Neutral,
    Vrm0Joy,
    Vrm1Happy,
    Vrm0Angry,
    Vrm1Angry,
    Vrm0Sorrow,
    Vrm1Sad,
    Vrm0Fun,
    Vrm1Relaxed,
    Vrm0Surprised,
    Vrm1Surprised,
    Vrm0Blink,
    Vrm0BlinkL,
    Vrm0BlinkR,
    Vrm1Blink,
    Vrm1BlinkLeft,
    Vrm1BlinkRight,
}

impl BlendKey {
    /// Number of recognized channels
    pub const COUNT: usize = 18;

    /// All channels in wire order
    pub fn all() -> &'static [BlendKey; Self::COUNT] {
        &[
            BlendKey::Vrm0Neutral,
            BlendKey::Vrm1Neutral,
            BlendKey::Vrm0Joy,
            BlendKey::Vrm1Happy,
            BlendKey::Vrm0Angry,
            BlendKey::Vrm1Angry,
            BlendKey::Vrm0Sorrow,
            BlendKey::Vrm1Sad,
            BlendKey::Vrm0Fun,
            BlendKey::Vrm1Relaxed,
            BlendKey::Vrm0Surprised,
            BlendKey::Vrm1Surprised,
            BlendKey::Vrm0Blink,
            BlendKey::Vrm0BlinkL,
            BlendKey::Vrm0BlinkR,
            BlendKey::Vrm1Blink,
            BlendKey::Vrm1BlinkLeft,
            BlendKey::Vrm1BlinkRight,
        ]
    }

    /// Wire name of this channel
    pub fn name(self) -> &'static str {
        match self {
            BlendKey::Vrm0Neutral => "Neutral",
            BlendKey::Vrm1Neutral => "neutral",
            BlendKey::Vrm0Joy => "Joy",
            BlendKey::Vrm1Happy => "happy",
            BlendKey::Vrm0Angry => "Angry",
            BlendKey::Vrm1Angry => "angry",
            BlendKey::Vrm0Sorrow => "Sorrow",
            BlendKey::Vrm1Sad => "sad",
            BlendKey::Vrm0Fun => "Fun",
            BlendKey::Vrm1Relaxed => "relaxed",
            BlendKey::Vrm0Surprised => "Surprised",
            BlendKey::Vrm1Surprised => "surprised",
            BlendKey::Vrm0Blink => "Blink",
            BlendKey::Vrm0BlinkL => "Blink_L",
            BlendKey::Vrm0BlinkR => "Blink_R",
            BlendKey::Vrm1Blink => "blink",
            BlendKey::Vrm1BlinkLeft => "blinkLeft",
            BlendKey::Vrm1BlinkRight => "blinkRight",
        }
    }

    /// Look a channel up by its wire name
    pub fn from_name(name: &str) -> Option<BlendKey> {
        BlendKey::all().iter().copied().find(|k| k.name() == name)
    }

    /// Is this one of the six blink channels?
    pub fn is_blink(self) -> bool {
        matches!(
            self,
            BlendKey::Vrm0Blink
                | BlendKey::Vrm0BlinkL
                | BlendKey::Vrm0BlinkR
                | BlendKey::Vrm1Blink
                | BlendKey::Vrm1BlinkLeft
                | BlendKey::Vrm1BlinkRight
        )
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Expression preset selecting a pair of (legacy, modern) channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expression {
    #[default]
    Neutral,
    Happy,
    Anger,
    Sad,
    Fun,
    Surprise,
}

impl Expression {
    /// Channel weights this preset drives at full intensity
    pub fn preset(self) -> &'static [(BlendKey, f32)] {
        match self {
            Expression::Neutral => &[],
            Expression::Happy => &[(BlendKey::Vrm0Joy, 1.0), (BlendKey::Vrm1Happy, 1.0)],
            Expression::Anger => &[(BlendKey::Vrm0Angry, 1.0), (BlendKey::Vrm1Angry, 1.0)],
            Expression::Sad => &[(BlendKey::Vrm0Sorrow, 1.0), (BlendKey::Vrm1Sad, 1.0)],
            Expression::Fun => &[(BlendKey::Vrm0Fun, 1.0), (BlendKey::Vrm1Relaxed, 1.0)],
            Expression::Surprise => &[
                (BlendKey::Vrm0Surprised, 1.0),
                (BlendKey::Vrm1Surprised, 1.0),
            ],
        }
    }

    /// Preset name as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Happy => "happy",
            Expression::Anger => "anger",
            Expression::Sad => "sad",
            Expression::Fun => "fun",
            Expression::Surprise => "surprise",
        }
    }

    /// Look a preset up by name; unknown names are the caller's problem
    /// (they degrade to `Neutral`, which drives nothing)
    pub fn from_name(name: &str) -> Option<Expression> {
        match name {
            "neutral" => Some(Expression::Neutral),
            "happy" => Some(Expression::Happy),
            "anger" => Some(Expression::Anger),
            "sad" => Some(Expression::Sad),
            "fun" => Some(Expression::Fun),
            "surprise" => Some(Expression::Surprise),
            _ => None,
        }
    }
}

/// What the application wants on the face this frame
#[derive(Debug, Clone, Default)]
pub struct ExpressionDrive {
    /// Preset to apply when no explicit key is set
    pub expression: Expression,
    /// Exact blendshape key to drive directly, bypassing presets
    pub explicit_key: Option<String>,
    /// Target weight scale, clamped to [0, 1] at use
    pub intensity: f32,
}

/// Extra channel materialized for an explicit key outside the recognized set
#[derive(Debug, Clone)]
struct CustomChannel {
    name: String,
    value: f32,
}

/// Eased per-channel blendshape state
///
/// All weights start at 0.0 and channels are never removed; a custom channel
/// keeps easing toward 0 once its key stops being driven.
#[derive(Debug, Clone, Default)]
pub struct BlendTracker {
    values: [f32; BlendKey::COUNT],
    custom: Option<CustomChannel>,
}

impl BlendTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every channel one frame toward its target
    ///
    /// Targets, in priority order: everything 0; the explicit key (if any)
    /// at clamped intensity, suppressing the preset; otherwise the preset
    /// pairs scaled by clamped intensity; finally the blink family forced to
    /// the clamped blink weight. Then each weight moves toward its target by
    /// `alpha` (clamped; 1 snaps, 0 freezes).
    pub fn update(&mut self, drive: &ExpressionDrive, blink: f32, alpha: f32) {
        let alpha = clamp01(alpha);
        let mut targets = [0.0f32; BlendKey::COUNT];
        let mut custom_target = 0.0f32;

        match drive.explicit_key.as_deref() {
            Some(key) if !key.is_empty() => {
                let weight = clamp01(drive.intensity);
                if let Some(known) = BlendKey::from_name(key) {
                    targets[known.index()] = weight;
                } else {
                    self.ensure_custom(key);
                    custom_target = weight;
                }
            }
            _ => {
                for &(key, weight) in drive.expression.preset() {
                    targets[key.index()] = weight * clamp01(drive.intensity);
                }
            }
        }

        // Blink wins on its own channels no matter what was targeted above.
        let blink = clamp01(blink);
        for key in BlendKey::all() {
            if key.is_blink() {
                targets[key.index()] = blink;
            }
        }

        for (value, target) in self.values.iter_mut().zip(targets) {
            *value += (target - *value) * alpha;
        }
        if let Some(custom) = &mut self.custom {
            custom.value += (custom_target - custom.value) * alpha;
        }
    }

    /// Every channel `(wire name, weight)` in stable order: the recognized
    /// set first, then the custom channel if one was ever driven
    pub fn channels(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        BlendKey::all()
            .iter()
            .map(move |k| (k.name(), self.values[k.index()]))
            .chain(self.custom.iter().map(|c| (c.name.as_str(), c.value)))
    }

    /// Current weight of a recognized channel
    pub fn value(&self, key: BlendKey) -> f32 {
        self.values[key.index()]
    }

    /// Current weight of the custom channel, if one exists
    pub fn custom_value(&self) -> Option<f32> {
        self.custom.as_ref().map(|c| c.value)
    }

    fn ensure_custom(&mut self, name: &str) {
        match &mut self.custom {
            Some(custom) if custom.name == name => {}
            slot => {
                *slot = Some(CustomChannel {
                    name: name.to_string(),
                    value: 0.0,
                });
            }
        }
    }
}
