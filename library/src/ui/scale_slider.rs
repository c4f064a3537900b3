use more_asserts::assert_le;

const QUANTIZATION_STEPS_PER_UNIT: f32 = 10.0;
const GRID_TOLERANCE: f32 = 1e-4;

/// Snaps a raw slider value down to the 0.1 grid.
#[must_use]
pub fn quantize_scale(raw: f32) -> f32 {
    (raw * QUANTIZATION_STEPS_PER_UNIT).floor() / QUANTIZATION_STEPS_PER_UNIT
}

/// Smallest and largest grid values inside `[minimum, maximum]`; `None` when the range holds no
/// grid value at all.
#[must_use]
pub fn grid_range(minimum: f32, maximum: f32) -> Option<(f32, f32)> {
    let lower = (minimum * QUANTIZATION_STEPS_PER_UNIT - GRID_TOLERANCE).ceil() / QUANTIZATION_STEPS_PER_UNIT;
    let upper = quantize_scale(maximum);
    if lower <= upper { Some((lower, upper)) } else { None }
}

/// Slider whose value never leaves the 0.1 grid: bounds are narrowed to the grid, so clamping
/// a quantized value keeps it quantized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSlider {
    value: f32,
    minimum: f32,
    maximum: f32,
}

impl ScaleSlider {
    #[must_use]
    pub fn new(minimum: f32, maximum: f32, initial: f32) -> Self {
        assert_le!(minimum, maximum);
        let (minimum, maximum) = grid_range(minimum, maximum)
            .unwrap_or_else(|| panic!("range [{minimum}, {maximum}] holds no slider step"));
        let mut slider = Self { value: minimum, minimum, maximum };
        slider.set_value(initial);
        slider
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    #[must_use]
    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    /// Snaps `raw` to the grid, then keeps it inside the range.
    pub fn set_value(&mut self, raw: f32) {
        self.value = quantize_scale(raw).clamp(self.minimum, self.maximum);
    }
}
