use crate::session::controller::SessionController;
use crate::session::host::TrackingHost;
use crate::ui::scale_slider::ScaleSlider;
use log::debug;

#[must_use]
pub fn scale_label(scale: f32) -> String {
    format!("Scale: {:.1}", scale)
}

/// On-screen controls as the core sees them: the scale slider with its readout and the
/// occlusion switch.
pub struct UiStateMirror {
    slider: ScaleSlider,
    label: String,
    occlusion_switch: bool,
}

impl UiStateMirror {
    #[must_use]
    pub fn new(slider: ScaleSlider, occlusion_switch: bool) -> Self {
        Self {
            slider,
            label: String::new(),
            occlusion_switch,
        }
    }

    /// Shows the slider's starting value before the user touches anything.
    pub fn initial_label_sync(&mut self) {
        self.label = scale_label(self.slider.value());
    }

    /// Returns the quantized value now held by the slider. Instances placed earlier keep their scale.
    pub fn on_scale_changed(&mut self, raw: f32) -> f32 {
        self.slider.set_value(raw);
        let scale = self.slider.value();
        self.label = scale_label(scale);
        debug!("scale slider: raw {} -> {}", raw, scale);
        scale
    }

    /// Returns whether the session was reconfigured.
    pub fn on_occlusion_toggled<Host: TrackingHost>(&mut self, enabled: bool, controller: &mut SessionController<Host>) -> bool {
        self.occlusion_switch = enabled;
        controller.set_occlusion(enabled)
    }

    #[must_use]
    pub fn current_scale(&self) -> f32 {
        self.slider.value()
    }

    #[must_use]
    pub fn slider(&self) -> &ScaleSlider {
        &self.slider
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn occlusion_switch(&self) -> bool {
        self.occlusion_switch
    }
}
