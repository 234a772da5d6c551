//! Output of the 3D calculation, applied to a cue by the backend.

/// Channel mix and Doppler values computed for one emitter/listener pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DspSettings {
    pub src_channel_count: u32,
    pub dst_channel_count: u32,
    /// Row-major `src_channel_count * dst_channel_count` volume matrix.
    pub matrix_coefficients: Vec<f32>,
    pub delay_times: Vec<f32>,
    pub lpf_direct_coefficient: f32,
    pub lpf_reverb_coefficient: f32,
    pub reverb_level: f32,
    pub doppler_factor: f32,
    pub emitter_to_listener_angle: f32,
    pub emitter_to_listener_distance: f32,
    pub emitter_velocity_component: f32,
    pub listener_velocity_component: f32,
}

impl DspSettings {
    /// Zeroed settings sized for the given channel counts.
    pub fn new(src_channel_count: u32, dst_channel_count: u32) -> Self {
        let cells = src_channel_count as usize * dst_channel_count as usize;
        Self {
            src_channel_count,
            dst_channel_count,
            matrix_coefficients: vec![0.0; cells],
            delay_times: vec![0.0; dst_channel_count as usize],
            lpf_direct_coefficient: 0.0,
            lpf_reverb_coefficient: 0.0,
            reverb_level: 0.0,
            doppler_factor: 1.0,
            emitter_to_listener_angle: 0.0,
            emitter_to_listener_distance: 0.0,
            emitter_velocity_component: 0.0,
            listener_velocity_component: 0.0,
        }
    }
}
