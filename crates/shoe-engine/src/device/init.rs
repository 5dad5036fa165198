/// Device and swapchain settings requested at startup.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Ask for an sRGB swapchain so shader outputs are treated as linear.
    pub prefer_srgb: bool,

    /// Requested present mode; FIFO is used if the surface lacks it.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha compositing; the first supported mode otherwise.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    /// Baseline limits, raised to the adapter's texture resolution limits.
    pub required_limits: wgpu::Limits,

    /// Hint only; backends may ignore it.
    pub desired_maximum_frame_latency: u32,

    /// Depth attachment format, kept in step with the surface size.
    pub depth_format: wgpu::TextureFormat,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            // The scene needs nothing beyond what WebGL2-class hardware offers.
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
            depth_format: wgpu::TextureFormat::Depth32Float,
        }
    }
}
